pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};
pub use config::{Settings, TomlConfig};

pub use adapters::{FileSource, HttpSource};
pub use core::{
    Catalog, CourseBuilder, CoursePlan, CourseRequest, SearchEngine, SearchFilters,
};
pub use domain::model::{
    AvailableFilters, CatalogStats, Resource, ResourceMetadata, SearchHit,
};
pub use domain::ports::{ConfigProvider, IndexSource};
pub use utils::error::{CatalogError, Result};

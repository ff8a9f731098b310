pub mod catalog;
pub mod course;
pub mod search;

pub use crate::domain::model::{AvailableFilters, CatalogStats, Resource, SearchHit};
pub use crate::domain::ports::{ConfigProvider, IndexSource};
pub use crate::utils::error::Result;
pub use self::catalog::Catalog;
pub use self::course::{CourseBuilder, CoursePlan, CourseRequest};
pub use self::search::{SearchEngine, SearchFilters};

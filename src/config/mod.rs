#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use self::cli::{CliConfig, Command};
pub use self::toml_config::TomlConfig;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    parse_index_location, validate_positive_number, Validate,
};

pub const DEFAULT_INDEX_LOCATION: &str = "megasearch.json";
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;
pub const DEFAULT_SIMILAR_LIMIT: usize = 5;

/// Runtime settings after layering: CLI flags win over the TOML file,
/// the TOML file wins over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    index_location: String,
    suggestion_limit: usize,
    similar_limit: usize,
    cache_enabled: bool,
}

impl Settings {
    pub fn new(index_location: String) -> Self {
        Self {
            index_location,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            similar_limit: DEFAULT_SIMILAR_LIMIT,
            cache_enabled: true,
        }
    }

    /// Layer the optional TOML file and an optional CLI index override.
    pub fn resolve(file: Option<&TomlConfig>, index_override: Option<&str>) -> Self {
        let mut settings = Self::new(DEFAULT_INDEX_LOCATION.to_string());

        if let Some(config) = file {
            settings.index_location = config.index.location.clone();
            if let Some(search) = &config.search {
                if let Some(limit) = search.suggestion_limit {
                    settings.suggestion_limit = limit;
                }
                if let Some(limit) = search.similar_limit {
                    settings.similar_limit = limit;
                }
                if let Some(cache) = search.cache {
                    settings.cache_enabled = cache;
                }
            }
        }

        if let Some(location) = index_override {
            settings.index_location = location.to_string();
        }

        settings
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_LOCATION.to_string())
    }
}

impl ConfigProvider for Settings {
    fn index_location(&self) -> &str {
        &self.index_location
    }

    fn suggestion_limit(&self) -> usize {
        self.suggestion_limit
    }

    fn similar_limit(&self) -> usize {
        self.similar_limit
    }

    fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        parse_index_location("index", &self.index_location)?;
        validate_positive_number("suggestion_limit", self.suggestion_limit, 1)?;
        validate_positive_number("similar_limit", self.similar_limit, 1)?;
        Ok(())
    }
}

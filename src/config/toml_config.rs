use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{parse_index_location, Validate};
use serde::{Deserialize, Serialize};
use std::fs;

/// Optional on-disk defaults, so regular users do not have to repeat
/// `--index` on every call.
///
/// ```toml
/// [index]
/// location = "https://example.github.io/prof-de-basse/megasearch.json"
///
/// [search]
/// suggestion_limit = 10
/// similar_limit = 5
/// cache = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub index: IndexConfig,
    pub search: Option<SearchConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub suggestion_limit: Option<usize>,
    pub similar_limit: Option<usize>,
    pub cache: Option<bool>,
}

impl TomlConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: TomlConfig =
            toml::from_str(&content).map_err(|e| CatalogError::ConfigError {
                message: format!("Failed to parse {}: {}", path, e),
            })?;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        parse_index_location("index.location", &self.index.location)?;
        Ok(())
    }
}

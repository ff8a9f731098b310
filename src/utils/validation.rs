use crate::utils::error::{CatalogError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Where an index document lives: a local file or an http(s) endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexLocation {
    Path(String),
    Url(String),
}

/// Classify an index location string. Anything that parses as an http(s)
/// URL is fetched over the network; everything else is a local path.
pub fn parse_index_location(field_name: &str, location: &str) -> Result<IndexLocation> {
    if location.trim().is_empty() {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: location.to_string(),
            reason: "Index location cannot be empty".to_string(),
        });
    }

    match Url::parse(location) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(IndexLocation::Url(location.to_string())),
            "file" => Ok(IndexLocation::Path(url.path().to_string())),
            scheme => Err(CatalogError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: location.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        // Not a URL at all, treat as a filesystem path.
        Err(_) => Ok(IndexLocation::Path(location.to_string())),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Index request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Index parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Index fetch failed with status {status} for {location}")]
    FetchStatusError { status: u16, location: String },

    #[error("Unknown resource id: {id}")]
    UnknownResource { id: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

//! Error types for rentbus

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

/// Errors raised by the table and key-value backends
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No {table} row with id {id}")]
    NotFound { table: &'static str, id: String },

    #[error("Duplicate {table} row with id {id}")]
    Duplicate { table: &'static str, id: String },

    #[error("Duplicate slug: {0}")]
    DuplicateSlug(String),

    #[error("Store IO error: {0}")]
    IoError(String),
}

/// Form and payload validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Invalid admin credentials")]
    InvalidCredentials,

    #[error("Admin login required")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;

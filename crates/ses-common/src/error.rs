//! Error types for the statistical enrichment service

use thiserror::Error;

/// Result type alias for enrichment operations
pub type Result<T> = std::result::Result<T, SesError>;

/// Main error type for the enrichment service
#[derive(Error, Debug)]
pub enum SesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Could not find related GO terms for organism id: {0}")]
    DataIntegrity(String),

    #[error("Unsupported analysis method: {0}")]
    UnsupportedMethod(String),

    #[error("Annotation background is empty")]
    EmptyBackground,

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

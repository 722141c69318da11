//! Error types for guardian-core

use thiserror::Error;

/// Main error type for the guardian-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error (fatal at startup)
    #[error("configuration error: {0}")]
    Config(String),

    /// Logging setup error
    #[error("logging error: {0}")]
    Logging(String),

    /// Transport or protocol failure talking to the Gemini API
    #[error("Gemini error: {0}")]
    Gemini(String),

    /// Meal analysis failed, for any underlying cause
    #[error("meal analysis failed: {0}")]
    Analysis(String),

    /// Conversational health advice failed, for any underlying cause
    #[error("health advice failed: {0}")]
    Advice(String),
}

/// Result type alias for guardian-core
pub type Result<T> = std::result::Result<T, Error>;

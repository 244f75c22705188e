//! Error types for the pet-store suite

use thiserror::Error;

/// Result type alias using the suite Error
pub type Result<T> = std::result::Result<T, Error>;

/// Suite error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{step}: expected status {expected}, got {actual} (body: {body})")]
    UnexpectedStatus {
        step: String,
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("{step}: response body differs\n  expected: {expected}\n    actual: {actual}")]
    BodyMismatch {
        step: String,
        expected: String,
        actual: String,
    },

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),
}

impl Error {
    /// True for failures raised by a scenario assertion rather than by transport or setup
    pub fn is_assertion(&self) -> bool {
        matches!(self, Error::UnexpectedStatus { .. } | Error::BodyMismatch { .. })
    }
}

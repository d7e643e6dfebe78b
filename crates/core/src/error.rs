//! Error types for Content Guard.

use thiserror::Error;

/// Result type alias using Content Guard's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Content Guard.
///
/// None of these ever reach a caller of the validation entry points: detector
/// errors become fail-closed checks and pipeline errors become a fail-closed
/// result. They surface only from construction-time APIs (config loading,
/// rulebook parsing, recorder installation).
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Classifier Errors
    // =========================================================================
    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    // =========================================================================
    // Pipeline Errors
    // =========================================================================
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // =========================================================================
    // Audit / Telemetry Errors
    // =========================================================================
    #[error("Audit error: {0}")]
    Audit(String),

    #[error("Telemetry error: {0}")]
    Telemetry(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // =========================================================================
    // Generic Errors
    // =========================================================================
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create a classifier error.
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a classifier-unavailable error.
    pub fn classifier_unavailable(msg: impl Into<String>) -> Self {
        Self::ClassifierUnavailable(msg.into())
    }

    /// Create a pipeline error.
    pub fn pipeline(msg: impl Into<String>) -> Self {
        Self::Pipeline(msg.into())
    }

    /// Create an audit error.
    pub fn audit(msg: impl Into<String>) -> Self {
        Self::Audit(msg.into())
    }

    /// Create a telemetry error.
    pub fn telemetry(msg: impl Into<String>) -> Self {
        Self::Telemetry(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

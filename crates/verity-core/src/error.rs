//! Core error types for verity-core.
//!
//! This module defines the error hierarchy using thiserror. Sub-errors
//! are folded into [`CoreError`] with `#[from]` so callers can use `?`
//! across module boundaries.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for verity-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Item-file errors
    #[error("Item error: {0}")]
    Items(#[from] ItemsError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Session construction errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Sequencer errors
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Upload-related errors
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors reading or parsing a statement item file.
#[derive(Error, Debug)]
pub enum ItemsError {
    /// Failed to read the item file
    #[error("Failed to read item file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Item file is not valid JSON
    #[error("Failed to parse item file {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Session construction errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Participant number outside the valid range
    #[error("Participant number {0} out of range (expected 1..=999)")]
    ParticipantNumberOutOfRange(u32),
}

/// Sequencer errors. The engine is caller-driven; the only modeled
/// failure is handing it an input the current step cannot accept.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Response does not match the current step
    #[error("Unexpected response at step '{step}': {response}")]
    UnexpectedResponse { step: String, response: String },

    /// Rating outside the 6-point scale
    #[error("Rating {0} out of range (expected 0..=5)")]
    RatingOutOfRange(u8),

    /// Session already reached the terminal state
    #[error("Session is finished; no further responses accepted")]
    Finished,
}

/// Upload-specific errors.
///
/// These cover transport failures only. A reachable endpoint that reports
/// `success=false` is *not* an error -- it is carried in
/// [`SaveOutcome`](crate::upload::SaveOutcome) and merely logged by callers.
#[derive(Error, Debug)]
pub enum UploadError {
    /// Endpoint URL could not be parsed
    #[error("Invalid upload endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    /// HTTP transport failed
    #[error("Upload request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

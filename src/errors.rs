//! Unified error types for `Mercadito`.
//!
//! Storage *reads* never surface errors to callers (missing or corrupt blobs
//! resolve to defaults); the variants here cover configuration problems,
//! validation failures at the point of a user action, and gateway failures
//! that have no sensible fallback value.

use thiserror::Error;

/// All error conditions the crate can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment problem.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    /// Invalid input at the point of a user action. No mutation occurs.
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the rejected input
        message: String,
    },

    /// No user profile exists on this device yet (onboarding has not run).
    #[error("No user profile exists on this device")]
    ProfileNotFound,

    /// An accessory id that is not part of the static catalog.
    #[error("Unknown accessory: {id}")]
    UnknownAccessory {
        /// The unrecognized accessory id
        id: String,
    },

    /// An imported backup document carries a version this build cannot read.
    #[error("Unsupported backup version: {version}")]
    UnsupportedBackupVersion {
        /// The version tag found in the document
        version: u32,
    },

    /// The remote video job reported a terminal failure.
    #[error("Video generation failed: {message}")]
    VideoFailed {
        /// Provider-reported failure reason
        message: String,
    },

    /// The remote video job did not complete within the configured ceiling.
    #[error("Video generation timed out after {seconds}s")]
    VideoTimedOut {
        /// The ceiling that was exceeded, in seconds
        seconds: u64,
    },

    /// The remote provider returned a payload the gateway cannot use.
    #[error("Gateway response error: {message}")]
    GatewayResponse {
        /// Description of the unusable payload
        message: String,
    },

    /// Database error from the persistence layer.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// JSON (de)serialization error, surfaced only for export/import.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error from the AI gateway.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

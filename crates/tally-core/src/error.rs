//! Core error types for tally-core.
//!
//! This module defines the error hierarchy using thiserror. Remote sync
//! failures are intentionally absent: the remote mirror is best-effort
//! and its failures degrade to `None`/`false` results instead of errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tally-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Local durable storage errors. Fatal to the triggering save.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Authentication errors (bad credentials, unverified account)
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

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

/// Local storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database file
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Read or write failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Stored document could not be decoded
    #[error("Corrupt state document: {0}")]
    CorruptDocument(String),

    /// Database is locked
    #[error("Store is locked")]
    Locked,
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

/// Authentication errors surfaced to the caller for display.
/// A missing token is not an error -- it downgrades to local-only mode.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Sign-in rejected by the identity provider
    #[error("Sign-in failed: {0}")]
    SignInFailed(String),

    /// Account exists but is not verified
    #[error("Account not verified")]
    NotVerified,

    /// Session token could not be stored or read
    #[error("Credential store error: {0}")]
    CredentialStore(String),

    /// Identity provider unreachable
    #[error("Identity provider unreachable: {0}")]
    Unreachable(String),
}

/// Validation errors. Out-of-range goals are clamped rather than
/// rejected, so the only rejectable input is a zero amount.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Logged amount must be a positive integer
    #[error("Invalid amount {amount}: must be greater than zero")]
    InvalidAmount { amount: u32 },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

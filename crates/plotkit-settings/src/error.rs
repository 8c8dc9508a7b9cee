//! Error types for the settings crate.
//!
//! Panel operations are infallible by design; these errors cover the
//! file-level persistence of the settings store.

use std::io;
use thiserror::Error;

/// Errors that can occur during settings persistence.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings file uses an extension with no known codec.
    #[error("Unsupported settings format: {0}")]
    UnsupportedFormat(String),

    /// The user configuration directory could not be resolved.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

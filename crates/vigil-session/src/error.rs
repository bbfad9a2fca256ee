//! Error types for configuration persistence and the timeout provider.
//!
//! Nothing here reaches the end user: configuration errors are logged and
//! defaulted, provider errors degrade to the current timeout value. Codes
//! follow the workspace [`ErrorCode`] convention.
//!
//! [`ErrorCode`]: vigil_types::ErrorCode

use std::path::PathBuf;
use thiserror::Error;
use vigil_types::ErrorCode;

/// Failure while persisting or preparing configuration storage.
///
/// Read-side problems (missing files, malformed JSON) are deliberately not
/// represented: they resolve to defaults at the service layer.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The storage directory could not be created.
    #[error("failed to create config directory {path}: {source}")]
    DirectoryCreation {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A config key could not be written.
    #[error("failed to write config key '{key}': {source}")]
    Write {
        /// The persisted key.
        key: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A config value could not be serialized.
    #[error("failed to serialize config key '{key}': {source}")]
    Serialize {
        /// The persisted key.
        key: String,
        /// Underlying serialization error.
        source: serde_json::Error,
    },
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::DirectoryCreation { .. } => "CONFIG_DIRECTORY_CREATION",
            Self::Write { .. } => "CONFIG_WRITE",
            Self::Serialize { .. } => "CONFIG_SERIALIZE",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            // Disk/permission conditions the user can fix.
            Self::DirectoryCreation { .. } | Self::Write { .. } => true,
            // A value that cannot serialize will not on retry either.
            Self::Serialize { .. } => false,
        }
    }
}

/// Failure while fetching the externally configured session duration.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The remote endpoint was unreachable or returned a non-success.
    #[error("session duration fetch failed: {0}")]
    Fetch(String),

    /// The endpoint answered with an unusable value.
    #[error("invalid session duration: {minutes} minutes")]
    Invalid {
        /// The rejected value.
        minutes: u64,
    },
}

impl ErrorCode for ProviderError {
    fn code(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "PROVIDER_FETCH",
            Self::Invalid { .. } => "PROVIDER_INVALID",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}

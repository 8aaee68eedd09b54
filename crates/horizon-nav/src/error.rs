//! Error types for the application runtime.

use std::path::PathBuf;

/// Boxed error returned by startup hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors raised while building or running an [`App`](crate::App).
///
/// Navigation requests never produce these; they are construction and
/// shutdown failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The configuration text is not valid TOML for [`AppConfig`](crate::AppConfig).
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value is out of range.
    #[error("invalid value for '{field}': {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },

    /// The startup hook failed, so the event loop was never started.
    #[error("startup failed: {0}")]
    Startup(#[source] BoxError),

    /// The event loop has exited and no longer accepts events.
    #[error("the event loop has already exited")]
    EventLoopExited,
}

impl AppError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration value error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}

//! DM Screen — console error types.

use dmscreen_http::ConfigError;
use thiserror::Error;

/// Startup and runtime errors for the operator console.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid or the client cannot be built.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reading operator input failed.
    #[error("console error: {0}")]
    Io(#[from] std::io::Error),
}

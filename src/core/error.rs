use std::path::PathBuf;

use thiserror::Error;

/// Centralized error type for the bot.
///
/// Every fallible path (config, storage, Telegram calls) converts into this
/// enum so handlers can log one type and binaries can bubble it up through
/// `anyhow`.
///
/// # Example
///
/// ```no_run
/// use phonegate::core::error::AppError;
///
/// fn report(err: AppError) {
///     log::error!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// A required environment variable is not set
    #[error("Configuration missing: {0} must be set")]
    ConfigurationMissing(&'static str),

    /// An environment variable is set but unusable
    #[error("Configuration invalid: {var}: {reason}")]
    ConfigurationInvalid { var: &'static str, reason: String },

    /// The record file cannot be read, parsed or written
    #[error("Storage unavailable ({}): {reason}", .path.display())]
    StorageUnavailable { path: PathBuf, reason: String },

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

impl AppError {
    pub(crate) fn storage(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        AppError::StorageUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid(var: &'static str, reason: impl ToString) -> Self {
        AppError::ConfigurationInvalid {
            var,
            reason: reason.to_string(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

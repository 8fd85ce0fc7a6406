use c64dreams_lib::{ApplyError, IngestError, LayoutError, SettingsError};
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// A required flag was neither given nor set in the settings file
    #[error("--{0} is required")]
    MissingOption(&'static str),

    /// Spreadsheet could not be read
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Layout planning failed
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Apply run stopped
    #[error(transparent)]
    Apply(#[from] ApplyError),

    /// Settings file could not be read or parsed
    #[error("Config error: {0}")]
    Settings(#[from] SettingsError),

    /// JSON rendering failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn missing(flag: &'static str) -> Self {
        Self::MissingOption(flag)
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

use std::path::PathBuf;

use thiserror::Error;

/// Conditions that abort a run before any aggregation begins
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read or write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid table: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid option: {0}")]
    InvalidOption(String),
}

impl Error {
    /// Maps an [`std::io::Error`] on `path` into [`Error::Io`]
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

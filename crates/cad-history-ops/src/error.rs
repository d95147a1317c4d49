//! Error types for the operations layer.

use std::path::PathBuf;

use cad_history_core::HistoryError;
use thiserror::Error;

/// Result type for operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Errors that can occur during operations.
#[derive(Debug, Error)]
pub enum OpsError {
    /// Graph or tree model error (missing commit, broken DAG, bad tree).
    #[error(transparent)]
    History(#[from] HistoryError),

    /// The operation needs a selected commit.
    #[error("No commit selected")]
    NoSelection,

    /// A fork was requested with an unusable branch name.
    #[error("Invalid branch name {name:?}: {reason}")]
    InvalidBranchName { name: String, reason: String },

    /// Project data file could not be read.
    #[error("Failed to load project data from {path}: {message}")]
    DataSource { path: PathBuf, message: String },

    /// A download, fork or preview collaborator failed.
    #[error("{operation} failed: {message}")]
    Collaborator { operation: String, message: String },

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl OpsError {
    /// Wrap a collaborator failure.
    pub fn collaborator(operation: impl Into<String>, err: anyhow::Error) -> Self {
        Self::Collaborator {
            operation: operation.into(),
            message: format!("{err:#}"),
        }
    }

    /// Create a data source error.
    pub fn data_source(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::DataSource {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the error reports a missing commit, tree or node.
    pub fn is_not_found(&self) -> bool {
        matches!(self, OpsError::History(err) if err.is_not_found())
    }
}

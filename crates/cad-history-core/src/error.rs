//! Error taxonomy shared by the commit graph and assembly tree crates.

use thiserror::Error;

use crate::CommitId;

/// Result type alias for history model operations.
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Errors raised by the history model.
///
/// Variants fall in two families: lookups of something absent from the
/// backing set (`is_not_found`) and structural violations of the commit DAG
/// or an assembly tree (`is_integrity`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// A commit id is not part of the loaded commit set.
    #[error("commit not found: {id}")]
    CommitNotFound { id: CommitId },

    /// No assembly tree is recorded for the commit.
    #[error("no assembly tree recorded for commit {commit_id}")]
    TreeNotFound { commit_id: CommitId },

    /// A structural path does not resolve inside a commit's tree.
    #[error("no node at path {path} in commit {commit_id}")]
    NodeNotFound { commit_id: CommitId, path: String },

    /// A commit references a parent that is absent from the commit set.
    #[error("commit {commit} references missing parent {parent}")]
    DanglingParent { commit: CommitId, parent: CommitId },

    /// The parent links do not form a DAG.
    #[error("cycle detected at commit {commit}")]
    CycleDetected { commit: CommitId },

    /// Two commits share the same id.
    #[error("duplicate commit id: {id}")]
    DuplicateCommit { id: CommitId },

    /// An assembly tree violates the part/assembly invariants.
    #[error("invalid assembly tree at {path}: {message}")]
    InvalidTree { path: String, message: String },
}

impl HistoryError {
    /// Whether the error reports a missing commit, tree or node.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            HistoryError::CommitNotFound { .. }
                | HistoryError::TreeNotFound { .. }
                | HistoryError::NodeNotFound { .. }
        )
    }

    /// Whether the error reports a broken graph or tree invariant.
    pub fn is_integrity(&self) -> bool {
        !self.is_not_found()
    }

    /// Create an invalid tree error.
    pub fn invalid_tree(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTree {
            path: path.into(),
            message: message.into(),
        }
    }
}

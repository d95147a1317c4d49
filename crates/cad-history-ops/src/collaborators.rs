//! Seams for the side effects the browser delegates.
//!
//! The browser only produces intents. Moving files, creating branches and
//! rendering previews belong to implementations of these traits.

use anyhow::Result;
use cad_history_core::{BranchId, CommitId};
use cad_history_tree::{DownloadIntent, ForkIntent};
use tracing::info;

/// Fetches files for a download intent.
pub trait FileTransfer {
    fn fetch(&self, commit_id: &CommitId, intent: &DownloadIntent) -> Result<()>;
}

/// Creates a branch from a fork intent and returns its id.
pub trait BranchCreator {
    fn create_branch(
        &self,
        commit_id: &CommitId,
        intent: &ForkIntent,
        branch_name: &str,
    ) -> Result<BranchId>;
}

/// Renders a preview of a commit.
pub trait PreviewRenderer {
    fn render(&self, commit_id: &CommitId) -> Result<()>;
}

/// Collaborators that only log what they were asked to do.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingCollaborators;

impl FileTransfer for LoggingCollaborators {
    fn fetch(&self, commit_id: &CommitId, intent: &DownloadIntent) -> Result<()> {
        info!(
            commit = %commit_id,
            path = %intent.path,
            files = intent.files().len(),
            size = %intent.total_size(),
            "Download"
        );
        Ok(())
    }
}

impl BranchCreator for LoggingCollaborators {
    fn create_branch(
        &self,
        commit_id: &CommitId,
        intent: &ForkIntent,
        branch_name: &str,
    ) -> Result<BranchId> {
        info!(commit = %commit_id, from = %intent.path, branch = branch_name, "Fork");
        Ok(BranchId::new(branch_name))
    }
}

impl PreviewRenderer for LoggingCollaborators {
    fn render(&self, commit_id: &CommitId) -> Result<()> {
        info!(commit = %commit_id, "Preview");
        Ok(())
    }
}

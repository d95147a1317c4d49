//! HistoryBrowser - one browsing session over a project's history.
//!
//! The browser owns the commit graph and the assembly trees, keeps the
//! selection and expansion state, and turns node actions into intents that
//! are handed to the collaborators.

use std::fmt;
use std::str::FromStr;

use cad_history_core::{AssemblyNode, BranchId, Commit, CommitId, Project};
use cad_history_graph::CommitGraph;
use cad_history_tree::{AssemblyTree, DownloadIntent, VisibleNode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::collaborators::{BranchCreator, FileTransfer, PreviewRenderer};
use crate::config::Config;
use crate::data::ProjectData;
use crate::error::{OpsError, OpsResult};
use crate::summary::ProjectSummary;

/// Longest accepted branch name, in characters.
pub const MAX_BRANCH_NAME_CHARS: usize = 100;

/// Whole-commit download flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitDownload {
    /// The root assembly as one bundle.
    CompleteAssembly,
    /// One download per part file.
    IndividualFiles,
}

impl fmt::Display for CommitDownload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitDownload::CompleteAssembly => write!(f, "complete-assembly"),
            CommitDownload::IndividualFiles => write!(f, "individual-files"),
        }
    }
}

impl FromStr for CommitDownload {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "complete-assembly" => Ok(CommitDownload::CompleteAssembly),
            "individual-files" => Ok(CommitDownload::IndividualFiles),
            other => Err(OpsError::Config(format!(
                "Unknown download kind: {} (expected complete-assembly or individual-files)",
                other
            ))),
        }
    }
}

/// A browsing session.
#[derive(Debug, Clone)]
pub struct HistoryBrowser {
    config: Config,
    project: Project,
    graph: CommitGraph,
    trees: AssemblyTree,
}

impl HistoryBrowser {
    /// Open a session over `data`.
    pub fn open(data: ProjectData, config: &Config) -> OpsResult<Self> {
        let ProjectData {
            project,
            commits,
            trees,
        } = data;

        let mut graph = CommitGraph::load_with(commits, &project.branches, config.load_options())?;
        let mut trees = AssemblyTree::new(trees)?;

        if config.expand_root_on_load {
            let roots: Vec<String> = trees
                .commit_ids()
                .into_iter()
                .filter_map(|id| trees.load(id.as_str()).ok())
                .map(|root| AssemblyTree::path_of(root, ""))
                .collect();
            for root in roots {
                trees.expansion_mut().expand(&root);
            }
        }

        if let Some(id) = &config.initial_commit {
            if let Err(err) = graph.select(id) {
                warn!(commit = %id, error = %err, "Initial commit not selectable");
            }
        }

        info!(
            project = %project.name,
            commits = graph.len(),
            trees = trees.commit_ids().len(),
            "Opened history"
        );

        Ok(Self {
            config: config.clone(),
            project,
            graph,
            trees,
        })
    }

    /// Open a session over the data named by the configuration.
    pub fn from_config(config: &Config) -> OpsResult<Self> {
        Self::open(ProjectData::load(config)?, config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn graph(&self) -> &CommitGraph {
        &self.graph
    }

    pub fn trees(&self) -> &AssemblyTree {
        &self.trees
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select a commit. An unknown id leaves the selection unchanged.
    pub fn select(&mut self, commit_id: &str) -> OpsResult<&Commit> {
        self.graph.select(commit_id)?;
        debug!(commit = commit_id, "Selected commit");
        self.graph.current_commit().ok_or(OpsError::NoSelection)
    }

    pub fn current_commit(&self) -> Option<&Commit> {
        self.graph.current_commit()
    }

    fn selected_id(&self) -> OpsResult<CommitId> {
        self.graph
            .selected_id()
            .cloned()
            .ok_or(OpsError::NoSelection)
    }

    /// Tree of the selected commit. `TreeNotFound` means there is no data
    /// to show for it.
    pub fn current_tree(&self) -> OpsResult<&AssemblyNode> {
        let id = self.selected_id()?;
        Ok(self.trees.load(id.as_str())?)
    }

    // =========================================================================
    // Tree navigation
    // =========================================================================

    /// Visible nodes of the selected commit's tree, in display order.
    pub fn visible_tree(&self) -> OpsResult<Vec<VisibleNode<'_>>> {
        let id = self.selected_id()?;
        Ok(self.trees.visible(id.as_str())?.collect())
    }

    pub fn toggle(&mut self, path: &str) -> bool {
        self.trees.toggle(path)
    }

    pub fn expand(&mut self, path: &str) {
        self.trees.expansion_mut().expand(path);
    }

    /// Expand every assembly of the selected commit's tree.
    pub fn expand_all(&mut self) -> OpsResult<usize> {
        let id = self.selected_id()?;
        Ok(self.trees.expand_all(id.as_str())?)
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.trees.is_expanded(path)
    }

    // =========================================================================
    // Node actions
    // =========================================================================

    /// Download the node at `path` in the selected commit.
    pub fn download(&self, path: &str, transfer: &dyn FileTransfer) -> OpsResult<DownloadIntent> {
        let id = self.selected_id()?;
        let node = self.trees.find(id.as_str(), path)?;
        let intent = self.trees.request_download(node, path);

        transfer
            .fetch(&id, &intent)
            .map_err(|e| OpsError::collaborator("download", e))?;
        Ok(intent)
    }

    /// Download the whole selected commit.
    pub fn download_commit(
        &self,
        kind: CommitDownload,
        transfer: &dyn FileTransfer,
    ) -> OpsResult<Vec<DownloadIntent>> {
        let id = self.selected_id()?;
        let root = self.trees.load(id.as_str())?;
        let complete = self
            .trees
            .request_download(root, &AssemblyTree::path_of(root, ""));

        let intents = match kind {
            CommitDownload::CompleteAssembly => vec![complete],
            CommitDownload::IndividualFiles => complete
                .files()
                .iter()
                .map(|file| -> OpsResult<DownloadIntent> {
                    let node = self.trees.find(id.as_str(), &file.path)?;
                    Ok(self.trees.request_download(node, &file.path))
                })
                .collect::<OpsResult<Vec<_>>>()?,
        };

        for intent in &intents {
            transfer
                .fetch(&id, intent)
                .map_err(|e| OpsError::collaborator("download", e))?;
        }
        info!(commit = %id, %kind, downloads = intents.len(), "Downloaded commit");
        Ok(intents)
    }

    /// Branch from `path` in the selected commit. `path` may be
    /// [`cad_history_tree::ENTIRE_PROJECT`].
    pub fn fork(
        &self,
        path: &str,
        branch_name: &str,
        creator: &dyn BranchCreator,
    ) -> OpsResult<BranchId> {
        let branch_name = validate_branch_name(branch_name)?;
        let id = self.selected_id()?;
        let intent = self.trees.request_fork(path);

        let branch = creator
            .create_branch(&id, &intent, branch_name)
            .map_err(|e| OpsError::collaborator("fork", e))?;
        info!(commit = %id, from = path, %branch, "Forked");
        Ok(branch)
    }

    pub fn preview(&self, renderer: &dyn PreviewRenderer) -> OpsResult<()> {
        let id = self.selected_id()?;
        renderer
            .render(&id)
            .map_err(|e| OpsError::collaborator("preview", e))
    }

    /// Link to the selected commit.
    pub fn share_link(&self) -> OpsResult<String> {
        let id = self.selected_id()?;
        Ok(format!(
            "{}/project/{}/commit/{}",
            self.config.share_base_url.trim_end_matches('/'),
            self.project.id,
            id
        ))
    }

    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary::new(&self.project, &self.graph)
    }
}

/// Trimmed branch name, if usable.
pub fn validate_branch_name(name: &str) -> OpsResult<&str> {
    let trimmed = name.trim();
    let invalid = |reason: &str| OpsError::InvalidBranchName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if trimmed.chars().count() > MAX_BRANCH_NAME_CHARS {
        return Err(invalid("must be at most 100 characters"));
    }
    Ok(trimmed)
}

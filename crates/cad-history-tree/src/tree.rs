//! Per-commit assembly trees and their shared expansion state.

use std::collections::{HashMap, HashSet};

use cad_history_core::{AssemblyNode, CommitId, HistoryError, HistoryResult};
use tracing::debug;

use crate::expansion::ExpansionState;
use crate::intent::{DownloadIntent, ForkIntent};
use crate::path::{path_of, segments, PATH_SEPARATOR};
use crate::traversal::VisibleNodes;

/// Assembly trees recorded per commit.
///
/// Trees are read-only after construction. The expansion state is owned here
/// rather than per tree, so it survives switching between commits.
#[derive(Debug, Clone, Default)]
pub struct AssemblyTree {
    trees: HashMap<CommitId, AssemblyNode>,
    expansion: ExpansionState,
}

impl AssemblyTree {
    /// Build from `(commit, root)` pairs, validating every tree.
    /// A commit id listed twice is rejected.
    pub fn new(trees: impl IntoIterator<Item = (CommitId, AssemblyNode)>) -> HistoryResult<Self> {
        let mut by_commit = HashMap::new();
        for (commit_id, root) in trees {
            validate(&root, "")?;
            if by_commit.contains_key(&commit_id) {
                return Err(HistoryError::DuplicateCommit { id: commit_id });
            }
            by_commit.insert(commit_id, root);
        }
        Ok(Self {
            trees: by_commit,
            expansion: ExpansionState::default(),
        })
    }

    /// Replace the expansion state.
    pub fn with_expansion(mut self, expansion: ExpansionState) -> Self {
        self.expansion = expansion;
        self
    }

    /// Root of the tree recorded for `commit_id`.
    pub fn load(&self, commit_id: &str) -> HistoryResult<&AssemblyNode> {
        self.trees
            .get(commit_id)
            .ok_or_else(|| HistoryError::TreeNotFound {
                commit_id: commit_id.into(),
            })
    }

    pub fn has_tree(&self, commit_id: &str) -> bool {
        self.trees.contains_key(commit_id)
    }

    /// Commits that have a recorded tree, sorted.
    pub fn commit_ids(&self) -> Vec<&CommitId> {
        let mut ids: Vec<_> = self.trees.keys().collect();
        ids.sort();
        ids
    }

    /// Path of `node` below `parent_path`.
    pub fn path_of(node: &AssemblyNode, parent_path: &str) -> String {
        path_of(node, parent_path)
    }

    /// Resolve a structural path inside a commit's tree.
    pub fn find(&self, commit_id: &str, path: &str) -> HistoryResult<&AssemblyNode> {
        let root = self.load(commit_id)?;
        let not_found = || HistoryError::NodeNotFound {
            commit_id: commit_id.into(),
            path: path.to_string(),
        };

        let mut names = segments(path);
        if names.next() != Some(root.name.as_str()) {
            return Err(not_found());
        }
        names.try_fold(root, |node, name| node.child(name).ok_or_else(not_found))
    }

    // =========================================================================
    // Expansion
    // =========================================================================

    /// Flip the expanded flag of `path`. Leaf paths toggle harmlessly.
    pub fn toggle(&mut self, path: &str) -> bool {
        let expanded = self.expansion.toggle(path);
        debug!(path, expanded, "Toggled node");
        expanded
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expansion.is_expanded(path)
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn expansion_mut(&mut self) -> &mut ExpansionState {
        &mut self.expansion
    }

    /// Expand every assembly in a commit's tree. Returns how many were expanded.
    pub fn expand_all(&mut self, commit_id: &str) -> HistoryResult<usize> {
        let mut paths = Vec::new();
        collect_assembly_paths(self.load(commit_id)?, "", &mut paths);
        for path in &paths {
            self.expansion.expand(path);
        }
        Ok(paths.len())
    }

    pub fn collapse_all(&mut self) {
        self.expansion.clear();
    }

    /// Visible `(node, path, depth)` entries of a commit's tree.
    pub fn visible(&self, commit_id: &str) -> HistoryResult<VisibleNodes<'_>> {
        Ok(VisibleNodes::new(self.load(commit_id)?, &self.expansion))
    }

    // =========================================================================
    // Intents
    // =========================================================================

    pub fn request_download(&self, node: &AssemblyNode, path: &str) -> DownloadIntent {
        debug!(path, kind = %node.kind, "Download requested");
        DownloadIntent::new(node.clone(), path)
    }

    pub fn request_fork(&self, path: &str) -> ForkIntent {
        debug!(path, "Fork requested");
        ForkIntent::new(path)
    }
}

fn validate(node: &AssemblyNode, parent_path: &str) -> HistoryResult<()> {
    let path = path_of(node, parent_path);

    if node.name.is_empty() || node.name.contains(PATH_SEPARATOR) {
        return Err(HistoryError::invalid_tree(
            path,
            format!("node names must be non-empty and free of '{PATH_SEPARATOR}'"),
        ));
    }
    if node.is_part() && node.has_children() {
        return Err(HistoryError::invalid_tree(path, "parts cannot have children"));
    }

    let mut names = HashSet::new();
    for child in &node.children {
        if !names.insert(child.name.as_str()) {
            return Err(HistoryError::invalid_tree(
                path,
                format!("duplicate child name {}", child.name),
            ));
        }
        validate(child, &path)?;
    }
    Ok(())
}

fn collect_assembly_paths(node: &AssemblyNode, parent_path: &str, out: &mut Vec<String>) {
    if !node.has_children() {
        return;
    }
    let path = path_of(node, parent_path);
    for child in &node.children {
        collect_assembly_paths(child, &path, out);
    }
    out.push(path);
}

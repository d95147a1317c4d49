//! The commit DAG, its edges and the selection state.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use cad_history_core::{Branch, BranchId, Commit, CommitId, HistoryError, HistoryResult};
use petgraph::algo::toposort;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::curve::EdgeCurve;
use crate::layout::{LaneLayout, LaneLayoutConfig};
use crate::marker::CommitMarker;
use crate::palette::BranchPalette;

/// How missing parent references are handled at load time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPolicy {
    /// Fail with `DanglingParent`.
    #[default]
    Strict,
    /// Log, record the reference in `dangling_parents()` and draw no edge.
    Lenient,
}

/// Where commit positions come from.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PositionSource {
    /// Keep the positions supplied by the data source.
    #[default]
    Supplied,
    /// Replace them with a lane layout computed at load time.
    Computed(LaneLayoutConfig),
}

/// Options for [`CommitGraph::load_with`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOptions {
    pub policy: LoadPolicy,
    pub positions: PositionSource,
}

impl LoadOptions {
    pub fn lenient(mut self) -> Self {
        self.policy = LoadPolicy::Lenient;
        self
    }

    pub fn computed(mut self, config: LaneLayoutConfig) -> Self {
        self.positions = PositionSource::Computed(config);
        self
    }
}

/// A parent reference that does not resolve inside the commit set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingParent {
    pub commit: CommitId,
    pub parent: CommitId,
}

/// A directed `(parent, child)` edge with its geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitEdge {
    pub parent: CommitId,
    pub child: CommitId,
    /// Color of the child's branch.
    pub color: String,
    pub curve: EdgeCurve,
}

/// Drawing surface needed to show every commit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

/// The commit DAG of a project view.
///
/// The commit set is fixed once loaded; only the selection changes.
#[derive(Debug, Clone, Default)]
pub struct CommitGraph {
    commits: Vec<Commit>,
    index: HashMap<CommitId, usize>,
    children: Vec<Vec<usize>>,
    order: Vec<usize>,
    palette: BranchPalette,
    dangling: Vec<DanglingParent>,
    selected: Option<CommitId>,
}

impl CommitGraph {
    /// Load a commit set with strict integrity checks and supplied positions.
    pub fn load(commits: Vec<Commit>, branches: &[Branch]) -> HistoryResult<Self> {
        Self::load_with(commits, branches, LoadOptions::default())
    }

    /// Load a commit set.
    ///
    /// Duplicate ids and cycles always fail. Repeated parent ids within one
    /// commit collapse to their first occurrence.
    pub fn load_with(
        mut commits: Vec<Commit>,
        branches: &[Branch],
        options: LoadOptions,
    ) -> HistoryResult<Self> {
        let mut index = HashMap::with_capacity(commits.len());
        for (idx, commit) in commits.iter().enumerate() {
            if index.insert(commit.id.clone(), idx).is_some() {
                return Err(HistoryError::DuplicateCommit {
                    id: commit.id.clone(),
                });
            }
        }

        let mut dangling = Vec::new();
        for commit in &mut commits {
            let mut seen = HashSet::new();
            commit.parents.retain(|parent| seen.insert(parent.clone()));

            for parent in &commit.parents {
                if index.contains_key(parent) {
                    continue;
                }
                match options.policy {
                    LoadPolicy::Strict => {
                        return Err(HistoryError::DanglingParent {
                            commit: commit.id.clone(),
                            parent: parent.clone(),
                        });
                    }
                    LoadPolicy::Lenient => {
                        warn!(commit = %commit.id, parent = %parent, "Skipping edge to missing parent");
                        dangling.push(DanglingParent {
                            commit: commit.id.clone(),
                            parent: parent.clone(),
                        });
                    }
                }
            }
        }

        let mut children = vec![Vec::new(); commits.len()];
        for (idx, commit) in commits.iter().enumerate() {
            for parent in &commit.parents {
                if let Some(&parent_idx) = index.get(parent) {
                    children[parent_idx].push(idx);
                }
            }
        }

        let mut graph = Self {
            commits,
            index,
            children,
            order: Vec::new(),
            palette: BranchPalette::new(branches),
            dangling,
            selected: None,
        };

        graph.check_acyclic()?;
        graph.order = graph.stable_topological_order();

        if let PositionSource::Computed(config) = &options.positions {
            let layout = LaneLayout::compute(graph.order.iter().map(|&i| &graph.commits[i]), config);
            for commit in &mut graph.commits {
                if let Some(position) = layout.position_of(commit.id.as_str()) {
                    commit.position = position;
                }
            }
        }

        let mut unknown: Vec<&BranchId> = Vec::new();
        for commit in &graph.commits {
            if !graph.palette.contains(&commit.branch) && !unknown.contains(&&commit.branch) {
                warn!(branch = %commit.branch, "Commits reference an unknown branch");
                unknown.push(&commit.branch);
            }
        }

        debug!(
            commits = graph.commits.len(),
            dangling = graph.dangling.len(),
            "Loaded commit graph"
        );
        Ok(graph)
    }

    fn check_acyclic(&self) -> HistoryResult<()> {
        let (graph, _) = self.to_petgraph();
        toposort(&graph, None)
            .map(|_| ())
            .map_err(|cycle| HistoryError::CycleDetected {
                commit: graph[cycle.node_id()].id.clone(),
            })
    }

    /// Kahn's algorithm, breaking ties by input order.
    fn stable_topological_order(&self) -> Vec<usize> {
        let mut in_degree: Vec<usize> = self
            .commits
            .iter()
            .map(|c| {
                c.parents
                    .iter()
                    .filter(|p| self.index.contains_key(*p))
                    .count()
            })
            .collect();

        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree == 0)
            .map(|(idx, _)| Reverse(idx))
            .collect();

        let mut order = Vec::with_capacity(self.commits.len());
        while let Some(Reverse(idx)) = ready.pop() {
            order.push(idx);
            for &child in &self.children[idx] {
                in_degree[child] -= 1;
                if in_degree[child] == 0 {
                    ready.push(Reverse(child));
                }
            }
        }
        order
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Commits in load order.
    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn commit(&self, id: &str) -> Option<&Commit> {
        self.index.get(id).map(|&idx| &self.commits[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    fn require(&self, id: &str) -> HistoryResult<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| HistoryError::CommitNotFound { id: id.into() })
    }

    /// Resolved parents of a commit, in declared order.
    pub fn parents_of(&self, id: &str) -> HistoryResult<Vec<&Commit>> {
        let idx = self.require(id)?;
        Ok(self.commits[idx]
            .parents
            .iter()
            .filter_map(|p| self.commit(p.as_str()))
            .collect())
    }

    /// Direct descendants of a commit, in load order.
    pub fn children_of(&self, id: &str) -> HistoryResult<Vec<&Commit>> {
        let idx = self.require(id)?;
        Ok(self.children[idx]
            .iter()
            .map(|&child| &self.commits[child])
            .collect())
    }

    /// Commits with no parents.
    pub fn roots(&self) -> impl Iterator<Item = &Commit> {
        self.commits.iter().filter(|c| c.is_root())
    }

    /// Commits with no children.
    pub fn heads(&self) -> impl Iterator<Item = &Commit> {
        self.commits
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.children[*idx].is_empty())
            .map(|(_, commit)| commit)
    }

    /// Parents before children; ties keep load order.
    pub fn topological_order(&self) -> impl Iterator<Item = &Commit> {
        self.order.iter().map(|&idx| &self.commits[idx])
    }

    /// Commits sorted by timestamp for display, ties keeping load order.
    pub fn by_timestamp(&self) -> Vec<&Commit> {
        let mut commits: Vec<&Commit> = self.commits.iter().collect();
        commits.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        commits
    }

    /// References skipped under [`LoadPolicy::Lenient`].
    pub fn dangling_parents(&self) -> &[DanglingParent] {
        &self.dangling
    }

    // =========================================================================
    // Edges and Colors
    // =========================================================================

    /// One edge per resolvable parent of `commit`, colored by `commit`'s branch.
    pub fn edges_of(&self, commit: &Commit) -> Vec<CommitEdge> {
        let color = self.palette.color_of(&commit.branch);
        commit
            .parents
            .iter()
            .filter_map(|parent_id| self.commit(parent_id.as_str()))
            .map(|parent| CommitEdge {
                parent: parent.id.clone(),
                child: commit.id.clone(),
                color: color.to_string(),
                curve: EdgeCurve::between(parent.position, commit.position),
            })
            .collect()
    }

    /// Edges leading into the commit with the given id.
    pub fn edges_of_id(&self, id: &str) -> HistoryResult<Vec<CommitEdge>> {
        let idx = self.require(id)?;
        Ok(self.edges_of(&self.commits[idx]))
    }

    /// Every edge in the graph, grouped by child in load order.
    pub fn edges(&self) -> Vec<CommitEdge> {
        self.commits.iter().flat_map(|c| self.edges_of(c)).collect()
    }

    pub fn color_of(&self, branch: &BranchId) -> &str {
        self.palette.color_of(branch)
    }

    pub fn palette(&self) -> &BranchPalette {
        &self.palette
    }

    /// Largest coordinates plus `margin`, anchored at the origin.
    pub fn bounds(&self, margin: f64) -> Bounds {
        let (max_x, max_y) = self.commits.iter().fold((0.0_f64, 0.0_f64), |(x, y), c| {
            (x.max(c.position.x), y.max(c.position.y))
        });
        Bounds {
            width: max_x + margin,
            height: max_y + margin,
        }
    }

    /// Marker hints for every commit, in load order.
    pub fn markers(&self) -> Vec<CommitMarker> {
        self.commits
            .iter()
            .map(|c| {
                let selected = self.selected.as_ref() == Some(&c.id);
                CommitMarker::for_commit(c, self.palette.color_of(&c.branch), selected)
            })
            .collect()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select a commit. Unknown ids fail and keep the previous selection.
    pub fn select(&mut self, id: &str) -> HistoryResult<()> {
        let idx = self.require(id)?;
        if self.selected.as_ref().map(CommitId::as_str) == Some(id) {
            return Ok(());
        }
        debug!(commit = %id, "Selected commit");
        self.selected = Some(self.commits[idx].id.clone());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&CommitId> {
        self.selected.as_ref()
    }

    pub fn current_commit(&self) -> Option<&Commit> {
        self.selected
            .as_ref()
            .and_then(|id| self.commit(id.as_str()))
    }

    /// Convert to petgraph StableDiGraph for analysis.
    /// Edges point from parent to child and carry the child's branch.
    pub fn to_petgraph(&self) -> (StableDiGraph<Commit, BranchId>, HashMap<CommitId, NodeIndex>) {
        let mut graph = StableDiGraph::new();
        let mut id_to_index = HashMap::new();

        for commit in &self.commits {
            let idx = graph.add_node(commit.clone());
            id_to_index.insert(commit.id.clone(), idx);
        }

        for commit in &self.commits {
            for parent in &commit.parents {
                if let (Some(&from), Some(&to)) =
                    (id_to_index.get(parent), id_to_index.get(&commit.id))
                {
                    graph.add_edge(from, to, commit.branch.clone());
                }
            }
        }

        (graph, id_to_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear() -> Vec<Commit> {
        vec![
            Commit::new("a", "root", "main").positioned(50.0, 50.0),
            Commit::new("b", "second", "main")
                .positioned(150.0, 50.0)
                .child_of("a"),
        ]
    }

    #[test]
    fn test_load_rejects_duplicate_ids() {
        let mut commits = linear();
        commits.push(Commit::new("a", "again", "main"));

        let err = CommitGraph::load(commits, &[]).unwrap_err();
        assert_eq!(
            err,
            HistoryError::DuplicateCommit {
                id: CommitId::new("a")
            }
        );
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let commits = vec![Commit::new("a", "loop", "main").child_of("a")];
        let err = CommitGraph::load(commits, &[]).unwrap_err();
        assert!(matches!(err, HistoryError::CycleDetected { .. }));
    }

    #[test]
    fn test_repeated_parent_yields_single_edge() {
        let mut commits = linear();
        commits[1].parents.push(CommitId::new("a"));

        let graph = CommitGraph::load(commits, &[]).unwrap();
        assert_eq!(graph.edges().len(), 1);
    }

    #[test]
    fn test_reselect_is_noop() {
        let mut graph = CommitGraph::load(linear(), &[]).unwrap();
        graph.select("b").unwrap();
        graph.select("b").unwrap();
        assert_eq!(graph.selected_id(), Some(&CommitId::new("b")));

        graph.clear_selection();
        assert!(graph.current_commit().is_none());
    }

    #[test]
    fn test_heads_and_roots() {
        let graph = CommitGraph::load(linear(), &[]).unwrap();
        let roots: Vec<_> = graph.roots().map(|c| c.id.as_str()).collect();
        let heads: Vec<_> = graph.heads().map(|c| c.id.as_str()).collect();
        assert_eq!(roots, vec!["a"]);
        assert_eq!(heads, vec!["b"]);
    }

    #[test]
    fn test_bounds_of_empty_graph() {
        let graph = CommitGraph::load(Vec::new(), &[]).unwrap();
        assert_eq!(
            graph.bounds(100.0),
            Bounds {
                width: 100.0,
                height: 100.0
            }
        );
        assert!(graph.is_empty());
        assert!(graph.current_commit().is_none());
    }
}

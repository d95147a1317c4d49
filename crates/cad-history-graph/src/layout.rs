//! Computed lane layout for commit graphs.
//!
//! Each commit gets a column from its topological generation and a row from
//! the lane of its branch. Lanes are handed out in the order branches first
//! appear while walking the commits in topological order, so the trunk takes
//! lane 0 and every divergent branch takes the next free lane.

use std::collections::HashMap;

use cad_history_core::{BranchId, Commit, CommitId, Position};
use serde::{Deserialize, Serialize};

/// Parameters for the lane layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneLayoutConfig {
    /// X coordinate of generation 0.
    pub origin_x: f64,
    /// Y coordinate of lane 0.
    pub origin_y: f64,
    /// Horizontal distance between generations.
    pub column_spacing: f64,
    /// Vertical distance between lanes.
    pub lane_spacing: f64,
}

impl Default for LaneLayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 50.0,
            origin_y: 50.0,
            column_spacing: 100.0,
            lane_spacing: 70.0,
        }
    }
}

/// Result of a lane layout pass.
#[derive(Debug, Clone, Default)]
pub struct LaneLayout {
    positions: HashMap<CommitId, Position>,
    generations: HashMap<CommitId, usize>,
    lanes: Vec<BranchId>,
}

impl LaneLayout {
    /// Lay out commits supplied in topological order (parents first).
    ///
    /// Parents that never appear in `ordered` are ignored, so a commit whose
    /// only parents are missing is placed in generation 0.
    pub fn compute<'a>(
        ordered: impl IntoIterator<Item = &'a Commit>,
        config: &LaneLayoutConfig,
    ) -> Self {
        let mut layout = Self::default();

        for commit in ordered {
            let generation = commit
                .parents
                .iter()
                .filter_map(|parent| layout.generations.get(parent))
                .map(|g| g + 1)
                .max()
                .unwrap_or(0);

            let lane = match layout.lanes.iter().position(|b| *b == commit.branch) {
                Some(lane) => lane,
                None => {
                    layout.lanes.push(commit.branch.clone());
                    layout.lanes.len() - 1
                }
            };

            layout.generations.insert(commit.id.clone(), generation);
            layout.positions.insert(
                commit.id.clone(),
                Position::new(
                    config.origin_x + generation as f64 * config.column_spacing,
                    config.origin_y + lane as f64 * config.lane_spacing,
                ),
            );
        }

        layout
    }

    pub fn position_of(&self, commit: &str) -> Option<Position> {
        self.positions.get(commit).copied()
    }

    /// Longest distance from a root commit.
    pub fn generation_of(&self, commit: &str) -> Option<usize> {
        self.generations.get(commit).copied()
    }

    pub fn lane_of(&self, branch: &BranchId) -> Option<usize> {
        self.lanes.iter().position(|b| b == branch)
    }

    /// Branches in lane order.
    pub fn lanes(&self) -> &[BranchId] {
        &self.lanes
    }
}

//! Per-commit marker hints for the rendering layer.

use cad_history_core::{Commit, CommitId, Position};
use serde::Serialize;

/// Radius of an unselected commit marker.
pub const MARKER_RADIUS: f64 = 10.0;

/// Radius of the selected commit marker.
pub const SELECTED_MARKER_RADIUS: f64 = 14.0;

/// Maximum message characters shown in a marker label.
pub const LABEL_MAX_CHARS: usize = 20;

/// How a single commit should be drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitMarker {
    pub commit: CommitId,
    pub center: Position,
    pub radius: f64,
    /// Branch color of the commit.
    pub fill: String,
    pub selected: bool,
    /// Truncated message, only present on the selected commit.
    pub label: Option<String>,
}

impl CommitMarker {
    pub fn for_commit(commit: &Commit, fill: &str, selected: bool) -> Self {
        Self {
            commit: commit.id.clone(),
            center: commit.position,
            radius: if selected {
                SELECTED_MARKER_RADIUS
            } else {
                MARKER_RADIUS
            },
            fill: fill.to_string(),
            selected,
            label: selected.then(|| commit.summary(LABEL_MAX_CHARS)),
        }
    }
}

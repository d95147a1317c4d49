//! Branch id to display color resolution.

use std::collections::HashMap;

use cad_history_core::{Branch, BranchId, NEUTRAL_COLOR};
use tracing::{debug, warn};

/// Display colors keyed by branch.
///
/// Lookups match the branch id first and fall back to the branch display
/// name, since some data sources record commits against branch names.
#[derive(Debug, Clone, Default)]
pub struct BranchPalette {
    by_id: HashMap<BranchId, String>,
    by_name: HashMap<String, String>,
}

impl BranchPalette {
    /// Build a palette from a branch set.
    ///
    /// The result does not depend on the order of `branches`: when two entries
    /// share an id, the lexicographically smallest color wins.
    pub fn new(branches: &[Branch]) -> Self {
        let mut by_id: HashMap<BranchId, String> = HashMap::new();
        let mut by_name: HashMap<String, String> = HashMap::new();

        for branch in branches {
            if let Some(existing) = by_id.get_mut(&branch.id) {
                warn!(branch = %branch.id, "Duplicate branch id in branch set");
                if branch.color < *existing {
                    *existing = branch.color.clone();
                }
                continue;
            }
            by_id.insert(branch.id.clone(), branch.color.clone());
        }

        for branch in branches {
            let color = by_id
                .get(&branch.id)
                .cloned()
                .unwrap_or_else(|| branch.color.clone());
            by_name
                .entry(branch.name.clone())
                .and_modify(|existing| {
                    if color < *existing {
                        *existing = color.clone();
                    }
                })
                .or_insert(color);
        }

        Self { by_id, by_name }
    }

    /// Whether the branch resolves to a declared color.
    pub fn contains(&self, branch: &BranchId) -> bool {
        self.by_id.contains_key(branch) || self.by_name.contains_key(branch.as_str())
    }

    /// Resolve a branch to its color, falling back to [`NEUTRAL_COLOR`].
    pub fn color_of(&self, branch: &BranchId) -> &str {
        if let Some(color) = self.by_id.get(branch) {
            return color;
        }
        if let Some(color) = self.by_name.get(branch.as_str()) {
            return color;
        }
        debug!(branch = %branch, "Unknown branch, using neutral color");
        NEUTRAL_COLOR
    }

    /// Number of distinct branch ids.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

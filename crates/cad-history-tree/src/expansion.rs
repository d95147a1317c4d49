//! Path-keyed expand/collapse state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Expanded flags keyed by structural path. Unseen paths are collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionState {
    flags: BTreeMap<String, bool>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given paths expanded.
    pub fn with_expanded<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            flags: paths.into_iter().map(|p| (p.into(), true)).collect(),
        }
    }

    /// Flip the flag for `path` and return the new value.
    pub fn toggle(&mut self, path: &str) -> bool {
        let flag = self.flags.entry(path.to_string()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.flags.get(path).copied().unwrap_or(false)
    }

    pub fn set(&mut self, path: &str, expanded: bool) {
        self.flags.insert(path.to_string(), expanded);
    }

    pub fn expand(&mut self, path: &str) {
        self.set(path, true);
    }

    pub fn collapse(&mut self, path: &str) {
        self.set(path, false);
    }

    /// Forget every flag.
    pub fn clear(&mut self) {
        self.flags.clear();
    }

    /// Expanded paths in lexicographic order.
    pub fn expanded_paths(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter(|(_, expanded)| **expanded)
            .map(|(path, _)| path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_collapsed() {
        let state = ExpansionState::new();
        assert!(!state.is_expanded("Root"));
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut state = ExpansionState::new();
        assert!(state.toggle("Root"));
        assert!(state.is_expanded("Root"));
        assert!(!state.toggle("Root"));
        assert!(!state.is_expanded("Root"));

        let mut seeded = ExpansionState::with_expanded(["Root"]);
        seeded.toggle("Root");
        seeded.toggle("Root");
        assert!(seeded.is_expanded("Root"));
    }

    #[test]
    fn test_expanded_paths_and_serde() {
        let mut state = ExpansionState::with_expanded(["B", "A"]);
        state.collapse("B");

        let paths: Vec<_> = state.expanded_paths().collect();
        assert_eq!(paths, vec!["A"]);

        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"A":true,"B":false}"#);
    }
}

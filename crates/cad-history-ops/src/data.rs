//! JSON project data: metadata, commits and per-commit assembly trees.

use std::collections::BTreeMap;
use std::path::Path;

use cad_history_core::{AssemblyNode, Commit, CommitId, Project};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{OpsError, OpsResult};

/// Everything a browsing session is opened from.
///
/// ```json
/// {
///   "project": { "id": "proj-1", "name": "...", "branches": [ ... ] },
///   "commits": [ { "id": "commit-1", "x": 50, "y": 50, "parents": [], ... } ],
///   "trees": { "commit-1": { "name": "Arm.SLDASM", "type": "assembly", ... } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    pub project: Project,
    pub commits: Vec<Commit>,
    #[serde(default)]
    pub trees: BTreeMap<CommitId, AssemblyNode>,
}

impl ProjectData {
    /// Read project data from a JSON file.
    pub fn from_path(path: &Path) -> OpsResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| OpsError::data_source(path, e.to_string()))?;
        let data =
            Self::from_json(&contents).map_err(|e| OpsError::data_source(path, e.to_string()))?;
        info!(
            path = %path.display(),
            commits = data.commits.len(),
            trees = data.trees.len(),
            "Loaded project data"
        );
        Ok(data)
    }

    pub fn from_json(json: &str) -> OpsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> OpsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Data named by `config.data_path`, or the built-in sample.
    pub fn load(config: &Config) -> OpsResult<Self> {
        match &config.data_path {
            Some(path) => Self::from_path(path),
            None => {
                debug!("No data path configured, using sample project");
                Ok(Self::sample())
            }
        }
    }
}

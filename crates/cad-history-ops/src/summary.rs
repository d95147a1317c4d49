//! Project overview figures.

use std::collections::BTreeSet;

use cad_history_core::{BranchId, Project};
use cad_history_graph::CommitGraph;
use serde::{Deserialize, Serialize};

/// Per-branch commit counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSummary {
    pub id: BranchId,
    pub name: String,
    pub color: String,
    /// Count recorded in the project metadata.
    pub declared_commits: u32,
    /// Commits in the loaded set whose branch matches this id or name.
    pub actual_commits: usize,
}

/// Overview of a project's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub project_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub total_commits: usize,
    /// Distinct authors, sorted.
    pub contributors: Vec<String>,
    /// Latest commit timestamp. ISO-8601 strings compare chronologically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    pub branches: Vec<BranchSummary>,
}

impl ProjectSummary {
    pub fn new(project: &Project, graph: &CommitGraph) -> Self {
        let commits = graph.commits();

        let contributors: BTreeSet<&str> = commits
            .iter()
            .map(|c| c.author.as_str())
            .filter(|a| !a.is_empty())
            .collect();

        let last_modified = commits
            .iter()
            .map(|c| c.timestamp.as_str())
            .filter(|t| !t.is_empty())
            .max()
            .map(str::to_string);

        let branches = project
            .branches
            .iter()
            .map(|branch| BranchSummary {
                id: branch.id.clone(),
                name: branch.name.clone(),
                color: branch.color.clone(),
                declared_commits: branch.commit_count,
                actual_commits: commits
                    .iter()
                    .filter(|c| c.branch == branch.id || c.branch.as_str() == branch.name)
                    .count(),
            })
            .collect();

        Self {
            project_id: project.id.clone(),
            name: project.name.clone(),
            description: project.description.clone(),
            total_commits: commits.len(),
            contributors: contributors.into_iter().map(str::to_string).collect(),
            last_modified,
            branches,
        }
    }
}

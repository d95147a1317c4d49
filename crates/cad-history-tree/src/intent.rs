//! Value objects describing node actions for external collaborators.

use cad_history_core::{AssemblyKind, AssemblyNode};
use humansize::{format_size, DECIMAL};
use serde::{Deserialize, Serialize};

use crate::path::path_of;

/// Fork scope meaning the whole project rather than a node path.
pub const ENTIRE_PROJECT: &str = "entire-project";

/// What a download covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadScope {
    /// A single part file.
    Part,
    /// An assembly and everything below it.
    Subtree,
}

/// One part file covered by a download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadFile {
    pub path: String,
    pub name: String,
    pub size: Option<String>,
}

/// Request to fetch a node, handed to the file-transfer collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadIntent {
    pub node: AssemblyNode,
    /// Structural path of `node`, verbatim from the caller.
    pub path: String,
}

impl DownloadIntent {
    pub fn new(node: AssemblyNode, path: impl Into<String>) -> Self {
        Self {
            node,
            path: path.into(),
        }
    }

    pub fn scope(&self) -> DownloadScope {
        match self.node.kind {
            AssemblyKind::Part => DownloadScope::Part,
            AssemblyKind::Assembly => DownloadScope::Subtree,
        }
    }

    /// Every part file the download covers, in pre-order.
    pub fn files(&self) -> Vec<DownloadFile> {
        let mut files = Vec::new();
        collect_parts(&self.node, &self.path, &mut files);
        files
    }

    pub fn total_size_bytes(&self) -> u64 {
        self.node.total_size_bytes()
    }

    /// Human readable total size.
    pub fn total_size(&self) -> String {
        format_size(self.total_size_bytes(), DECIMAL)
    }
}

fn collect_parts(node: &AssemblyNode, path: &str, out: &mut Vec<DownloadFile>) {
    if node.is_part() {
        out.push(DownloadFile {
            path: path.to_string(),
            name: node.name.clone(),
            size: node.size.clone(),
        });
        return;
    }
    for child in &node.children {
        collect_parts(child, &path_of(child, path), out);
    }
}

/// Request to branch from a point in the current commit's tree.
///
/// The path is opaque: it may name a node or be [`ENTIRE_PROJECT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkIntent {
    pub path: String,
}

impl ForkIntent {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn entire_project() -> Self {
        Self::new(ENTIRE_PROJECT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gripper() -> AssemblyNode {
        AssemblyNode::assembly(
            "Gripper_Assembly.SLDASM",
            vec![
                AssemblyNode::part("Gripper_Base.SLDPRT", Some("1.5 MB")),
                AssemblyNode::assembly(
                    "Jaws.SLDASM",
                    vec![
                        AssemblyNode::part("Jaw_Left.SLDPRT", Some("1.2 MB")),
                        AssemblyNode::part("Jaw_Right.SLDPRT", Some("1.2 MB")),
                    ],
                ),
                AssemblyNode::part("Spring.SLDPRT", None),
            ],
        )
    }

    #[test]
    fn test_subtree_download_lists_parts() {
        let intent = DownloadIntent::new(gripper(), "Arm/Gripper_Assembly.SLDASM");

        assert_eq!(intent.scope(), DownloadScope::Subtree);
        let paths: Vec<_> = intent.files().into_iter().map(|f| f.path).collect();
        assert_eq!(
            paths,
            vec![
                "Arm/Gripper_Assembly.SLDASM/Gripper_Base.SLDPRT",
                "Arm/Gripper_Assembly.SLDASM/Jaws.SLDASM/Jaw_Left.SLDPRT",
                "Arm/Gripper_Assembly.SLDASM/Jaws.SLDASM/Jaw_Right.SLDPRT",
                "Arm/Gripper_Assembly.SLDASM/Spring.SLDPRT",
            ]
        );
        assert_eq!(intent.total_size_bytes(), 3_900_000);
        assert!(intent.total_size().ends_with("MB"));
    }

    #[test]
    fn test_part_download_covers_itself() {
        let part = AssemblyNode::part("Leaf.SLDPRT", Some("1.2 MB"));
        let intent = DownloadIntent::new(part, "Root/Leaf.SLDPRT");

        assert_eq!(intent.scope(), DownloadScope::Part);
        assert_eq!(
            intent.files(),
            vec![DownloadFile {
                path: "Root/Leaf.SLDPRT".to_string(),
                name: "Leaf.SLDPRT".to_string(),
                size: Some("1.2 MB".to_string()),
            }]
        );
    }

    #[test]
    fn test_fork_sentinel() {
        assert_eq!(ForkIntent::entire_project().path, ENTIRE_PROJECT);
    }
}

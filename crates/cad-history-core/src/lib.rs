//! Core domain types shared across the cad-history workspace.
//!
//! The model has two halves: the commit history of a project (`Commit`,
//! `Branch`, `Project`) and the part/assembly breakdown recorded for a commit
//! (`AssemblyNode`). Both are plain data supplied by a data source and treated
//! as read-only inputs for a browsing session.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

mod error;

pub use error::{HistoryError, HistoryResult};

/// Color assigned to branches that do not declare one.
pub const DEFAULT_BRANCH_COLOR: &str = "#3b82f6";

/// Color used when a branch id cannot be resolved.
pub const NEUTRAL_COLOR: &str = "#6b7280";

// =============================================================================
// Identifiers
// =============================================================================

/// Opaque, stable identifier of a commit.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(pub String);

impl CommitId {
    /// Wrap a raw id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The trailing eight characters, used as a compact display form.
    pub fn short(&self) -> &str {
        let start = self
            .0
            .char_indices()
            .rev()
            .nth(7)
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        &self.0[start..]
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for CommitId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CommitId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CommitId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of a branch.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchId(pub String);

impl BranchId {
    /// Wrap a raw id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for BranchId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BranchId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BranchId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// =============================================================================
// Commit History
// =============================================================================

/// A 2-D coordinate in graph space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An immutable record of one design snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    /// Unique identifier.
    pub id: CommitId,
    /// Free-text description.
    pub message: String,
    /// ISO-8601 timestamp, used for display ordering only.
    pub timestamp: String,
    /// Free-text author identifier.
    pub author: String,
    /// Branch the commit is recorded on. Coloring only, not topology.
    pub branch: BranchId,
    /// Position in graph space (`x`/`y` on the wire).
    #[serde(flatten)]
    pub position: Position,
    /// Direct ancestors. Empty for a root commit.
    #[serde(default)]
    pub parents: Vec<CommitId>,
}

impl Commit {
    /// Create a root commit at the origin.
    pub fn new(
        id: impl Into<CommitId>,
        message: impl Into<String>,
        branch: impl Into<BranchId>,
    ) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            timestamp: String::new(),
            author: String::new(),
            branch: branch.into(),
            position: Position::default(),
            parents: Vec::new(),
        }
    }

    /// Set the author.
    pub fn by(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the timestamp.
    pub fn at(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Set the supplied position.
    pub fn positioned(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// Add a parent link.
    pub fn child_of(mut self, parent: impl Into<CommitId>) -> Self {
        self.parents.push(parent.into());
        self
    }

    /// Whether the commit has no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Whether the commit descends from more than one parent.
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// The message cut to `max_chars` characters, with `...` appended when cut.
    pub fn summary(&self, max_chars: usize) -> String {
        if self.message.chars().count() > max_chars {
            let cut: String = self.message.chars().take(max_chars).collect();
            format!("{cut}...")
        } else {
            self.message.clone()
        }
    }
}

fn default_branch_color() -> String {
    DEFAULT_BRANCH_COLOR.to_string()
}

/// A named lineage of commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    /// Display name, distinct from the id.
    pub name: String,
    /// Informational only; never reconciled with the actual commit set.
    #[serde(rename = "commitCount", default)]
    pub commit_count: u32,
    /// Unique visual key.
    #[serde(default = "default_branch_color")]
    pub color: String,
}

impl Branch {
    pub fn new(id: impl Into<BranchId>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            commit_count: 0,
            color: color.into(),
        }
    }

    /// Set the declared commit count.
    pub fn with_commit_count(mut self, count: u32) -> Self {
        self.commit_count = count;
        self
    }
}

/// Project metadata owning the branch set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub branches: Vec<Branch>,
}

// =============================================================================
// Assembly Breakdown
// =============================================================================

/// Kind of node in an assembly breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssemblyKind {
    /// A sub-assembly that groups other nodes.
    Assembly,
    /// A single part; always a leaf.
    Part,
}

impl AssemblyKind {
    pub fn label(&self) -> &'static str {
        match self {
            AssemblyKind::Assembly => "assembly",
            AssemblyKind::Part => "part",
        }
    }
}

impl fmt::Display for AssemblyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One part or sub-assembly in a CAD breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyNode {
    /// File-name-like identifier, unique among siblings.
    pub name: String,
    /// Part or assembly (`type` on the wire).
    #[serde(rename = "type")]
    pub kind: AssemblyKind,
    /// Ordered children; empty for parts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AssemblyNode>,
    /// Display size such as `"2.4 MB"`; meaningful for parts only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl AssemblyNode {
    /// Create a part leaf.
    pub fn part(name: impl Into<String>, size: Option<&str>) -> Self {
        Self {
            name: name.into(),
            kind: AssemblyKind::Part,
            children: Vec::new(),
            size: size.map(str::to_string),
        }
    }

    /// Create an assembly with the given children.
    pub fn assembly(name: impl Into<String>, children: Vec<AssemblyNode>) -> Self {
        Self {
            name: name.into(),
            kind: AssemblyKind::Assembly,
            children,
            size: None,
        }
    }

    pub fn is_part(&self) -> bool {
        self.kind == AssemblyKind::Part
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&AssemblyNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Number of parts in this subtree, including the node itself.
    pub fn part_count(&self) -> usize {
        if self.is_part() {
            1
        } else {
            self.children.iter().map(AssemblyNode::part_count).sum()
        }
    }

    /// Size of this node in bytes, if it carries a parseable size.
    pub fn size_bytes(&self) -> Option<u64> {
        self.size.as_deref().and_then(parse_size)
    }

    /// Sum of part sizes in this subtree. Parts without a size count as zero.
    /// Saturates at `u64::MAX`.
    pub fn total_size_bytes(&self) -> u64 {
        if self.is_part() {
            self.size_bytes().unwrap_or(0)
        } else {
            self.children
                .iter()
                .map(AssemblyNode::total_size_bytes)
                .fold(0, u64::saturating_add)
        }
    }
}

/// Parse a decimal display size such as `"2.4 MB"` into bytes.
pub fn parse_size(text: &str) -> Option<u64> {
    let text = text.trim();
    let split = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(split);
    let value: f64 = number.parse().ok()?;

    let multiplier = match unit.trim().to_ascii_lowercase().as_str() {
        "" | "b" => 1.0,
        "kb" => 1e3,
        "mb" => 1e6,
        "gb" => 1e9,
        "tb" => 1e12,
        _ => return None,
    };

    Some((value * multiplier).round() as u64)
}

//! Lazy pre-order walk over the visible part of an assembly tree.

use cad_history_core::AssemblyNode;

use crate::expansion::ExpansionState;
use crate::path::path_of;

/// A node that is currently visible, with its path and depth (root = 0).
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleNode<'a> {
    pub node: &'a AssemblyNode,
    pub path: String,
    pub depth: usize,
}

/// Pre-order depth-first iterator that only descends into expanded nodes.
///
/// A node's children are visited only when the node's own path is expanded,
/// so collapsing an ancestor hides every descendant regardless of their
/// flags. The iterator borrows the expansion state and is rebuilt per call.
#[derive(Debug, Clone)]
pub struct VisibleNodes<'a> {
    stack: Vec<(&'a AssemblyNode, String, usize)>,
    expansion: &'a ExpansionState,
}

impl<'a> VisibleNodes<'a> {
    pub fn new(root: &'a AssemblyNode, expansion: &'a ExpansionState) -> Self {
        Self {
            stack: vec![(root, path_of(root, ""), 0)],
            expansion,
        }
    }
}

impl<'a> Iterator for VisibleNodes<'a> {
    type Item = VisibleNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, path, depth) = self.stack.pop()?;

        if node.has_children() && self.expansion.is_expanded(&path) {
            for child in node.children.iter().rev() {
                self.stack.push((child, path_of(child, &path), depth + 1));
            }
        }

        Some(VisibleNode { node, path, depth })
    }
}

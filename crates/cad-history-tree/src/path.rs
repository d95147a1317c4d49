//! Structural paths: node names from the root joined by [`PATH_SEPARATOR`].

use cad_history_core::AssemblyNode;

pub const PATH_SEPARATOR: char = '/';

/// Full path of `node` given the path of its parent (empty for the root).
pub fn path_of(node: &AssemblyNode, parent_path: &str) -> String {
    if parent_path.is_empty() {
        node.name.clone()
    } else {
        format!("{parent_path}{PATH_SEPARATOR}{}", node.name)
    }
}

/// Names along a path, root first. Empty components are kept; they match no node.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(PATH_SEPARATOR)
}

/// Path of the parent, or `None` for a root path.
pub fn parent_path(path: &str) -> Option<&str> {
    path.rsplit_once(PATH_SEPARATOR).map(|(parent, _)| parent)
}

//! Assembly breakdown navigation for the CAD history browser.
//!
//! An [`AssemblyTree`] holds one rooted part/assembly tree per commit plus a
//! single [`ExpansionState`] keyed by structural path. Because the keys are
//! paths (`Root/Child/Grandchild`) rather than node identities, expansion
//! carries over when switching commits as long as the names along a path are
//! unchanged. Renaming a node starts it collapsed again.
//!
//! Node actions never perform I/O. They return [`DownloadIntent`] and
//! [`ForkIntent`] values for external collaborators to fulfil.

mod expansion;
mod intent;
mod path;
mod traversal;
mod tree;

pub use expansion::ExpansionState;
pub use intent::{DownloadFile, DownloadIntent, DownloadScope, ForkIntent, ENTIRE_PROJECT};
pub use path::{parent_path, path_of, segments, PATH_SEPARATOR};
pub use traversal::{VisibleNode, VisibleNodes};
pub use tree::AssemblyTree;

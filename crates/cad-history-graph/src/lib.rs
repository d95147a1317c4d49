//! Commit DAG model for the CAD history browser.
//!
//! [`CommitGraph`] owns the commit set of a project view, validates that the
//! parent links form a DAG, produces the curve geometry connecting each parent
//! to its children, and tracks the single selected commit.
//!
//! ## Edge geometry
//!
//! ```text
//! parent ●────────────╮
//!                     │  bend = |dy| * 0.5
//!                     ╰────────────● child
//! ```
//!
//! Edges between commits sharing a lane (same `y`) are straight lines.

mod curve;
mod graph;
mod layout;
mod marker;
mod palette;

pub use curve::EdgeCurve;
pub use graph::{
    Bounds, CommitEdge, CommitGraph, DanglingParent, LoadOptions, LoadPolicy, PositionSource,
};
pub use layout::{LaneLayout, LaneLayoutConfig};
pub use marker::{CommitMarker, LABEL_MAX_CHARS, MARKER_RADIUS, SELECTED_MARKER_RADIUS};
pub use palette::BranchPalette;

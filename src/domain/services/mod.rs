//! Domain Services
//!
//! Pure comparison logic: which commands make the destination match the
//! source. The only I/O performed here is reading the two trees.

pub mod equality;
pub mod tree_diff;

pub use equality::files_equal;
pub use tree_diff::{
    deploy_changes, validate_roots, DiffSummary, DirectorySnapshot, EntryInfo, TreeDiff,
};

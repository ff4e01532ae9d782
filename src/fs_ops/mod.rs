//! Filesystem operations: tree copy, content removal, and error enrichment.

mod clear;
mod helpers;
mod tree_copy;

pub use clear::{clear_dir, remove_tree};
pub use helpers::fs_error;
pub use tree_copy::{CopyReport, EntryKind, TreeEntry, copy_tree, is_dir_empty, walk};

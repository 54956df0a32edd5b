#![forbid(unsafe_code)]
//! pathtree — rebuilds a folder hierarchy from flat path descriptors and renders
//! it as a text tree.

pub mod cli;
pub mod render;
pub mod settings;
pub mod source;
pub mod terminal;
pub mod tree;

pub use render::{lines_to_text, render, render_lines, TreeLine, TreeStats};
pub use settings::{SortBy, TreeSettings, TreeStyle};
pub use tree::{build_forest, Forest, Node, NodeKind, PathDescriptor};

//! Path trees and the three passes over them.
//!
//! [`build_tree`] turns sorted records into nested nodes, [`merge_trees`]
//! overlays the changed paths onto the full listing, and [`select_context`]
//! prunes the merged tree down to the changes and their neighbours. Every pass
//! builds a new tree and leaves its inputs untouched.

mod builder;
mod merger;
mod node;
mod selector;

pub use builder::build_tree;
pub use merger::merge_trees;
pub use node::{Node, NodeKind, Tree, TreeError};
pub use selector::select_context;

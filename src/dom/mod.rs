//! View tree: slotmap-backed subtree owned by each page.

pub mod node;
pub mod tree;

pub use node::{NativeKind, ViewData, ViewId};
pub use tree::ViewTree;

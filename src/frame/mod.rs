//! Top-level navigation: the frame and page resolution.

mod resolver;
mod stack;

pub use resolver::{ModuleRegistry, NavigationEntry, PageResolver};
pub use stack::Frame;

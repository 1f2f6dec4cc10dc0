//! The style scope seam: compiles stylesheet text into selectors and
//! applies them to views.

use std::path::Path;

use crate::dom::{ViewId, ViewTree};

/// A page's style scope.
///
/// A page owns exactly one scope. Stylesheet text is opaque to the page; it
/// only asks the scope to compile (`ensure_selectors`) and to apply matching
/// rules to one view at a time (`apply_selectors`).
pub trait StyleScope {
    /// The full stylesheet text currently held by the scope.
    fn css(&self) -> String;

    /// Replace the stylesheet text.
    fn set_css(&mut self, css: &str);

    /// Append stylesheet text, optionally remembering the file it came from.
    fn add_css(&mut self, css: &str, source_file: Option<&Path>);

    /// Compile selectors if the stylesheet changed since the last compile.
    fn ensure_selectors(&mut self);

    /// Apply every matching rule to `view` as CSS-origin style values.
    fn apply_selectors(&self, tree: &mut ViewTree, view: ViewId);
}

//! View node types: ViewId, ViewData, NativeKind.

use slotmap::new_key_type;

use crate::style::ViewStyle;

new_key_type! {
    /// Identifies a view inside a page's view tree. Copy, lightweight (u64).
    pub struct ViewId;
}

/// How a view is represented natively.
///
/// The two kinds need different insertion strategies when a page swaps its
/// content: a plain view becomes a subview, a controller is adopted as a
/// child controller and its view added as a subview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NativeKind {
    #[default]
    View,
    Controller,
}

/// Data for one view in a page's subtree.
#[derive(Debug, Clone)]
pub struct ViewData {
    /// View type name (e.g. "Label", "StackLayout"), used by type selectors.
    pub view_type: String,
    /// Optional unique id (`#id` selector, `get_view_by_id`).
    pub id: Option<String>,
    /// Style classes (`.class` selector).
    pub classes: Vec<String>,
    /// Style values, tagged with where they came from.
    pub style: ViewStyle,
    /// Native representation used when the view is inserted into a page.
    pub native_kind: NativeKind,
    /// Whether native resources exist for this view.
    pub realized: bool,
    /// Whether the view is loaded (attached and visible).
    pub loaded: bool,
}

impl ViewData {
    /// Create a view of the given type with nothing realized or loaded.
    pub fn new(view_type: impl Into<String>) -> Self {
        Self {
            view_type: view_type.into(),
            id: None,
            classes: Vec::new(),
            style: ViewStyle::new(),
            native_kind: NativeKind::View,
            realized: false,
            loaded: false,
        }
    }

    /// Set the id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a style class (builder). Duplicates are ignored.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Set a local style value (builder).
    pub fn with_style(mut self, property: &str, value: impl Into<String>) -> Self {
        self.style.set_local(property, value);
        self
    }

    /// Mark the view as natively backed by a controller (builder).
    pub fn as_controller(mut self) -> Self {
        self.native_kind = NativeKind::Controller;
        self
    }

    /// Whether the view carries the given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults() {
        let view = ViewData::new("Label");
        assert_eq!(view.view_type, "Label");
        assert!(view.id.is_none());
        assert!(view.classes.is_empty());
        assert_eq!(view.native_kind, NativeKind::View);
        assert!(!view.realized);
        assert!(!view.loaded);
    }

    #[test]
    fn builders() {
        let view = ViewData::new("Frame")
            .with_id("main")
            .with_class("a")
            .with_class("a")
            .with_class("b")
            .with_style("color", "red")
            .as_controller();
        assert_eq!(view.id.as_deref(), Some("main"));
        assert_eq!(view.classes, vec!["a", "b"]);
        assert!(view.has_class("b"));
        assert_eq!(view.style.get("color"), Some("red"));
        assert_eq!(view.native_kind, NativeKind::Controller);
    }

    #[test]
    fn view_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<ViewId>();
    }
}

//! Native view handles and the container a page's root native view keeps.

use crate::dom::{NativeKind, ViewId};

/// Native representation of a view: either a plain view or a view
/// controller whose own view is hosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeView {
    pub view: ViewId,
    pub kind: NativeKind,
}

impl NativeView {
    pub fn new(view: ViewId, kind: NativeKind) -> Self {
        Self { view, kind }
    }
}

/// The native children of a page's root view.
///
/// Plain views become subviews. Controllers are added as child controllers
/// and their view as a subview.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativeContainer {
    subviews: Vec<ViewId>,
    child_controllers: Vec<ViewId>,
}

impl NativeContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, native: NativeView) {
        match native.kind {
            NativeKind::View => {}
            NativeKind::Controller => self.child_controllers.push(native.view),
        }
        self.subviews.push(native.view);
    }

    /// Remove a native view. Returns `false` if it was not in the container.
    pub fn remove(&mut self, native: NativeView) -> bool {
        if native.kind == NativeKind::Controller {
            self.child_controllers.retain(|id| *id != native.view);
        }
        let before = self.subviews.len();
        self.subviews.retain(|id| *id != native.view);
        before != self.subviews.len()
    }

    /// Apply a content change: remove `old`, then add `new`.
    pub fn swap(&mut self, old: Option<NativeView>, new: Option<NativeView>) {
        if let Some(old) = old {
            if !self.remove(old) {
                log::trace!("native view {:?} was not in the container", old.view);
            }
        }
        if let Some(new) = new {
            self.insert(new);
        }
    }

    pub fn subviews(&self) -> &[ViewId] {
        &self.subviews
    }

    pub fn child_controllers(&self) -> &[ViewId] {
        &self.child_controllers
    }

    pub fn is_empty(&self) -> bool {
        self.subviews.is_empty()
    }
}

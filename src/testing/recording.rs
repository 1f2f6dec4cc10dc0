//! A style scope that records how the page drives it.

use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;

use crate::dom::{ViewId, ViewTree};
use crate::style::{SheetScope, StyleScope};

#[derive(Debug, Default)]
struct Counters {
    ensure_calls: Cell<usize>,
    applied: RefCell<Vec<ViewId>>,
}

/// Shared view of a [`RecordingScope`]'s counters, kept by the test after
/// the scope moves into a page.
#[derive(Debug, Clone, Default)]
pub struct ScopeStats {
    inner: Rc<Counters>,
}

impl ScopeStats {
    /// How many times selectors were compiled on request.
    pub fn ensure_calls(&self) -> usize {
        self.inner.ensure_calls.get()
    }

    /// Every view selectors were applied to, in call order.
    pub fn applied_views(&self) -> Vec<ViewId> {
        self.inner.applied.borrow().clone()
    }

    pub fn clear(&self) {
        self.inner.ensure_calls.set(0);
        self.inner.applied.borrow_mut().clear();
    }
}

/// A [`SheetScope`] that counts `ensure_selectors` calls and records each
/// `apply_selectors` target.
#[derive(Debug, Default)]
pub struct RecordingScope {
    sheet: SheetScope,
    stats: ScopeStats,
}

impl RecordingScope {
    pub fn new() -> (Self, ScopeStats) {
        let scope = Self::default();
        let stats = scope.stats.clone();
        (scope, stats)
    }
}

impl StyleScope for RecordingScope {
    fn css(&self) -> String {
        self.sheet.css()
    }

    fn set_css(&mut self, css: &str) {
        self.sheet.set_css(css);
    }

    fn add_css(&mut self, css: &str, source_file: Option<&Path>) {
        self.sheet.add_css(css, source_file);
    }

    fn ensure_selectors(&mut self) {
        let calls = &self.stats.inner.ensure_calls;
        calls.set(calls.get() + 1);
        self.sheet.ensure_selectors();
    }

    fn apply_selectors(&self, tree: &mut ViewTree, view: ViewId) {
        self.stats.inner.applied.borrow_mut().push(view);
        self.sheet.apply_selectors(tree, view);
    }
}

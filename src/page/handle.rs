//! The `Page` handle: construction, ownership of the action bar and view
//! tree, content swapping and event registration.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use super::events::{PageEvent, PageEventKind};
use super::lifecycle::{LifecycleState, LifecycleTracker, LifecycleTransition};
use super::modal::ModalCloser;
use crate::action_bar::ActionBar;
use crate::config::PageConfig;
use crate::dom::{ViewData, ViewId, ViewTree};
use crate::error::{PageError, Result};
use crate::event::{HandlerId, Observable, Value};
use crate::files::{FileSource, FsFiles};
use crate::platform::{NativeView, PlatformAdapter};
use crate::style::{SheetScope, StyleScope};

static NEXT_PAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique page identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(u64);

impl PageId {
    fn next() -> Self {
        Self(NEXT_PAGE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page-{}", self.0)
    }
}

pub(crate) struct PageCore {
    pub(super) lifecycle: LifecycleTracker,
    pub(super) navigation_context: Option<Value>,
    pub(super) binding_context: Option<Value>,
    pub(super) css_applied: bool,
    pub(super) action_bar: ActionBar,
    pub(super) tree: ViewTree,
    pub(super) root: ViewId,
    pub(super) content: Option<ViewId>,
    pub(super) is_back_navigation: bool,
    pub(super) loaded_events_enabled: bool,
    pub(super) modal_child: Option<Page>,
    pub(super) modal_parent: Weak<PageInner>,
    pub(super) modal_closer: Option<ModalCloser>,
}

pub(crate) struct PageInner {
    id: PageId,
    pub(super) platform: Rc<dyn PlatformAdapter>,
    config: PageConfig,
    files: Rc<dyn FileSource>,
    pub(super) core: RefCell<PageCore>,
    pub(super) scope: RefCell<Box<dyn StyleScope>>,
    pub(super) events: Observable<PageEventKind, PageEvent>,
}

/// One navigable screen.
///
/// A handle: clones refer to the same page. A page owns exactly one
/// [`ActionBar`], its view tree (a root view for the page itself plus an
/// optional content subtree) and its style scope. Native work is delegated
/// to the [`PlatformAdapter`] chosen at construction.
#[derive(Clone)]
pub struct Page {
    pub(super) inner: Rc<PageInner>,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Builder for [`Page`].
pub struct PageBuilder {
    platform: Rc<dyn PlatformAdapter>,
    scope: Option<Box<dyn StyleScope>>,
    files: Option<Rc<dyn FileSource>>,
    config: PageConfig,
}

impl PageBuilder {
    /// Use a custom style scope instead of [`SheetScope`].
    pub fn style_scope(mut self, scope: impl StyleScope + 'static) -> Self {
        self.scope = Some(Box::new(scope));
        self
    }

    /// Use a custom file source for `add_css_file`.
    pub fn files(mut self, files: Rc<dyn FileSource>) -> Self {
        self.files = Some(files);
        self
    }

    pub fn config(mut self, config: PageConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Page {
        let mut tree = ViewTree::new();
        let root = tree.insert(ViewData::new("Page"));
        let action_bar = ActionBar::new();

        let inner = Rc::new_cyclic(|weak: &Weak<PageInner>| {
            action_bar.set_page(weak.clone());
            PageInner {
                id: PageId::next(),
                platform: self.platform,
                config: self.config,
                files: self.files.unwrap_or_else(|| Rc::new(FsFiles)),
                core: RefCell::new(PageCore {
                    lifecycle: LifecycleTracker::new(),
                    navigation_context: None,
                    binding_context: None,
                    css_applied: false,
                    action_bar,
                    tree,
                    root,
                    content: None,
                    is_back_navigation: false,
                    loaded_events_enabled: false,
                    modal_child: None,
                    modal_parent: Weak::new(),
                    modal_closer: None,
                }),
                scope: RefCell::new(
                    self.scope.unwrap_or_else(|| Box::new(SheetScope::new())),
                ),
                events: Observable::new(),
            }
        });
        log::trace!("created {} on {}", inner.id, inner.platform.name());
        Page { inner }
    }
}

impl Page {
    /// Create a page with the default style scope, file source and config.
    pub fn new(platform: Rc<dyn PlatformAdapter>) -> Self {
        Self::builder(platform).build()
    }

    pub fn builder(platform: Rc<dyn PlatformAdapter>) -> PageBuilder {
        PageBuilder {
            platform,
            scope: None,
            files: None,
            config: PageConfig::default(),
        }
    }

    pub(crate) fn from_inner(inner: Rc<PageInner>) -> Self {
        Self { inner }
    }

    pub(crate) fn downgrade(&self) -> Weak<PageInner> {
        Rc::downgrade(&self.inner)
    }

    pub fn id(&self) -> PageId {
        self.inner.id
    }

    pub fn ptr_eq(&self, other: &Page) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn platform(&self) -> Rc<dyn PlatformAdapter> {
        Rc::clone(&self.inner.platform)
    }

    pub fn config(&self) -> &PageConfig {
        &self.inner.config
    }

    pub(super) fn files(&self) -> &dyn FileSource {
        self.inner.files.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Action bar, contexts, state
// ---------------------------------------------------------------------------

impl Page {
    pub fn action_bar(&self) -> ActionBar {
        self.inner.core.borrow().action_bar.clone()
    }

    /// Replace the action bar.
    ///
    /// The old bar's page reference is cleared first. Fails with
    /// `InvalidArgument` if `bar` already belongs to another page.
    pub fn set_action_bar(&self, bar: ActionBar) -> Result<()> {
        let current = self.action_bar();
        if current.ptr_eq(&bar) {
            return Ok(());
        }
        if bar.is_owned_by_other(&self.downgrade()) {
            return Err(PageError::InvalidArgument(
                "action bar belongs to another page".into(),
            ));
        }
        current.clear_page();
        bar.set_page(self.downgrade());
        self.inner.core.borrow_mut().action_bar = bar.clone();
        bar.update_action_bar();
        Ok(())
    }

    /// Context passed to the most recent `on_navigating_to`, cleared by
    /// `on_navigated_from`.
    pub fn navigation_context(&self) -> Option<Value> {
        self.inner.core.borrow().navigation_context.clone()
    }

    /// Context inherited by the action bar and its items.
    pub fn binding_context(&self) -> Option<Value> {
        self.inner.core.borrow().binding_context.clone()
    }

    pub fn set_binding_context(&self, context: Option<Value>) {
        self.inner.core.borrow_mut().binding_context = context;
    }

    pub fn state(&self) -> LifecycleState {
        self.inner.core.borrow().lifecycle.state()
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.core.borrow().lifecycle.is_loaded()
    }

    /// Drain the recorded lifecycle transitions.
    pub fn take_transitions(&self) -> Vec<LifecycleTransition> {
        self.inner.core.borrow_mut().lifecycle.pending_transitions()
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

impl Page {
    /// The view that represents the page itself.
    pub fn root_view(&self) -> ViewId {
        self.inner.core.borrow().root
    }

    /// The content view, if set.
    pub fn content(&self) -> Option<ViewId> {
        self.inner.core.borrow().content
    }

    /// Native representation of the content view.
    pub fn content_native(&self) -> Option<NativeView> {
        let core = self.inner.core.borrow();
        let id = core.content?;
        core.tree.get(id).map(|v| NativeView::new(id, v.native_kind))
    }

    /// Replace the content view.
    ///
    /// The old content subtree is removed; the platform adapter swaps the
    /// native representations.
    pub fn set_content(&self, data: ViewData) -> Result<ViewId> {
        let (old, new) = {
            let mut core = self.inner.core.borrow_mut();
            let root = core.root;
            let mut data = data;
            data.realized = core.lifecycle.retains_native();
            data.loaded = core.lifecycle.is_loaded();
            let kind = data.native_kind;
            let id = core
                .tree
                .insert_child(root, data)
                .ok_or_else(|| PageError::InvalidArgument("page has no root view".into()))?;
            let old = core.content.replace(id).and_then(|old_id| {
                let removed = core.tree.remove(old_id)?;
                Some(NativeView::new(old_id, removed.native_kind))
            });
            (old, NativeView::new(id, kind))
        };
        self.style_new_view(new.view);
        log::trace!("{}: content changed to {:?}", self.id(), new.view);
        self.inner.platform.content_changed(self, old, Some(new));
        Ok(new.view)
    }

    /// Remove the content view.
    pub fn clear_content(&self) {
        let old = {
            let mut core = self.inner.core.borrow_mut();
            core.content.take().and_then(|old_id| {
                let removed = core.tree.remove(old_id)?;
                Some(NativeView::new(old_id, removed.native_kind))
            })
        };
        if old.is_some() {
            self.inner.platform.content_changed(self, old, None);
        }
    }

    /// Add a view under `parent` anywhere in the page's tree.
    pub fn add_view(&self, parent: ViewId, data: ViewData) -> Result<ViewId> {
        let id = {
            let mut core = self.inner.core.borrow_mut();
            let mut data = data;
            data.realized = core.lifecycle.retains_native();
            data.loaded = core.lifecycle.is_loaded();
            core.tree
                .insert_child(parent, data)
                .ok_or_else(|| PageError::InvalidArgument("parent view is not in the page".into()))?
        };
        self.style_new_view(id);
        Ok(id)
    }

    /// Snapshot of a view's data.
    pub fn view(&self, id: ViewId) -> Option<ViewData> {
        self.inner.core.borrow().tree.get(id).cloned()
    }

    /// Mutate a view in place.
    pub fn with_view_mut<R>(&self, id: ViewId, f: impl FnOnce(&mut ViewData) -> R) -> Option<R> {
        self.inner.core.borrow_mut().tree.get_mut(id).map(f)
    }

    /// First view in the page (pre-order) with the given id.
    pub fn get_view_by_id(&self, id: &str) -> Option<ViewId> {
        let core = self.inner.core.borrow();
        core.tree.find_by_id(core.root, id)
    }

    /// The page and all its descendants, parents before children.
    pub fn views(&self) -> Vec<ViewId> {
        let core = self.inner.core.borrow();
        core.tree.walk_depth_first(core.root)
    }

    /// Set a flag on every view of the page.
    pub(super) fn mark_views(&self, f: impl Fn(&mut ViewData)) {
        let mut core = self.inner.core.borrow_mut();
        let root = core.root;
        for id in core.tree.walk_depth_first(root) {
            if let Some(view) = core.tree.get_mut(id) {
                f(view);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

impl Page {
    /// Register a handler for one kind of page event.
    pub fn on(&self, kind: PageEventKind, handler: impl Fn(&PageEvent) + 'static) -> HandlerId {
        self.inner.events.on(kind, handler)
    }

    pub fn off(&self, id: HandlerId) -> bool {
        self.inner.events.off(id)
    }

    pub(super) fn notify(&self, kind: PageEventKind) {
        let event = PageEvent {
            kind,
            page: self.clone(),
            context: self.navigation_context(),
            close: None,
        };
        self.emit(event);
    }

    pub(super) fn emit(&self, event: PageEvent) {
        log::trace!("{}: {}", self.id(), event.kind);
        self.inner.events.notify(event.kind, &event);
    }
}

impl PartialEq for Page {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.inner.core.borrow();
        f.debug_struct("Page")
            .field("id", &self.inner.id)
            .field("state", &core.lifecycle.state())
            .field("css_applied", &core.css_applied)
            .field("views", &core.tree.len())
            .field("presenting_modal", &core.modal_child.is_some())
            .finish()
    }
}

//! Navigation notifications and the attach / load / unload / detach steps.

use super::events::PageEventKind;
use super::lifecycle::LifecycleState;
use super::Page;
use crate::event::Value;

impl Page {
    // ── Navigation notifications ─────────────────────────────────────

    /// Record the navigation context and emit `NavigatingTo`.
    ///
    /// Runs before the page is attached.
    pub fn on_navigating_to(&self, context: Option<Value>) {
        log::debug!("{}: navigating to", self.id());
        self.inner.core.borrow_mut().navigation_context = context;
        self.notify(PageEventKind::NavigatingTo);
    }

    /// Emit `NavigatedTo` once the page is attached and loaded.
    pub fn on_navigated_to(&self) {
        log::debug!("{}: navigated to", self.id());
        self.notify(PageEventKind::NavigatedTo);
    }

    /// Emit `NavigatingFrom` before detachment begins.
    pub fn on_navigating_from(&self) {
        log::debug!("{}: navigating from", self.id());
        self.notify(PageEventKind::NavigatingFrom);
    }

    /// Emit `NavigatedFrom`, then clear the navigation context.
    ///
    /// `is_back_navigation` is remembered for the next [`on_detached`](Self::on_detached).
    pub fn on_navigated_from(&self, is_back_navigation: bool) {
        log::debug!(
            "{}: navigated from (back: {})",
            self.id(),
            is_back_navigation
        );
        self.inner.core.borrow_mut().is_back_navigation = is_back_navigation;
        self.notify(PageEventKind::NavigatedFrom);
        self.inner.core.borrow_mut().navigation_context = None;
    }

    /// Direction of the most recent navigation away from this page.
    pub fn is_back_navigation(&self) -> bool {
        self.inner.core.borrow().is_back_navigation
    }

    // ── Attach / detach ──────────────────────────────────────────────

    /// The page's native view became part of the native hierarchy.
    ///
    /// Creates native resources for every view that lacks them. A page that
    /// was cached on forward navigation keeps its existing resources.
    pub fn on_attached(&self) {
        {
            let mut core = self.inner.core.borrow_mut();
            match core.lifecycle.state() {
                LifecycleState::Attached | LifecycleState::Loaded => {
                    log::debug!("{}: already attached", self.id());
                    return;
                }
                LifecycleState::Unloaded => log::trace!("{}: reusing cached native view", self.id()),
                LifecycleState::Constructed | LifecycleState::Detached => {}
            }
            core.lifecycle.transition(LifecycleState::Attached);
        }
        self.mark_views(|v| v.realized = true);
        log::trace!("{}: attached", self.id());
        self.inner.platform.native_attached(self);
    }

    /// Release native resources unless the platform caches this page.
    ///
    /// The release is skipped when all of the following hold: `force` is
    /// false, the platform caches pages on navigation, and the last
    /// `on_navigated_from` was not a back navigation. Returns whether the
    /// page ended up detached.
    pub fn on_detached(&self, force: bool) -> bool {
        let (retains, is_back) = {
            let core = self.inner.core.borrow();
            (core.lifecycle.retains_native(), core.is_back_navigation)
        };
        if !retains {
            return true;
        }
        if !force && self.inner.platform.cache_pages_on_navigate() && !is_back {
            log::trace!("caching {}", self.id());
            return false;
        }

        if self.is_loaded() {
            self.unload_views();
        }
        self.mark_views(|v| v.realized = false);
        self.inner
            .core
            .borrow_mut()
            .lifecycle
            .transition(LifecycleState::Detached);
        log::trace!("{}: detached", self.id());
        self.inner.platform.native_detached(self);
        true
    }

    // ── Loaded / unloaded ────────────────────────────────────────────

    /// Apply CSS if needed, mark every view loaded and emit `Loaded`.
    ///
    /// On platforms that gate loaded events this only runs inside
    /// [`with_loaded_events`](Self::with_loaded_events). A loaded page
    /// ignores the call.
    pub fn on_loaded(&self) {
        if !self.loaded_events_allowed() {
            log::trace!("{}: loaded suppressed until visible", self.id());
            return;
        }
        if self.is_loaded() {
            log::debug!("{}: already loaded", self.id());
            return;
        }
        if !self.inner.core.borrow().lifecycle.retains_native() {
            self.on_attached();
        }

        self.apply_css();
        self.mark_views(|v| v.loaded = true);
        self.inner
            .core
            .borrow_mut()
            .lifecycle
            .transition(LifecycleState::Loaded);
        self.notify(PageEventKind::Loaded);
    }

    /// Mark every view unloaded and emit `Unloaded`.
    pub fn on_unloaded(&self) {
        if !self.loaded_events_allowed() {
            log::trace!("{}: unloaded suppressed until hidden", self.id());
            return;
        }
        if !self.is_loaded() {
            return;
        }
        self.unload_views();
    }

    /// Run `f` with loaded/unloaded events enabled.
    ///
    /// Platforms whose visibility signals are separate from attachment use
    /// this around `on_loaded`/`on_unloaded` so those fire once per
    /// visibility change and not on every attach path.
    pub fn with_loaded_events<R>(&self, f: impl FnOnce(&Page) -> R) -> R {
        let previous = std::mem::replace(
            &mut self.inner.core.borrow_mut().loaded_events_enabled,
            true,
        );
        let result = f(self);
        self.inner.core.borrow_mut().loaded_events_enabled = previous;
        result
    }

    fn loaded_events_allowed(&self) -> bool {
        !self.inner.platform.gates_loaded_events()
            || self.inner.core.borrow().loaded_events_enabled
    }

    fn unload_views(&self) {
        self.mark_views(|v| v.loaded = false);
        self.inner
            .core
            .borrow_mut()
            .lifecycle
            .transition(LifecycleState::Unloaded);
        self.notify(PageEventKind::Unloaded);
    }
}

//! A platform that shows modal pages in dialogs and can cache pages on
//! forward navigation.

use std::cell::RefCell;
use std::collections::HashMap;

use super::adapter::PlatformAdapter;
use super::native::{NativeContainer, NativeView};
use crate::page::{ModalRequest, Page, PageId};

const DEFAULT_MODAL_BACKGROUND: &str = "white";

/// A dialog hosting a modal page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialog {
    pub fullscreen: bool,
}

#[derive(Debug, Default)]
struct DialogHost {
    container: NativeContainer,
    attached: bool,
    dialog: Option<Dialog>,
}

/// Dialog-based platform adapter.
///
/// Modal presentation is synchronous: the page is attached and loaded, the
/// dialog is shown and `ShownModally` fires before `show_native_modal_view`
/// returns. Dismissal unloads the page and force-detaches it.
#[derive(Debug, Default)]
pub struct DialogPlatform {
    cache_pages: bool,
    hosts: RefCell<HashMap<PageId, DialogHost>>,
}

impl DialogPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep native resources of forward-navigated-away pages.
    pub fn with_page_caching(mut self, enabled: bool) -> Self {
        self.cache_pages = enabled;
        self
    }

    /// The dialog currently hosting `page`, if shown modally.
    pub fn dialog(&self, page: &Page) -> Option<Dialog> {
        self.hosts.borrow().get(&page.id()).and_then(|h| h.dialog)
    }

    /// Whether `page` currently has a native view.
    pub fn is_attached(&self, page: &Page) -> bool {
        self.hosts
            .borrow()
            .get(&page.id())
            .is_some_and(|h| h.attached)
    }

    /// Snapshot of the page's native container.
    pub fn container(&self, page: &Page) -> NativeContainer {
        self.hosts
            .borrow()
            .get(&page.id())
            .map(|h| h.container.clone())
            .unwrap_or_default()
    }

    /// Number of pages with native host state. A page's state is dropped
    /// once it detaches.
    pub fn host_count(&self) -> usize {
        self.hosts.borrow().len()
    }

    fn with_host<R>(&self, page: &Page, f: impl FnOnce(&mut DialogHost) -> R) -> R {
        let mut hosts = self.hosts.borrow_mut();
        f(hosts.entry(page.id()).or_default())
    }
}

impl PlatformAdapter for DialogPlatform {
    fn name(&self) -> &str {
        "dialog"
    }

    fn cache_pages_on_navigate(&self) -> bool {
        self.cache_pages
    }

    fn native_attached(&self, page: &Page) {
        let content = page.content_native();
        let mut hosts = self.hosts.borrow_mut();
        let host = hosts.entry(page.id()).or_default();
        if !host.attached {
            host.container = NativeContainer::default();
            host.container.swap(None, content);
        }
        host.attached = true;
    }

    fn native_detached(&self, page: &Page) {
        if self.hosts.borrow_mut().remove(&page.id()).is_some() {
            log::trace!("{}: dialog host released", page.id());
        }
    }

    fn content_changed(&self, page: &Page, old: Option<NativeView>, new: Option<NativeView>) {
        self.with_host(page, |h| h.container.swap(old, new));
    }

    fn show_native_modal_view(&self, page: &Page, request: ModalRequest) {
        let root = page.root_view();
        page.with_view_mut(root, |v| {
            if v.style.get("background-color").is_none() {
                v.style.set_local("background-color", DEFAULT_MODAL_BACKGROUND);
            }
        });

        page.on_attached();
        page.on_loaded();

        let fullscreen = request.fullscreen;
        self.with_host(page, |h| h.dialog = Some(Dialog { fullscreen }));
        log::trace!("{}: dialog shown (fullscreen: {})", page.id(), fullscreen);

        page.raise_shown_modally(request);
    }

    fn hide_native_modal_view(&self, page: &Page, parent: &Page) {
        let dismissed = self.with_host(page, |h| h.dialog.take());
        if dismissed.is_none() {
            log::warn!("{}: no dialog to dismiss over {}", page.id(), parent.id());
        }
        page.on_unloaded();
        page.on_detached(true);
    }
}

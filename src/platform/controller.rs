//! A platform built on view controllers: modal presentation completes
//! asynchronously and loaded/unloaded follow controller visibility.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use super::adapter::PlatformAdapter;
use super::native::{NativeContainer, NativeView};
use crate::page::{ModalRequest, Page, PageId};

/// How a modal controller covers its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationStyle {
    FullScreen,
    FormSheet,
}

#[derive(Debug, Default)]
struct ControllerHost {
    container: NativeContainer,
    attached: bool,
    is_modal: bool,
    presentation: Option<PresentationStyle>,
    /// Page presented above this one.
    presented: Option<PageId>,
}

/// Controller-based platform adapter.
///
/// `show_native_modal_view` only starts the presentation; call
/// [`complete_presentations`](Self::complete_presentations) to deliver the
/// completion signal, which makes the page appear and raises
/// `ShownModally`. Loaded/unloaded fire only from
/// [`view_will_appear`](Self::view_will_appear) and
/// [`view_did_disappear`](Self::view_did_disappear).
#[derive(Default)]
pub struct ControllerPlatform {
    hosts: RefCell<HashMap<PageId, ControllerHost>>,
    pending: RefCell<VecDeque<(Page, ModalRequest)>>,
}

impl ControllerPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// The controller is about to become visible.
    pub fn view_will_appear(&self, page: &Page) {
        log::trace!("{}: view will appear", page.id());
        page.with_loaded_events(|p| p.on_loaded());
    }

    /// The controller is no longer visible.
    pub fn view_did_disappear(&self, page: &Page) {
        log::trace!("{}: view did disappear", page.id());
        page.with_loaded_events(|p| p.on_unloaded());
    }

    /// Deliver completion for every started presentation, in order.
    /// Returns how many completed.
    pub fn complete_presentations(&self) -> usize {
        let mut completed = 0;
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some((page, request)) = next else {
                break;
            };
            if !page.state().retains_native() {
                page.on_attached();
            }
            self.view_will_appear(&page);
            page.raise_shown_modally(request);
            completed += 1;
        }
        completed
    }

    pub fn pending_presentations(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_modal(&self, page: &Page) -> bool {
        self.hosts
            .borrow()
            .get(&page.id())
            .is_some_and(|h| h.is_modal)
    }

    pub fn presentation_style(&self, page: &Page) -> Option<PresentationStyle> {
        self.hosts
            .borrow()
            .get(&page.id())
            .and_then(|h| h.presentation)
    }

    /// Id of the page `page` is currently presenting.
    pub fn presented(&self, page: &Page) -> Option<PageId> {
        self.hosts.borrow().get(&page.id()).and_then(|h| h.presented)
    }

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

    fn with_host<R>(&self, id: PageId, f: impl FnOnce(&mut ControllerHost) -> R) -> R {
        let mut hosts = self.hosts.borrow_mut();
        f(hosts.entry(id).or_default())
    }
}

impl PlatformAdapter for ControllerPlatform {
    fn name(&self) -> &str {
        "controller"
    }

    fn gates_loaded_events(&self) -> bool {
        true
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
            log::trace!("{}: controller host released", page.id());
        }
    }

    fn content_changed(&self, page: &Page, old: Option<NativeView>, new: Option<NativeView>) {
        self.with_host(page.id(), |h| h.container.swap(old, new));
    }

    fn page_appeared(&self, page: &Page) {
        self.view_will_appear(page);
    }

    fn page_disappeared(&self, page: &Page) {
        self.view_did_disappear(page);
    }

    fn show_native_modal_view(&self, page: &Page, request: ModalRequest) {
        let style = if request.fullscreen {
            PresentationStyle::FullScreen
        } else {
            PresentationStyle::FormSheet
        };
        self.with_host(page.id(), |h| {
            h.is_modal = true;
            h.presentation = Some(style);
        });
        let child = page.id();
        self.with_host(request.parent.id(), |h| h.presented = Some(child));
        log::trace!("{}: presentation started ({:?})", page.id(), style);
        self.pending.borrow_mut().push_back((page.clone(), request));
    }

    fn hide_native_modal_view(&self, page: &Page, parent: &Page) {
        self.pending.borrow_mut().retain(|(p, _)| !p.ptr_eq(page));
        self.with_host(parent.id(), |h| h.presented = None);
        self.with_host(page.id(), |h| {
            h.is_modal = false;
            h.presentation = None;
        });
        self.view_did_disappear(page);
        page.on_detached(true);
        // A presentation that never completed leaves no attached page behind.
        self.hosts.borrow_mut().remove(&page.id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{LifecycleState, PageEventKind};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn presentation_waits_for_completion() {
        let platform = Rc::new(ControllerPlatform::new());
        let parent = Page::new(platform.clone());
        let child = Page::new(platform.clone());
        let shown = Rc::new(Cell::new(0));
        let s = Rc::clone(&shown);
        child.on(PageEventKind::ShownModally, move |_| s.set(s.get() + 1));

        parent.show_modal_page(&child, None, None, false).unwrap();
        assert_eq!(shown.get(), 0);
        assert_eq!(platform.pending_presentations(), 1);
        assert!(platform.is_modal(&child));
        assert_eq!(
            platform.presentation_style(&child),
            Some(PresentationStyle::FormSheet)
        );
        assert_eq!(platform.presented(&parent), Some(child.id()));

        assert_eq!(platform.complete_presentations(), 1);
        assert_eq!(shown.get(), 1);
        assert_eq!(child.state(), LifecycleState::Loaded);
        assert_eq!(platform.complete_presentations(), 0);
    }

    #[test]
    fn hide_clears_modal_flags() {
        let platform = Rc::new(ControllerPlatform::new());
        let parent = Page::new(platform.clone());
        let child = Page::new(platform.clone());

        parent.show_modal_page(&child, None, None, true).unwrap();
        platform.complete_presentations();
        assert_eq!(
            platform.presentation_style(&child),
            Some(PresentationStyle::FullScreen)
        );

        child.close_modal(Vec::new());
        assert!(!platform.is_modal(&child));
        assert_eq!(platform.presented(&parent), None);
        assert!(!platform.is_attached(&child));
        assert_eq!(child.state(), LifecycleState::Detached);
    }

    #[test]
    fn dismissed_child_releases_host_state() {
        let platform = Rc::new(ControllerPlatform::new());
        let parent = Page::new(platform.clone());
        parent.on_attached();
        for _ in 0..10 {
            let child = Page::new(platform.clone());
            parent.show_modal_page(&child, None, None, false).unwrap();
            platform.complete_presentations();
            child.close_modal(Vec::new());
        }
        assert_eq!(platform.host_count(), 1);
        assert!(platform.is_attached(&parent));

        parent.on_detached(true);
        assert_eq!(platform.host_count(), 0);
    }

    #[test]
    fn dismissing_before_completion_releases_host_state() {
        let platform = Rc::new(ControllerPlatform::new());
        let parent = Page::new(platform.clone());
        let child = Page::new(platform.clone());
        parent.on_attached();

        parent.show_modal_page(&child, None, None, false).unwrap();
        assert!(!child.close_modal(Vec::new()));
        child.hide_modal(&parent);
        assert_eq!(platform.pending_presentations(), 0);
        assert!(!platform.is_modal(&child));
        assert_eq!(platform.host_count(), 1);
    }

    #[test]
    fn visibility_callbacks_drive_loaded() {
        let platform = Rc::new(ControllerPlatform::new());
        let page = Page::new(platform.clone());
        page.on_attached();

        platform.page_appeared(&page);
        assert!(page.is_loaded());
        platform.page_disappeared(&page);
        assert_eq!(page.state(), LifecycleState::Unloaded);
    }
}

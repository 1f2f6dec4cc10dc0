//! Modal presentation: a child page shown above its parent, and the closer
//! handed to the child once presentation completes.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::events::{PageEvent, PageEventKind};
use super::handle::PageInner;
use super::Page;
use crate::error::{PageError, Result};
use crate::event::Value;
use crate::frame::PageResolver;

/// Caller-supplied callback run when a modal page closes. Receives the
/// arguments the close was invoked with.
pub type CloseCallback = Box<dyn FnOnce(Vec<Value>)>;

/// Everything a platform adapter needs to present a modal page.
///
/// Adapters hand the request back to [`Page::raise_shown_modally`] once the
/// native presentation has completed.
pub struct ModalRequest {
    /// The presenting page.
    pub parent: Page,
    pub context: Option<Value>,
    pub close_callback: Option<CloseCallback>,
    pub fullscreen: bool,
}

impl fmt::Debug for ModalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalRequest")
            .field("parent", &self.parent.id())
            .field("has_context", &self.context.is_some())
            .field("has_callback", &self.close_callback.is_some())
            .field("fullscreen", &self.fullscreen)
            .finish()
    }
}

struct CloserInner {
    page: Weak<PageInner>,
    parent: Weak<PageInner>,
    callback: RefCell<Option<CloseCallback>>,
    closed: Cell<bool>,
}

/// Closes a modal page: runs the platform's hide step, then the caller's
/// callback with the close arguments.
///
/// Cloning shares the same closer; only the first `close` has an effect.
#[derive(Clone)]
pub struct ModalCloser {
    inner: Rc<CloserInner>,
}

impl ModalCloser {
    fn new(page: &Page, parent: &Page, callback: Option<CloseCallback>) -> Self {
        Self {
            inner: Rc::new(CloserInner {
                page: page.downgrade(),
                parent: parent.downgrade(),
                callback: RefCell::new(callback),
                closed: Cell::new(false),
            }),
        }
    }

    /// Hide the modal page, then invoke the close callback with `args`.
    ///
    /// Returns `false` if the modal was already closed.
    pub fn close(&self, args: Vec<Value>) -> bool {
        if self.inner.closed.replace(true) {
            log::warn!("modal page closed twice, ignoring");
            return false;
        }
        let page = self.inner.page.upgrade().map(Page::from_inner);
        let parent = self.inner.parent.upgrade().map(Page::from_inner);
        match (page, parent) {
            (Some(page), Some(parent)) => page.hide_modal(&parent),
            _ => log::warn!("modal page or its parent is gone, skipping hide"),
        }

        let callback = self.inner.callback.borrow_mut().take();
        if let Some(callback) = callback {
            callback(args);
        }
        true
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.get()
    }
}

impl fmt::Debug for ModalCloser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalCloser")
            .field("closed", &self.inner.closed.get())
            .finish()
    }
}

impl Page {
    /// Resolve `module_name` to a page and present it modally above this one.
    ///
    /// Fails with `ModalAlreadyPresented` if this page already hosts a
    /// modal child; nothing is resolved in that case.
    pub fn show_modal(
        &self,
        resolver: &dyn PageResolver,
        module_name: &str,
        context: Option<Value>,
        close_callback: Option<CloseCallback>,
        fullscreen: bool,
    ) -> Result<Page> {
        self.ensure_not_presenting()?;
        let page = resolver.resolve_page(module_name)?;
        self.show_modal_page(&page, context, close_callback, fullscreen)?;
        Ok(page)
    }

    /// Present an existing page modally above this one.
    ///
    /// `ShownModally` fires on `page` once the platform reports that the
    /// presentation completed, which may be after this call returns.
    pub fn show_modal_page(
        &self,
        page: &Page,
        context: Option<Value>,
        close_callback: Option<CloseCallback>,
        fullscreen: bool,
    ) -> Result<()> {
        self.ensure_not_presenting()?;
        if page.ptr_eq(self) {
            return Err(PageError::InvalidArgument(
                "a page cannot present itself".into(),
            ));
        }
        if page.modal_parent().is_some() {
            return Err(PageError::InvalidArgument(format!(
                "{} is already presented modally",
                page.id()
            )));
        }

        self.inner.core.borrow_mut().modal_child = Some(page.clone());
        page.inner.core.borrow_mut().modal_parent = self.downgrade();
        log::debug!(
            "{}: presenting {} modally (fullscreen: {})",
            self.id(),
            page.id(),
            fullscreen
        );

        let request = ModalRequest {
            parent: self.clone(),
            context,
            close_callback,
            fullscreen,
        };
        page.platform().show_native_modal_view(page, request);
        Ok(())
    }

    /// Emit `ShownModally` with a closer bound to this page and the request's
    /// parent. Called by platform adapters once presentation completes.
    pub fn raise_shown_modally(&self, request: ModalRequest) {
        let ModalRequest {
            parent,
            context,
            close_callback,
            ..
        } = request;
        let closer = ModalCloser::new(self, &parent, close_callback);
        self.inner.core.borrow_mut().modal_closer = Some(closer.clone());
        self.emit(PageEvent {
            kind: PageEventKind::ShownModally,
            page: self.clone(),
            context,
            close: Some(closer),
        });
    }

    /// Close this page if it is shown modally. Equivalent to invoking the
    /// closer delivered with `ShownModally`.
    pub fn close_modal(&self, args: Vec<Value>) -> bool {
        let closer = self.inner.core.borrow().modal_closer.clone();
        match closer {
            Some(closer) => closer.close(args),
            None => {
                log::warn!("{}: close_modal on a page that is not shown modally", self.id());
                false
            }
        }
    }

    /// The page currently presented modally above this one.
    pub fn modal_child(&self) -> Option<Page> {
        self.inner.core.borrow().modal_child.clone()
    }

    /// The page this one is presented above, if shown modally.
    pub fn modal_parent(&self) -> Option<Page> {
        self.inner
            .core
            .borrow()
            .modal_parent
            .upgrade()
            .map(Page::from_inner)
    }

    pub fn is_presenting_modal(&self) -> bool {
        self.inner.core.borrow().modal_child.is_some()
    }

    fn ensure_not_presenting(&self) -> Result<()> {
        if self.is_presenting_modal() {
            log::warn!("{}: showModal while already presenting", self.id());
            return Err(PageError::ModalAlreadyPresented(self.id()));
        }
        Ok(())
    }

    /// Run the platform hide step and unlink parent and child.
    pub(crate) fn hide_modal(&self, parent: &Page) {
        log::debug!("{}: hiding modal over {}", self.id(), parent.id());
        self.platform().hide_native_modal_view(self, parent);

        let child = parent.inner.core.borrow_mut().modal_child.take();
        {
            let mut core = self.inner.core.borrow_mut();
            core.modal_parent = Weak::new();
            core.modal_closer = None;
        }
        drop(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::value;
    use crate::frame::ModuleRegistry;
    use crate::platform::{ControllerPlatform, DialogPlatform, PlatformAdapter};
    use pretty_assertions::assert_eq;

    fn log_events(page: &Page, log: &Rc<RefCell<Vec<String>>>) {
        for kind in [PageEventKind::ShownModally, PageEventKind::Loaded, PageEventKind::Unloaded] {
            let l = Rc::clone(log);
            page.on(kind, move |e| l.borrow_mut().push(e.kind.as_str().to_owned()));
        }
    }

    fn callback(log: &Rc<RefCell<Vec<String>>>) -> Option<CloseCallback> {
        let l = Rc::clone(log);
        Some(Box::new(move |args: Vec<Value>| {
            let joined: Vec<String> = args
                .iter()
                .filter_map(|a| a.downcast_ref::<&str>().map(|s| s.to_string()))
                .collect();
            l.borrow_mut().push(format!("callback({})", joined.join(",")));
        }))
    }

    #[test]
    fn dialog_modal_shows_synchronously_and_hides_before_callback() {
        let platform: Rc<dyn PlatformAdapter> = Rc::new(DialogPlatform::new());
        let parent = Page::new(Rc::clone(&platform));
        let child = Page::new(platform);
        let log = Rc::new(RefCell::new(Vec::new()));
        log_events(&child, &log);

        parent
            .show_modal_page(&child, Some(value(1_u8)), callback(&log), false)
            .unwrap();
        assert!(parent.is_presenting_modal());
        assert_eq!(child.modal_parent(), Some(parent.clone()));
        assert_eq!(*log.borrow(), vec!["loaded", "shownModally"]);

        assert!(child.close_modal(vec![value("a"), value("b")]));
        assert_eq!(
            *log.borrow(),
            vec!["loaded", "shownModally", "unloaded", "callback(a,b)"]
        );
        assert!(!parent.is_presenting_modal());
        assert!(child.modal_parent().is_none());
    }

    #[test]
    fn callback_sees_parent_already_released() {
        let platform: Rc<dyn PlatformAdapter> = Rc::new(DialogPlatform::new());
        let parent = Page::new(Rc::clone(&platform));
        let child = Page::new(platform);
        let presenting = Rc::new(Cell::new(true));
        let p = parent.clone();
        let seen = Rc::clone(&presenting);
        parent
            .show_modal_page(
                &child,
                None,
                Some(Box::new(move |_: Vec<Value>| seen.set(p.is_presenting_modal()))),
                true,
            )
            .unwrap();

        child.close_modal(Vec::new());
        assert!(!presenting.get());
    }

    #[test]
    fn shown_modally_carries_context_and_closer() {
        let platform: Rc<dyn PlatformAdapter> = Rc::new(DialogPlatform::new());
        let parent = Page::new(Rc::clone(&platform));
        let child = Page::new(platform);
        let closer = Rc::new(RefCell::new(None));
        let c = Rc::clone(&closer);
        child.on(PageEventKind::ShownModally, move |e| {
            assert_eq!(e.context.as_ref().and_then(|v| v.downcast_ref::<u8>()), Some(&7));
            *c.borrow_mut() = e.close.clone();
        });

        parent
            .show_modal_page(&child, Some(value(7_u8)), None, false)
            .unwrap();
        let closer = closer.borrow_mut().take().unwrap();
        assert!(closer.close(Vec::new()));
        assert!(closer.is_closed());
        assert!(!closer.close(Vec::new()));
    }

    #[test]
    fn second_modal_is_rejected() {
        let platform: Rc<dyn PlatformAdapter> = Rc::new(DialogPlatform::new());
        let parent = Page::new(Rc::clone(&platform));
        let first = Page::new(Rc::clone(&platform));
        let second = Page::new(platform);

        parent.show_modal_page(&first, None, None, false).unwrap();
        let err = parent.show_modal_page(&second, None, None, false).unwrap_err();
        assert!(matches!(err, PageError::ModalAlreadyPresented(id) if id == parent.id()));
        assert_eq!(
            err.to_string(),
            format!("page-{} is already presenting a modal page", parent.id().get())
        );
        assert_eq!(parent.modal_child(), Some(first.clone()));
        assert!(second.modal_parent().is_none());

        first.close_modal(Vec::new());
        parent.show_modal_page(&second, None, None, false).unwrap();
    }

    #[test]
    fn page_cannot_present_itself() {
        let page = Page::new(Rc::new(DialogPlatform::new()));
        let err = page.show_modal_page(&page, None, None, false).unwrap_err();
        assert!(matches!(err, PageError::InvalidArgument(_)));
        assert!(!page.is_presenting_modal());
    }

    #[test]
    fn show_modal_resolves_module() {
        let platform: Rc<dyn PlatformAdapter> = Rc::new(DialogPlatform::new());
        let mut registry = ModuleRegistry::new();
        let p = Rc::clone(&platform);
        registry.register("details", move || Page::new(Rc::clone(&p)));
        let parent = Page::new(platform);

        let child = parent
            .show_modal(&registry, "details", None, None, false)
            .unwrap();
        assert_eq!(parent.modal_child(), Some(child));

        let err = parent
            .show_modal(&registry, "missing", None, None, false)
            .unwrap_err();
        assert!(matches!(err, PageError::ModalAlreadyPresented(_)));
    }

    #[test]
    fn unknown_module_is_reported() {
        let parent = Page::new(Rc::new(DialogPlatform::new()));
        let err = parent
            .show_modal(&ModuleRegistry::new(), "missing", None, None, false)
            .unwrap_err();
        assert!(matches!(err, PageError::UnknownModule(m) if m == "missing"));
        assert!(!parent.is_presenting_modal());
    }

    #[test]
    fn controller_modal_raises_after_completion() {
        let platform = Rc::new(ControllerPlatform::new());
        let parent = Page::new(platform.clone());
        let child = Page::new(platform.clone());
        let log = Rc::new(RefCell::new(Vec::new()));
        log_events(&child, &log);

        parent
            .show_modal_page(&child, None, callback(&log), true)
            .unwrap();
        assert!(log.borrow().is_empty());
        assert!(parent.is_presenting_modal());

        assert_eq!(platform.complete_presentations(), 1);
        assert_eq!(*log.borrow(), vec!["loaded", "shownModally"]);

        child.close_modal(vec![value("done")]);
        assert_eq!(
            *log.borrow(),
            vec!["loaded", "shownModally", "unloaded", "callback(done)"]
        );
    }

    #[test]
    fn close_modal_without_presentation_is_noop() {
        let page = Page::new(Rc::new(DialogPlatform::new()));
        assert!(!page.close_modal(Vec::new()));
    }
}

//! The navigation frame: a current page plus a back stack.

use super::resolver::{NavigationEntry, PageResolver};
use crate::error::{PageError, Result};
use crate::event::Value;
use crate::page::Page;

struct BackstackEntry {
    page: Page,
    context: Option<Value>,
}

/// Drives top-level navigation between pages.
///
/// Navigating away from a page notifies it, hides it through its platform
/// and detaches it (which the platform may skip on forward navigation).
/// Forward navigation pushes the old page onto the back stack; back
/// navigation discards it.
#[derive(Default)]
pub struct Frame {
    current: Option<BackstackEntry>,
    backstack: Vec<BackstackEntry>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigate forward to `page`.
    pub fn navigate(&mut self, page: Page, context: Option<Value>) {
        log::debug!("frame: navigate to {}", page.id());
        let previous = self.current.take();
        if let Some(prev) = &previous {
            prev.page.on_navigating_from();
        }
        page.on_navigating_to(context.clone());
        Self::show(&page);
        if let Some(prev) = previous {
            Self::hide(&prev.page, false);
            self.backstack.push(prev);
        }
        page.on_navigated_to();
        self.current = Some(BackstackEntry { page, context });
    }

    /// Resolve `entry` and navigate forward to the resulting page.
    pub fn navigate_entry(&mut self, resolver: &dyn PageResolver, entry: NavigationEntry) -> Result<Page> {
        let page = resolver.resolve_entry(&entry)?;
        self.navigate(page.clone(), entry.context);
        Ok(page)
    }

    /// Return to the previous page. The current page is discarded and fully
    /// detached.
    pub fn go_back(&mut self) -> Result<Page> {
        let target = self.backstack.pop().ok_or(PageError::EmptyBackStack)?;
        log::debug!("frame: back to {}", target.page.id());
        let leaving = self.current.take();
        if let Some(leaving) = &leaving {
            leaving.page.on_navigating_from();
        }
        target.page.on_navigating_to(target.context.clone());
        Self::show(&target.page);
        if let Some(leaving) = &leaving {
            Self::hide(&leaving.page, true);
        }
        target.page.on_navigated_to();
        let page = target.page.clone();
        self.current = Some(target);
        Ok(page)
    }

    pub fn can_go_back(&self) -> bool {
        !self.backstack.is_empty()
    }

    pub fn current_page(&self) -> Option<Page> {
        self.current.as_ref().map(|e| e.page.clone())
    }

    pub fn backstack_depth(&self) -> usize {
        self.backstack.len()
    }

    /// Pages on the back stack, oldest first.
    pub fn backstack(&self) -> Vec<Page> {
        self.backstack.iter().map(|e| e.page.clone()).collect()
    }

    fn show(page: &Page) {
        page.on_attached();
        page.on_loaded();
        page.platform().page_appeared(page);
    }

    fn hide(page: &Page, is_back_navigation: bool) {
        page.on_navigated_from(is_back_navigation);
        page.on_unloaded();
        page.platform().page_disappeared(page);
        page.on_detached(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::value;
    use crate::page::LifecycleState;
    use crate::platform::{ControllerPlatform, DialogPlatform, PlatformAdapter};
    use crate::testing::EventLog;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    fn pages(platform: Rc<dyn PlatformAdapter>) -> (Page, Page) {
        (Page::new(Rc::clone(&platform)), Page::new(platform))
    }

    #[test]
    fn forward_then_back() {
        let (a, b) = pages(Rc::new(DialogPlatform::new()));
        let log = EventLog::new();
        log.attach_labeled(&a, "a");
        log.attach_labeled(&b, "b");
        let mut frame = Frame::new();

        frame.navigate(a.clone(), None);
        frame.navigate(b.clone(), None);
        assert_eq!(frame.backstack_depth(), 1);
        assert_eq!(frame.current_page(), Some(b.clone()));

        let back = frame.go_back().unwrap();
        assert_eq!(back, a);
        assert!(!frame.can_go_back());
        assert_eq!(b.state(), LifecycleState::Detached);

        assert_eq!(
            log.entries(),
            vec![
                "a:navigatingTo",
                "a:loaded",
                "a:navigatedTo",
                "a:navigatingFrom",
                "b:navigatingTo",
                "b:loaded",
                "a:navigatedFrom",
                "a:unloaded",
                "b:navigatedTo",
                "b:navigatingFrom",
                "a:navigatingTo",
                "a:loaded",
                "b:navigatedFrom",
                "b:unloaded",
                "a:navigatedTo",
            ]
        );
    }

    #[test]
    fn back_with_empty_stack_fails() {
        let mut frame = Frame::new();
        assert!(matches!(frame.go_back(), Err(PageError::EmptyBackStack)));

        frame.navigate(Page::new(Rc::new(DialogPlatform::new())), None);
        assert!(matches!(frame.go_back(), Err(PageError::EmptyBackStack)));
        assert!(frame.current_page().is_some());
    }

    #[test]
    fn back_restores_the_entry_context() {
        let (a, b) = pages(Rc::new(DialogPlatform::new()));
        let mut frame = Frame::new();
        frame.navigate(a.clone(), Some(value(5_i32)));
        frame.navigate(b, None);
        assert!(a.navigation_context().is_none());

        frame.go_back().unwrap();
        let ctx = a.navigation_context().unwrap();
        assert_eq!(ctx.downcast_ref::<i32>(), Some(&5));
    }

    #[test]
    fn cached_page_keeps_native_view_until_back() {
        let (a, b) = pages(Rc::new(DialogPlatform::new().with_page_caching(true)));
        let mut frame = Frame::new();
        frame.navigate(a.clone(), None);
        frame.navigate(b.clone(), None);
        assert_eq!(a.state(), LifecycleState::Unloaded);

        frame.go_back().unwrap();
        assert_eq!(b.state(), LifecycleState::Detached);
        assert_eq!(a.state(), LifecycleState::Loaded);
    }

    #[test]
    fn controller_platform_loads_on_appear() {
        let (a, b) = pages(Rc::new(ControllerPlatform::new()));
        let log = EventLog::new();
        log.attach_labeled(&a, "a");
        let mut frame = Frame::new();

        frame.navigate(a.clone(), None);
        frame.navigate(b, None);
        assert_eq!(
            log.entries(),
            vec![
                "a:navigatingTo",
                "a:loaded",
                "a:navigatedTo",
                "a:navigatingFrom",
                "a:navigatedFrom",
                "a:unloaded",
            ]
        );
        assert_eq!(a.state(), LifecycleState::Detached);
    }
}

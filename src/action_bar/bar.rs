//! ActionBar: title, icon, navigation button and action items of a page.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::item::NavigationButton;
use super::items::ActionItems;
use super::ActionItem;
use crate::error::{PageError, Result};
use crate::event::{HandlerId, Observable, PropertyChange, Value};
use crate::page::{Page, PageInner};

/// Icon visibility on platforms that can hide the bar icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconVisibility {
    #[default]
    Auto,
    Never,
    Always,
}

impl IconVisibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Never => "never",
            Self::Always => "always",
        }
    }
}

/// Observable fields of an [`ActionBar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarProperty {
    Title,
    Icon,
    AndroidIconVisibility,
    NavigationButton,
    ActionItems,
}

impl BarProperty {
    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Icon => "icon",
            Self::AndroidIconVisibility => "androidIconVisibility",
            Self::NavigationButton => "navigationButton",
            Self::ActionItems => "actionItems",
        }
    }
}

pub(crate) struct BarState {
    title: Option<String>,
    icon: Option<String>,
    icon_visibility: IconVisibility,
    navigation_button: Option<NavigationButton>,
    pub(super) items: Vec<ActionItem>,
    page: Weak<PageInner>,
    context_bound: bool,
}

pub(crate) struct BarInner {
    pub(super) state: RefCell<BarState>,
    properties: Observable<BarProperty, PropertyChange>,
    updates: Observable<(), ActionBar>,
}

/// The title/navigation bar of a page.
///
/// A handle: clones refer to the same bar. The bar owns its navigation
/// button and action items; its `page` back-reference is weak.
///
/// Every mutating change to the title, icon, navigation button or item
/// collection fires the update hooks (see [`on_update`](Self::on_update))
/// synchronously, after the write completes.
#[derive(Clone)]
pub struct ActionBar {
    pub(super) inner: Rc<BarInner>,
}

impl ActionBar {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(BarInner {
                state: RefCell::new(BarState {
                    title: None,
                    icon: None,
                    icon_visibility: IconVisibility::Auto,
                    navigation_button: None,
                    items: Vec::new(),
                    page: Weak::new(),
                    context_bound: false,
                }),
                properties: Observable::new(),
                updates: Observable::new(),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Rc<BarInner>) -> Self {
        Self { inner }
    }

    pub(crate) fn downgrade(&self) -> Weak<BarInner> {
        Rc::downgrade(&self.inner)
    }

    pub fn ptr_eq(&self, other: &ActionBar) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // ── Title / icon ─────────────────────────────────────────────────

    pub fn title(&self) -> Option<String> {
        self.inner.state.borrow().title.clone()
    }

    pub fn set_title(&self, title: Option<String>) {
        let old = std::mem::replace(&mut self.inner.state.borrow_mut().title, title.clone());
        if old != title {
            self.property_changed(BarProperty::Title, old, title);
        }
    }

    pub fn icon(&self) -> Option<String> {
        self.inner.state.borrow().icon.clone()
    }

    pub fn set_icon(&self, icon: Option<String>) {
        let old = std::mem::replace(&mut self.inner.state.borrow_mut().icon, icon.clone());
        if old != icon {
            self.property_changed(BarProperty::Icon, old, icon);
        }
    }

    pub fn android_icon_visibility(&self) -> IconVisibility {
        self.inner.state.borrow().icon_visibility
    }

    pub fn set_android_icon_visibility(&self, visibility: IconVisibility) {
        let old = std::mem::replace(
            &mut self.inner.state.borrow_mut().icon_visibility,
            visibility,
        );
        if old != visibility {
            self.property_changed(
                BarProperty::AndroidIconVisibility,
                Some(old.as_str().to_owned()),
                Some(visibility.as_str().to_owned()),
            );
        }
    }

    // ── Navigation button ────────────────────────────────────────────

    pub fn navigation_button(&self) -> Option<NavigationButton> {
        self.inner.state.borrow().navigation_button.clone()
    }

    /// Replace the navigation button.
    ///
    /// The previous button is detached first. Fails with `InvalidArgument`
    /// if `button` is attached to a different bar.
    pub fn set_navigation_button(&self, button: Option<NavigationButton>) -> Result<()> {
        let current = self.navigation_button();
        if current == button {
            return Ok(());
        }
        if let Some(new) = &button {
            if let Some(owner) = new.action_bar() {
                if !owner.ptr_eq(self) {
                    return Err(PageError::InvalidArgument(
                        "navigation button is attached to another action bar".into(),
                    ));
                }
            }
        }

        if let Some(old) = &current {
            old.detach();
        }
        self.inner.state.borrow_mut().navigation_button = button.clone();
        if let Some(new) = &button {
            new.attach(self);
        }
        self.property_changed(
            BarProperty::NavigationButton,
            current.map(|b| b.text()),
            button.map(|b| b.text()),
        );
        Ok(())
    }

    // ── Items ────────────────────────────────────────────────────────

    /// The action item collection. Read-only as a property: the collection
    /// itself is mutated through its methods.
    pub fn action_items(&self) -> ActionItems {
        ActionItems::new(self.clone())
    }

    /// Whether the bar has anything to show.
    pub fn should_show(&self) -> bool {
        let state = self.inner.state.borrow();
        state.title.as_deref().is_some_and(|t| !t.is_empty())
            || state.icon.is_some()
            || state.navigation_button.is_some()
            || !state.items.is_empty()
    }

    // ── Page back-reference / binding ────────────────────────────────

    /// The page that owns this bar, if it is still alive.
    pub fn page(&self) -> Option<Page> {
        self.inner
            .state
            .borrow()
            .page
            .upgrade()
            .map(Page::from_inner)
    }

    pub(crate) fn is_owned_by_other(&self, page: &Weak<PageInner>) -> bool {
        let state = self.inner.state.borrow();
        state.page.strong_count() > 0 && !state.page.ptr_eq(page)
    }

    /// Point the back-reference at `page` and re-bind to its context.
    pub(crate) fn set_page(&self, page: Weak<PageInner>) {
        let mut state = self.inner.state.borrow_mut();
        state.page = page;
        state.context_bound = true;
    }

    /// Clear the back-reference and unbind.
    pub(crate) fn clear_page(&self) {
        let mut state = self.inner.state.borrow_mut();
        state.page = Weak::new();
        state.context_bound = false;
    }

    /// Binding context, inherited from the owning page.
    pub fn binding_context(&self) -> Option<Value> {
        if !self.inner.state.borrow().context_bound {
            return None;
        }
        self.page().and_then(|page| page.binding_context())
    }

    // ── Hooks ────────────────────────────────────────────────────────

    /// Register a hook called after every change that needs a re-render.
    pub fn on_update(&self, hook: impl Fn(&ActionBar) + 'static) -> HandlerId {
        self.inner.updates.on((), hook)
    }

    pub fn off_update(&self, id: HandlerId) -> bool {
        self.inner.updates.off(id)
    }

    /// Register a handler for changes to one property.
    pub fn on_property_change(
        &self,
        property: BarProperty,
        handler: impl Fn(&PropertyChange) + 'static,
    ) -> HandlerId {
        self.inner.properties.on(property, handler)
    }

    pub fn off_property_change(&self, id: HandlerId) -> bool {
        self.inner.properties.off(id)
    }

    /// Fire the update hooks.
    pub fn update_action_bar(&self) {
        log::trace!("updating action bar");
        self.inner.updates.notify((), self);
    }

    pub(crate) fn property_changed(
        &self,
        property: BarProperty,
        old: Option<String>,
        new: Option<String>,
    ) {
        let change = PropertyChange {
            name: property.name(),
            old,
            new,
        };
        self.inner.properties.notify(property, &change);
        self.update_action_bar();
    }
}

impl Default for ActionBar {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for ActionBar {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ActionBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("ActionBar")
            .field("title", &state.title)
            .field("icon", &state.icon)
            .field("navigation_button", &state.navigation_button.is_some())
            .field("items", &state.items.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn count_updates(bar: &ActionBar) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        bar.on_update(move |_| c.set(c.get() + 1));
        count
    }

    #[test]
    fn fresh_bar_is_hidden() {
        let bar = ActionBar::new();
        assert!(!bar.should_show());
        assert_eq!(bar.android_icon_visibility(), IconVisibility::Auto);
        assert!(bar.page().is_none());
    }

    #[test]
    fn any_single_field_shows_the_bar() {
        let bar = ActionBar::new();
        bar.set_title(Some("Inbox".into()));
        assert!(bar.should_show());
        bar.set_title(None);
        assert!(!bar.should_show());

        bar.set_icon(Some("res://logo".into()));
        assert!(bar.should_show());
        bar.set_icon(None);

        bar.set_navigation_button(Some(NavigationButton::new())).unwrap();
        assert!(bar.should_show());
        bar.set_navigation_button(None).unwrap();

        bar.action_items().add_item(&ActionItem::new()).unwrap();
        assert!(bar.should_show());
        bar.action_items().set_items(&[]).unwrap();
        assert!(!bar.should_show());
    }

    #[test]
    fn empty_title_does_not_show() {
        let bar = ActionBar::new();
        bar.set_title(Some(String::new()));
        assert!(!bar.should_show());
    }

    #[test]
    fn title_and_icon_changes_fire_update_hook() {
        let bar = ActionBar::new();
        let updates = count_updates(&bar);

        bar.set_title(Some("A".into()));
        bar.set_title(Some("A".into())); // unchanged
        bar.set_icon(Some("i".into()));
        bar.set_android_icon_visibility(IconVisibility::Never);
        assert_eq!(updates.get(), 3);
    }

    #[test]
    fn property_change_carries_old_and_new() {
        let bar = ActionBar::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        bar.on_property_change(BarProperty::Title, move |change| {
            s.borrow_mut().push(change.clone());
        });

        bar.set_title(Some("One".into()));
        bar.set_title(Some("Two".into()));
        bar.set_icon(Some("x".into()));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].name, "title");
        assert_eq!(seen[1].old.as_deref(), Some("One"));
        assert_eq!(seen[1].new.as_deref(), Some("Two"));
    }

    #[test]
    fn navigation_button_replacement_detaches_old() {
        let bar = ActionBar::new();
        let first = NavigationButton::with_text("Back");
        let second = NavigationButton::with_text("Up");

        bar.set_navigation_button(Some(first.clone())).unwrap();
        assert_eq!(first.action_bar(), Some(bar.clone()));

        bar.set_navigation_button(Some(second.clone())).unwrap();
        assert!(first.action_bar().is_none());
        assert_eq!(second.action_bar(), Some(bar.clone()));
        assert_eq!(bar.navigation_button(), Some(second));
    }

    #[test]
    fn navigation_button_of_other_bar_is_rejected() {
        let a = ActionBar::new();
        let b = ActionBar::new();
        let button = NavigationButton::new();
        a.set_navigation_button(Some(button.clone())).unwrap();

        let err = b.set_navigation_button(Some(button.clone())).unwrap_err();
        assert!(matches!(err, PageError::InvalidArgument(_)));
        assert!(b.navigation_button().is_none());
        assert_eq!(button.action_bar(), Some(a));
    }

    #[test]
    fn item_text_change_rerenders_owning_bar() {
        let bar = ActionBar::new();
        let item = ActionItem::new();
        bar.action_items().add_item(&item).unwrap();
        let updates = count_updates(&bar);

        item.set_text("Edit");
        item.set_icon(Some("pen".into()));
        assert_eq!(updates.get(), 2);
    }

    #[test]
    fn update_hook_can_read_the_bar() {
        let bar = ActionBar::new();
        let visible = Rc::new(Cell::new(false));
        let v = Rc::clone(&visible);
        bar.on_update(move |bar| v.set(bar.should_show()));

        bar.action_items().add_item(&ActionItem::with_text("B")).unwrap();
        assert!(visible.get());
    }
}

//! Action bar entries: ActionItemBase, ActionItem, NavigationButton.
//!
//! All three are cheap handles around shared state, so the caller and the
//! owning bar see the same item. Equality is identity.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

use super::bar::{ActionBar, BarInner};
use crate::event::{HandlerId, Observable, Value};

// ---------------------------------------------------------------------------
// Placement hints
// ---------------------------------------------------------------------------

/// Where an item goes on platforms with an overflow menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AndroidPosition {
    #[default]
    ActionBar,
    ActionBarIfRoom,
    Popup,
}

impl AndroidPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ActionBar => "actionBar",
            Self::ActionBarIfRoom => "actionBarIfRoom",
            Self::Popup => "popup",
        }
    }
}

/// Which side of a navigation bar an item goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IosPosition {
    Left,
    #[default]
    Right,
}

impl IosPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Placement {
    android: AndroidPosition,
    ios: IosPosition,
}

// ---------------------------------------------------------------------------
// ActionItemBase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemEvent {
    Tap,
}

struct ItemState {
    text: String,
    icon: Option<String>,
    action_bar: Weak<BarInner>,
    context_bound: bool,
    placement: Option<Placement>,
}

struct ItemInner {
    state: RefCell<ItemState>,
    events: Observable<ItemEvent, ActionItemBase>,
}

/// Capabilities shared by every action bar entry: text, icon, tap.
#[derive(Clone)]
pub struct ActionItemBase {
    inner: Rc<ItemInner>,
}

impl ActionItemBase {
    fn with_placement(placement: Option<Placement>) -> Self {
        Self {
            inner: Rc::new(ItemInner {
                state: RefCell::new(ItemState {
                    text: String::new(),
                    icon: None,
                    action_bar: Weak::new(),
                    context_bound: false,
                    placement,
                }),
                events: Observable::new(),
            }),
        }
    }

    pub fn text(&self) -> String {
        self.inner.state.borrow().text.clone()
    }

    /// Set the text. The owning bar, if any, is re-rendered.
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            let changed = state.text != text;
            state.text = text;
            changed
        };
        if changed {
            self.invalidate_bar();
        }
    }

    pub fn icon(&self) -> Option<String> {
        self.inner.state.borrow().icon.clone()
    }

    /// Set or clear the icon. The owning bar, if any, is re-rendered.
    pub fn set_icon(&self, icon: Option<String>) {
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            let changed = state.icon != icon;
            state.icon = icon;
            changed
        };
        if changed {
            self.invalidate_bar();
        }
    }

    /// The bar this item is attached to, if any.
    pub fn action_bar(&self) -> Option<ActionBar> {
        self.inner
            .state
            .borrow()
            .action_bar
            .upgrade()
            .map(ActionBar::from_inner)
    }

    /// Binding context, inherited from the owning bar while attached.
    pub fn binding_context(&self) -> Option<Value> {
        if !self.inner.state.borrow().context_bound {
            return None;
        }
        self.action_bar().and_then(|bar| bar.binding_context())
    }

    /// Register a tap handler.
    pub fn on_tap(&self, handler: impl Fn(&ActionItemBase) + 'static) -> HandlerId {
        self.inner.events.on(ItemEvent::Tap, handler)
    }

    pub fn off_tap(&self, id: HandlerId) -> bool {
        self.inner.events.off(id)
    }

    /// Notify tap handlers. Called by the native layer when the item is tapped.
    pub fn raise_tap(&self) {
        self.inner.events.notify(ItemEvent::Tap, self);
    }

    /// Whether two handles refer to the same item.
    pub fn ptr_eq(&self, other: &ActionItemBase) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Point the back-reference at `bar` and bind to its context.
    pub(crate) fn attach(&self, bar: &ActionBar) {
        let mut state = self.inner.state.borrow_mut();
        state.action_bar = bar.downgrade();
        state.context_bound = true;
    }

    /// Clear the back-reference and unbind the context.
    pub(crate) fn detach(&self) {
        let mut state = self.inner.state.borrow_mut();
        state.action_bar = Weak::new();
        state.context_bound = false;
    }

    fn invalidate_bar(&self) {
        if let Some(bar) = self.action_bar() {
            bar.update_action_bar();
        }
    }

    fn placement(&self) -> Placement {
        self.inner.state.borrow().placement.unwrap_or_default()
    }

    fn set_placement(&self, placement: Placement) {
        self.inner.state.borrow_mut().placement = Some(placement);
    }
}

impl PartialEq for ActionItemBase {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ActionItemBase {}

impl fmt::Debug for ActionItemBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("ActionItemBase")
            .field("text", &state.text)
            .field("icon", &state.icon)
            .field("attached", &(state.action_bar.strong_count() > 0))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ActionItem
// ---------------------------------------------------------------------------

/// An item in a bar's action item collection, with placement hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionItem(ActionItemBase);

impl ActionItem {
    pub fn new() -> Self {
        Self(ActionItemBase::with_placement(Some(Placement::default())))
    }

    /// Create an item with the given text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let item = Self::new();
        item.set_text(text);
        item
    }

    pub fn android_position(&self) -> AndroidPosition {
        self.0.placement().android
    }

    pub fn set_android_position(&self, position: AndroidPosition) {
        let mut placement = self.0.placement();
        placement.android = position;
        self.0.set_placement(placement);
    }

    pub fn ios_position(&self) -> IosPosition {
        self.0.placement().ios
    }

    pub fn set_ios_position(&self, position: IosPosition) {
        let mut placement = self.0.placement();
        placement.ios = position;
        self.0.set_placement(placement);
    }

    pub fn base(&self) -> &ActionItemBase {
        &self.0
    }
}

impl Default for ActionItem {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for ActionItem {
    type Target = ActionItemBase;

    fn deref(&self) -> &ActionItemBase {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// NavigationButton
// ---------------------------------------------------------------------------

/// The bar's navigation (back/up) button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationButton(ActionItemBase);

impl NavigationButton {
    pub fn new() -> Self {
        Self(ActionItemBase::with_placement(None))
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let button = Self::new();
        button.set_text(text);
        button
    }

    pub fn base(&self) -> &ActionItemBase {
        &self.0
    }
}

impl Default for NavigationButton {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for NavigationButton {
    type Target = ActionItemBase;

    fn deref(&self) -> &ActionItemBase {
        &self.0
    }
}

//! Page notifications.

use std::fmt;

use super::modal::ModalCloser;
use super::Page;
use crate::event::Value;

/// Notifications a page emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageEventKind {
    NavigatingTo,
    NavigatedTo,
    NavigatingFrom,
    NavigatedFrom,
    ShownModally,
    Loaded,
    Unloaded,
}

impl PageEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NavigatingTo => "navigatingTo",
            Self::NavigatedTo => "navigatedTo",
            Self::NavigatingFrom => "navigatingFrom",
            Self::NavigatedFrom => "navigatedFrom",
            Self::ShownModally => "shownModally",
            Self::Loaded => "loaded",
            Self::Unloaded => "unloaded",
        }
    }

    /// Every kind, in lifecycle order.
    pub const ALL: [PageEventKind; 7] = [
        Self::NavigatingTo,
        Self::NavigatedTo,
        Self::NavigatingFrom,
        Self::NavigatedFrom,
        Self::ShownModally,
        Self::Loaded,
        Self::Unloaded,
    ];
}

impl fmt::Display for PageEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data passed to page event handlers.
#[derive(Clone)]
pub struct PageEvent {
    pub kind: PageEventKind,
    /// The page that raised the event.
    pub page: Page,
    /// Navigation context for navigation events; the modal context for
    /// `ShownModally`.
    pub context: Option<Value>,
    /// Closes the modal page. Only set for `ShownModally`.
    pub close: Option<ModalCloser>,
}

impl fmt::Debug for PageEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageEvent")
            .field("kind", &self.kind)
            .field("page", &self.page.id())
            .field("has_context", &self.context.is_some())
            .field("has_close", &self.close.is_some())
            .finish()
    }
}

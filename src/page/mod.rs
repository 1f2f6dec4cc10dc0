//! Pages: lifecycle, navigation notifications, CSS application and modal
//! presentation.

mod css;
mod events;
mod handle;
mod lifecycle;
mod modal;
mod navigation;

pub use events::{PageEvent, PageEventKind};
pub(crate) use handle::PageInner;
pub use handle::{Page, PageBuilder, PageId};
pub use lifecycle::{
    LifecycleState, LifecycleTracker, LifecycleTransition, MAX_PENDING_TRANSITIONS,
};
pub use modal::{CloseCallback, ModalCloser, ModalRequest};

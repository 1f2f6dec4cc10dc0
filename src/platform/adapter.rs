//! The platform adapter seam.

use super::native::NativeView;
use crate::page::{ModalRequest, Page};

/// Translates page lifecycle steps into native work.
///
/// One adapter may serve many pages; adapters keep per-page native state
/// keyed by [`Page::id`]. Every method receives the page it concerns.
/// Implementations must not hold internal borrows while calling back into a
/// page, since page methods may call the adapter again.
pub trait PlatformAdapter {
    /// Short platform name, used in log output.
    fn name(&self) -> &str;

    /// Whether forward-navigated-away pages keep their native resources.
    ///
    /// Back navigation and forced detaches always release them.
    fn cache_pages_on_navigate(&self) -> bool {
        false
    }

    /// Whether loaded/unloaded only fire from visibility callbacks (see
    /// [`Page::with_loaded_events`]).
    fn gates_loaded_events(&self) -> bool {
        false
    }

    /// The page's native view was created and attached.
    fn native_attached(&self, _page: &Page) {}

    /// The page's native resources were released.
    fn native_detached(&self, _page: &Page) {}

    /// The page's content view changed. Remove `old` from the page's native
    /// container and add `new`.
    fn content_changed(&self, page: &Page, old: Option<NativeView>, new: Option<NativeView>);

    /// A navigation controller made the page visible.
    fn page_appeared(&self, _page: &Page) {}

    /// A navigation controller hid the page.
    fn page_disappeared(&self, _page: &Page) {}

    /// Present `page` modally above `request.parent`.
    ///
    /// Must call [`Page::raise_shown_modally`] with the request once the
    /// native presentation has completed.
    fn show_native_modal_view(&self, page: &Page, request: ModalRequest);

    /// Dismiss `page` from above `parent` and release its native modal
    /// resources.
    fn hide_native_modal_view(&self, page: &Page, parent: &Page);
}

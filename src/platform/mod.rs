//! Platform adapters: the native side of page attachment, content swaps and
//! modal presentation.

mod adapter;
mod controller;
mod dialog;
mod native;

pub use adapter::PlatformAdapter;
pub use controller::{ControllerPlatform, PresentationStyle};
pub use dialog::{Dialog, DialogPlatform};
pub use native::{NativeContainer, NativeView};

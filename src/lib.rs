//! # navpage
//!
//! Page lifecycle and navigation core for native UI toolkits.
//!
//! A [`Page`](page::Page) owns an [`ActionBar`](action_bar::ActionBar), a view
//! subtree and a style scope. It moves through attach, load, unload and
//! detach as a navigation controller shows and hides it, applies CSS lazily
//! on load, and can present one child page modally. All native work goes
//! through a [`PlatformAdapter`](platform::PlatformAdapter) picked when the
//! page is built.
//!
//! ## Core Systems
//!
//! - **[`page`]**: the page handle, lifecycle states, navigation
//!   notifications, CSS application and the modal protocol
//! - **[`action_bar`]**: action bar, action items and the navigation button
//! - **[`platform`]**: the adapter trait plus dialog- and controller-based
//!   adapters
//! - **[`frame`]**: back-stack navigation and module resolution
//! - **[`dom`]**: slotmap-backed view tree
//! - **[`style`]**: per-view style values and the style scope
//! - **[`event`]**: observable handler tables
//! - **[`testing`]**: headless helpers for lifecycle tests

// Foundation
pub mod config;
pub mod error;
pub mod event;
pub mod files;

// View tree and styling
pub mod dom;
pub mod style;

// Pages
pub mod action_bar;
pub mod page;

// Native side and navigation
pub mod frame;
pub mod platform;

pub mod testing;

pub use error::{PageError, Result};
pub use page::Page;

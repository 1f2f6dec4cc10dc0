//! Action bar: the title/navigation bar of a page and its entries.

pub mod bar;
pub mod item;
pub mod items;

pub use bar::{ActionBar, BarProperty, IconVisibility};
pub use item::{ActionItem, ActionItemBase, AndroidPosition, IosPosition, NavigationButton};
pub use items::ActionItems;

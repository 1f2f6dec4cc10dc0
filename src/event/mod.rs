//! Notifications: observable handler tables and shared context values.

pub mod observable;

use std::any::Any;
use std::rc::Rc;

pub use observable::{HandlerId, Observable};

/// An opaque value passed through the framework untouched: navigation
/// contexts, binding contexts and modal close arguments.
pub type Value = Rc<dyn Any>;

/// Wrap any value as a [`Value`].
pub fn value<T: 'static>(v: T) -> Value {
    Rc::new(v)
}

/// A property change on an observable object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyChange {
    /// Name of the property that changed (e.g. `"title"`).
    pub name: &'static str,
    /// Previous value, if any.
    pub old: Option<String>,
    /// New value, if any.
    pub new: Option<String>,
}

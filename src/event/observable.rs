//! Observable: a synchronous, ordered handler table keyed by event kind.
//!
//! Handlers are stored in a slotmap so removal by [`HandlerId`] is O(1) while
//! a separate order list keeps notification in registration order.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Identifies a registered handler. Returned by [`Observable::on`].
    pub struct HandlerId;
}

type Handler<E> = Rc<dyn Fn(&E)>;

struct Entry<K, E> {
    kind: K,
    handler: Handler<E>,
}

/// Table of event handlers, notified synchronously in registration order.
///
/// All methods take `&self`: handlers may register or remove other handlers
/// (or themselves) while a notification is running. A notification always
/// uses the handler list as it was when `notify` started.
pub struct Observable<K, E> {
    entries: RefCell<SlotMap<HandlerId, Entry<K, E>>>,
    order: RefCell<Vec<HandlerId>>,
}

impl<K: Copy + Eq + 'static, E: 'static> Observable<K, E> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(SlotMap::with_key()),
            order: RefCell::new(Vec::new()),
        }
    }

    /// Register `handler` for events of `kind`.
    pub fn on(&self, kind: K, handler: impl Fn(&E) + 'static) -> HandlerId {
        let id = self.entries.borrow_mut().insert(Entry {
            kind,
            handler: Rc::new(handler),
        });
        self.order.borrow_mut().push(id);
        id
    }

    /// Remove a handler. Returns `false` if it was not registered.
    pub fn off(&self, id: HandlerId) -> bool {
        let removed = self.entries.borrow_mut().remove(id).is_some();
        if removed {
            self.order.borrow_mut().retain(|&h| h != id);
        }
        removed
    }

    /// Remove every handler registered for `kind`.
    pub fn off_all(&self, kind: K) {
        let mut entries = self.entries.borrow_mut();
        entries.retain(|_, entry| entry.kind != kind);
        self.order.borrow_mut().retain(|&h| entries.contains_key(h));
    }

    /// Number of handlers registered for `kind`.
    pub fn handler_count(&self, kind: K) -> usize {
        self.entries
            .borrow()
            .values()
            .filter(|entry| entry.kind == kind)
            .count()
    }

    /// Whether any handler is registered for `kind`.
    pub fn has_listeners(&self, kind: K) -> bool {
        self.handler_count(kind) > 0
    }

    /// Call every handler registered for `kind` with `event`.
    ///
    /// Returns the number of handlers invoked.
    pub fn notify(&self, kind: K, event: &E) -> usize {
        let handlers: Vec<Handler<E>> = {
            let entries = self.entries.borrow();
            self.order
                .borrow()
                .iter()
                .filter_map(|&id| entries.get(id))
                .filter(|entry| entry.kind == kind)
                .map(|entry| Rc::clone(&entry.handler))
                .collect()
        };
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }
}

impl<K: Copy + Eq + 'static, E: 'static> Default for Observable<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, E> fmt::Debug for Observable<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("handlers", &self.order.borrow().len())
            .finish()
    }
}

//! Records page notifications in the order they fire.

use std::cell::RefCell;
use std::rc::Rc;

use crate::page::{Page, PageEventKind};

/// An ordered log of page notifications, shared across any number of pages.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Rc<RefCell<Vec<String>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every notification of `page` as its event name.
    pub fn attach(&self, page: &Page) {
        self.attach_with(page, None);
    }

    /// Record every notification of `page` as `label:eventName`.
    pub fn attach_labeled(&self, page: &Page, label: &str) {
        self.attach_with(page, Some(label.to_owned()));
    }

    /// Append a custom entry, e.g. from a close callback.
    pub fn push(&self, entry: impl Into<String>) {
        self.entries.borrow_mut().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    fn attach_with(&self, page: &Page, label: Option<String>) {
        for kind in PageEventKind::ALL {
            let entries = Rc::clone(&self.entries);
            let label = label.clone();
            page.on(kind, move |e| {
                let entry = match &label {
                    Some(label) => format!("{label}:{}", e.kind),
                    None => e.kind.to_string(),
                };
                entries.borrow_mut().push(entry);
            });
        }
    }
}

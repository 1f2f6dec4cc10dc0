//! ActionItems: the ordered item collection of an action bar.

use super::bar::{ActionBar, BarProperty};
use super::item::ActionItem;
use crate::error::{PageError, Result};

/// The ordered action items of one [`ActionBar`].
///
/// Every item in the collection points back at the bar; removed items have
/// that reference cleared. Failed operations change nothing.
#[derive(Debug, Clone)]
pub struct ActionItems {
    bar: ActionBar,
}

impl ActionItems {
    pub(crate) fn new(bar: ActionBar) -> Self {
        Self { bar }
    }

    /// Append an item and attach it to the bar.
    ///
    /// Fails with `InvalidArgument` if the item belongs to another bar or
    /// is already in this collection.
    pub fn add_item(&self, item: &ActionItem) -> Result<()> {
        self.check_not_foreign(item)?;
        if self.contains(item) {
            return Err(PageError::InvalidArgument(
                "action item is already in the collection".into(),
            ));
        }
        self.bar.inner.state.borrow_mut().items.push(item.clone());
        item.attach(&self.bar);
        self.invalidate();
        Ok(())
    }

    /// Detach and remove an item.
    ///
    /// Fails with `NotFound` if the item is not in the collection.
    pub fn remove_item(&self, item: &ActionItem) -> Result<()> {
        let index = self
            .bar
            .inner
            .state
            .borrow()
            .items
            .iter()
            .position(|i| i == item)
            .ok_or_else(|| PageError::NotFound("action item is not in the collection".into()))?;

        item.detach();
        self.bar.inner.state.borrow_mut().items.remove(index);
        self.invalidate();
        Ok(())
    }

    /// Replace the whole collection.
    ///
    /// Existing items are removed last-to-first, then `items` are added in
    /// order, even when an item appears in both lists. Fails with
    /// `InvalidArgument` if `items` lists the same item twice.
    pub fn set_items(&self, items: &[ActionItem]) -> Result<()> {
        for (index, item) in items.iter().enumerate() {
            self.check_not_foreign(item)?;
            if items[..index].contains(item) {
                return Err(PageError::InvalidArgument(format!(
                    "action item at index {index} is listed twice"
                )));
            }
        }

        while let Some(last) = self.last() {
            self.remove_item(&last)?;
        }
        for item in items {
            self.add_item(item)?;
        }
        self.invalidate();
        Ok(())
    }

    /// A copy of the items, in order.
    pub fn get_items(&self) -> Vec<ActionItem> {
        self.bar.inner.state.borrow().items.clone()
    }

    /// The item at `index`, or `None` when out of range.
    pub fn get_item_at(&self, index: usize) -> Option<ActionItem> {
        self.bar.inner.state.borrow().items.get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.bar.inner.state.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, item: &ActionItem) -> bool {
        self.bar.inner.state.borrow().items.contains(item)
    }

    fn last(&self) -> Option<ActionItem> {
        self.bar.inner.state.borrow().items.last().cloned()
    }

    fn check_not_foreign(&self, item: &ActionItem) -> Result<()> {
        match item.action_bar() {
            Some(owner) if !owner.ptr_eq(&self.bar) => Err(PageError::InvalidArgument(
                "action item is attached to another action bar".into(),
            )),
            _ => Ok(()),
        }
    }

    fn invalidate(&self) {
        let count = self.len();
        self.bar
            .property_changed(BarProperty::ActionItems, None, Some(count.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn texts(items: &ActionItems) -> Vec<String> {
        items.get_items().iter().map(|i| i.text()).collect()
    }

    #[test]
    fn add_appends_and_attaches() {
        let bar = ActionBar::new();
        let items = bar.action_items();
        let a = ActionItem::with_text("a");
        let b = ActionItem::with_text("b");

        items.add_item(&a).unwrap();
        items.add_item(&b).unwrap();

        assert_eq!(texts(&items), vec!["a", "b"]);
        assert_eq!(items.get_items().last(), Some(&b));
        assert_eq!(b.action_bar(), Some(bar.clone()));
    }

    #[test]
    fn remove_detaches() {
        let bar = ActionBar::new();
        let items = bar.action_items();
        let a = ActionItem::with_text("a");
        items.add_item(&a).unwrap();

        items.remove_item(&a).unwrap();
        assert!(items.is_empty());
        assert!(a.action_bar().is_none());
    }

    #[test]
    fn remove_missing_is_not_found_and_changes_nothing() {
        let bar = ActionBar::new();
        let items = bar.action_items();
        let a = ActionItem::with_text("a");
        items.add_item(&a).unwrap();

        let err = items.remove_item(&ActionItem::with_text("a")).unwrap_err();
        assert!(matches!(err, PageError::NotFound(_)));
        assert_eq!(items.len(), 1);
        assert_eq!(a.action_bar(), Some(bar));
    }

    #[test]
    fn add_item_of_other_bar_is_rejected() {
        let first = ActionBar::new();
        let second = ActionBar::new();
        let a = ActionItem::new();
        first.action_items().add_item(&a).unwrap();

        let err = second.action_items().add_item(&a).unwrap_err();
        assert!(matches!(err, PageError::InvalidArgument(_)));
        assert!(second.action_items().is_empty());
        assert_eq!(a.action_bar(), Some(first));
    }

    #[test]
    fn adding_an_item_twice_is_rejected() {
        let bar = ActionBar::new();
        let items = bar.action_items();
        let a = ActionItem::with_text("a");
        items.add_item(&a).unwrap();

        let err = items.add_item(&a).unwrap_err();
        assert!(matches!(err, PageError::InvalidArgument(_)));
        assert_eq!(items.len(), 1);

        items.remove_item(&a).unwrap();
        assert!(items.is_empty());
        assert!(a.action_bar().is_none());
    }

    #[test]
    fn set_items_with_repeated_item_changes_nothing() {
        let bar = ActionBar::new();
        let items = bar.action_items();
        let a = ActionItem::with_text("a");
        let b = ActionItem::with_text("b");
        items.add_item(&b).unwrap();

        let err = items.set_items(&[a.clone(), b.clone(), a.clone()]).unwrap_err();
        assert!(matches!(err, PageError::InvalidArgument(_)));
        assert_eq!(items.get_items(), vec![b.clone()]);
        assert!(a.action_bar().is_none());
        assert_eq!(b.action_bar(), Some(bar));
    }

    #[test]
    fn set_items_replaces_in_order() {
        let bar = ActionBar::new();
        let items = bar.action_items();
        let a = ActionItem::with_text("a");
        let b = ActionItem::with_text("b");
        let c = ActionItem::with_text("c");

        items.set_items(&[a.clone(), b.clone()]).unwrap();
        items.set_items(&[b.clone(), c.clone()]).unwrap();

        assert_eq!(items.get_items(), vec![b.clone(), c.clone()]);
        assert!(a.action_bar().is_none());
        assert_eq!(b.action_bar(), Some(bar.clone()));
        assert_eq!(c.action_bar(), Some(bar));
    }

    #[test]
    fn set_items_removes_then_adds_shared_items() {
        let bar = ActionBar::new();
        let items = bar.action_items();
        let a = ActionItem::with_text("a");
        let b = ActionItem::with_text("b");
        items.set_items(&[a.clone(), b.clone()]).unwrap();

        let log = Rc::new(RefCell::new(Vec::new()));
        let l = Rc::clone(&log);
        bar.on_property_change(BarProperty::ActionItems, move |change| {
            l.borrow_mut().push(change.new.clone().unwrap_or_default());
        });

        items.set_items(&[b.clone()]).unwrap();
        // remove b, remove a, add b, final invalidate
        assert_eq!(*log.borrow(), vec!["1", "0", "1", "1"]);
    }

    #[test]
    fn set_items_with_foreign_item_changes_nothing() {
        let bar = ActionBar::new();
        let other = ActionBar::new();
        let a = ActionItem::with_text("a");
        let foreign = ActionItem::with_text("x");
        bar.action_items().add_item(&a).unwrap();
        other.action_items().add_item(&foreign).unwrap();

        let err = bar.action_items().set_items(&[foreign.clone()]).unwrap_err();
        assert!(matches!(err, PageError::InvalidArgument(_)));
        assert_eq!(bar.action_items().get_items(), vec![a.clone()]);
        assert_eq!(a.action_bar(), Some(bar));
    }

    #[test]
    fn get_item_at_out_of_range_is_none() {
        let bar = ActionBar::new();
        let items = bar.action_items();
        let a = ActionItem::with_text("a");
        items.add_item(&a).unwrap();

        assert_eq!(items.get_item_at(0), Some(a));
        assert!(items.get_item_at(1).is_none());
    }

    #[test]
    fn get_items_is_a_copy() {
        let bar = ActionBar::new();
        let items = bar.action_items();
        items.add_item(&ActionItem::new()).unwrap();

        let mut copy = items.get_items();
        copy.clear();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn each_mutation_invalidates() {
        let bar = ActionBar::new();
        let count = Rc::new(std::cell::Cell::new(0));
        let c = Rc::clone(&count);
        bar.on_update(move |_| c.set(c.get() + 1));

        let a = ActionItem::new();
        bar.action_items().add_item(&a).unwrap();
        bar.action_items().remove_item(&a).unwrap();
        assert_eq!(count.get(), 2);
    }
}

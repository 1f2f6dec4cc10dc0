//! The view tree a page owns: its root view, the content view and any
//! views added below them.

use slotmap::{SecondaryMap, SlotMap};

use super::node::{ViewData, ViewId};

const NO_CHILDREN: &[ViewId] = &[];

/// A page's view subtree, backed by a slotmap arena.
///
/// Parent/child links live in secondary maps; removing a view removes its
/// whole subtree.
#[derive(Debug)]
pub struct ViewTree {
    nodes: SlotMap<ViewId, ViewData>,
    children: SecondaryMap<ViewId, Vec<ViewId>>,
    parent: SecondaryMap<ViewId, ViewId>,
    root: Option<ViewId>,
}

impl ViewTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
        }
    }

    /// Add a detached view. The first one added becomes the page's root
    /// view; later ones stay unlinked until removed.
    pub fn insert(&mut self, data: ViewData) -> ViewId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Add a view under `parent`, after its existing children. This is how
    /// content is placed under the page root and how views join the content.
    ///
    /// Returns `None` and leaves the tree untouched when `parent` is not a
    /// view of this page.
    pub fn insert_child(&mut self, parent: ViewId, data: ViewData) -> Option<ViewId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        self.children.get_mut(parent)?.push(id);
        Some(id)
    }

    /// Drop a view together with everything below it, as when a page's
    /// content is replaced. Returns the dropped view's data; its descendants'
    /// ids become stale.
    pub fn remove(&mut self, id: ViewId) -> Option<ViewData> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        if let Some(parent) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent) {
                siblings.retain(|&child| child != id);
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }

        let mut removed = None;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(kids) = self.children.remove(current) {
                stack.extend(kids);
            }
            self.parent.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed = data;
            }
        }
        removed
    }

    /// Parent of a view, if any.
    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.parent.get(id).copied()
    }

    /// Children of a view, in insertion order.
    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(NO_CHILDREN)
    }

    pub fn get(&self, id: ViewId) -> Option<&ViewData> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut ViewData> {
        self.nodes.get_mut(id)
    }

    /// The root view, if set.
    pub fn root(&self) -> Option<ViewId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first walk: a parent always precedes its children,
    /// and siblings keep insertion order.
    pub fn walk_depth_first(&self, start: ViewId) -> Vec<ViewId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        result
    }

    /// Find the first view (pre-order from `start`) whose id equals `id`.
    pub fn find_by_id(&self, start: ViewId, id: &str) -> Option<ViewId> {
        self.walk_depth_first(start)
            .into_iter()
            .find(|&v| self.nodes[v].id.as_deref() == Some(id))
    }
}

impl Default for ViewTree {
    fn default() -> Self {
        Self::new()
    }
}

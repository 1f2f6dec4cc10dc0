//! Resolving module names to pages.

use std::collections::HashMap;
use std::fmt;

use crate::error::{PageError, Result};
use crate::event::Value;
use crate::page::Page;

/// A navigation target: the module to resolve and the context handed to the
/// page's `on_navigating_to`.
#[derive(Clone, Default)]
pub struct NavigationEntry {
    pub module_name: String,
    pub context: Option<Value>,
}

impl NavigationEntry {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }
}

impl fmt::Debug for NavigationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationEntry")
            .field("module_name", &self.module_name)
            .field("has_context", &self.context.is_some())
            .finish()
    }
}

/// Produces a page instance for a module name.
pub trait PageResolver {
    fn resolve_page(&self, module_name: &str) -> Result<Page>;

    fn resolve_entry(&self, entry: &NavigationEntry) -> Result<Page> {
        self.resolve_page(&entry.module_name)
    }
}

type PageFactory = Box<dyn Fn() -> Page>;

/// A [`PageResolver`] backed by registered page factories. Every resolve
/// builds a fresh page.
#[derive(Default)]
pub struct ModuleRegistry {
    factories: HashMap<String, PageFactory>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory, replacing any previous one for `module_name`.
    pub fn register(&mut self, module_name: impl Into<String>, factory: impl Fn() -> Page + 'static) {
        let name = module_name.into();
        if self.factories.insert(name.clone(), Box::new(factory)).is_some() {
            log::debug!("replaced page factory for `{name}`");
        }
    }

    pub fn contains(&self, module_name: &str) -> bool {
        self.factories.contains_key(module_name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl PageResolver for ModuleRegistry {
    fn resolve_page(&self, module_name: &str) -> Result<Page> {
        let factory = self
            .factories
            .get(module_name)
            .ok_or_else(|| PageError::UnknownModule(module_name.to_owned()))?;
        let page = factory();
        log::trace!("resolved `{module_name}` to {}", page.id());
        Ok(page)
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("ModuleRegistry").field("modules", &names).finish()
    }
}

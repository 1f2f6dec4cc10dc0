//! Stylesheet handling: adding CSS, memoized application and reset.

use std::path::Path;

use super::Page;
use crate::config::MissingCssFile;
use crate::dom::ViewId;
use crate::error::{PageError, Result};

impl Page {
    /// The page's stylesheet text.
    pub fn css(&self) -> String {
        self.inner.scope.borrow().css()
    }

    /// Replace the page's stylesheet.
    pub fn set_css(&self, css: &str) {
        self.inner.scope.borrow_mut().set_css(css);
        self.refresh_css();
    }

    /// Append stylesheet text.
    pub fn add_css(&self, css: &str) {
        self.inner.scope.borrow_mut().add_css(css, None);
        self.refresh_css();
    }

    /// Append the contents of a CSS file.
    ///
    /// Relative names are resolved against the configured application root.
    /// A missing file is ignored or reported depending on
    /// [`PageConfig::missing_css_file`](crate::config::PageConfig::missing_css_file).
    pub fn add_css_file(&self, file_name: impl AsRef<Path>) -> Result<()> {
        let path = self.config().resolve_css_path(file_name);
        if !self.files().exists(&path) {
            return match self.config().missing_css_file {
                MissingCssFile::Ignore => {
                    log::debug!("{}: css file {} not found, ignoring", self.id(), path.display());
                    Ok(())
                }
                MissingCssFile::Error => Err(PageError::CssFileNotFound(path)),
            };
        }
        let css = self
            .files()
            .read_text(&path)
            .map_err(|source| PageError::CssFileRead {
                path: path.clone(),
                source,
            })?;
        self.inner.scope.borrow_mut().add_css(&css, Some(&path));
        self.refresh_css();
        Ok(())
    }

    /// Whether selectors have been applied since the last stylesheet change.
    pub fn is_css_applied(&self) -> bool {
        self.inner.core.borrow().css_applied
    }

    /// Apply the style scope to the page and every descendant, parents
    /// first. Does nothing if already applied.
    pub(crate) fn apply_css(&self) {
        if self.is_css_applied() {
            return;
        }
        let mut scope = self.inner.scope.borrow_mut();
        scope.ensure_selectors();

        let mut core = self.inner.core.borrow_mut();
        let root = core.root;
        for id in core.tree.walk_depth_first(root) {
            scope.apply_selectors(&mut core.tree, id);
        }
        core.css_applied = true;
        log::trace!("{}: css applied", self.id());
    }

    /// Discard CSS-origin style values on the page and every descendant.
    pub(crate) fn reset_css_values(&self) {
        self.mark_views(|v| {
            v.style.reset_css_values();
        });
    }

    fn refresh_css(&self) {
        if self.is_css_applied() {
            self.reset_css_values();
        }
        self.inner.core.borrow_mut().css_applied = false;
        if self.is_loaded() {
            self.apply_css();
        }
    }

    /// Style a view added after CSS was applied.
    pub(super) fn style_new_view(&self, view: ViewId) {
        if !self.is_css_applied() {
            return;
        }
        let scope = self.inner.scope.borrow();
        let mut core = self.inner.core.borrow_mut();
        for id in core.tree.walk_depth_first(view) {
            scope.apply_selectors(&mut core.tree, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::dom::ViewData;
    use crate::platform::DialogPlatform;
    use crate::testing::{MemoryFiles, RecordingScope};
    use std::rc::Rc;

    fn loaded_page() -> (Page, ViewId) {
        let page = Page::new(Rc::new(DialogPlatform::new()));
        let label = page.set_content(ViewData::new("Label")).unwrap();
        page.on_attached();
        (page, label)
    }

    #[test]
    fn css_is_applied_on_load() {
        let (page, label) = loaded_page();
        page.set_css("Label { color: red }");
        assert!(!page.is_css_applied());
        assert!(page.view(label).unwrap().style.get("color").is_none());

        page.on_loaded();
        assert!(page.is_css_applied());
        assert_eq!(page.view(label).unwrap().style.get("color"), Some("red"));
    }

    #[test]
    fn apply_is_memoized() {
        let (scope, stats) = RecordingScope::new();
        let page = Page::builder(Rc::new(DialogPlatform::new()))
            .style_scope(scope)
            .build();
        page.set_content(ViewData::new("Label")).unwrap();

        page.apply_css();
        page.apply_css();
        assert_eq!(stats.ensure_calls(), 1);
        assert_eq!(stats.applied_views().len(), 2);
    }

    #[test]
    fn apply_walks_parents_before_children() {
        let (scope, stats) = RecordingScope::new();
        let page = Page::builder(Rc::new(DialogPlatform::new()))
            .style_scope(scope)
            .build();
        let stack = page.set_content(ViewData::new("StackLayout")).unwrap();
        let a = page.add_view(stack, ViewData::new("Label")).unwrap();
        let b = page.add_view(stack, ViewData::new("Button")).unwrap();

        page.apply_css();
        assert_eq!(stats.applied_views(), vec![page.root_view(), stack, a, b]);
    }

    #[test]
    fn add_css_on_loaded_page_reapplies_immediately() {
        let (page, label) = loaded_page();
        page.set_css("Label { color: red }");
        page.on_loaded();

        page.add_css("Label { font-size: 20 }");
        assert!(page.is_css_applied());
        let style = page.view(label).unwrap().style;
        assert_eq!(style.get("color"), Some("red"));
        assert_eq!(style.get("font-size"), Some("20"));
    }

    #[test]
    fn changing_css_resets_old_values() {
        let (page, label) = loaded_page();
        page.set_css("Label { color: red }");
        page.on_loaded();

        page.set_css("Label { margin: 4 }");
        let style = page.view(label).unwrap().style;
        assert!(style.get("color").is_none());
        assert_eq!(style.get("margin"), Some("4"));
    }

    #[test]
    fn css_change_on_unloaded_page_is_deferred() {
        let (page, label) = loaded_page();
        page.set_css("Label { color: red }");
        page.on_loaded();
        page.on_unloaded();

        page.set_css("Label { color: blue }");
        assert!(!page.is_css_applied());
        assert!(page.view(label).unwrap().style.get("color").is_none());

        page.on_loaded();
        assert_eq!(page.view(label).unwrap().style.get("color"), Some("blue"));
    }

    #[test]
    fn local_values_survive_reset() {
        let (page, label) = loaded_page();
        page.with_view_mut(label, |v| v.style.set_local("color", "green"));
        page.set_css("Label { color: red; margin: 1 }");
        page.on_loaded();
        page.set_css("");

        let style = page.view(label).unwrap().style;
        assert_eq!(style.get("color"), Some("green"));
        assert!(style.get("margin").is_none());
    }

    #[test]
    fn views_added_after_apply_are_styled() {
        let (page, _) = loaded_page();
        page.set_css("Button { color: red }");
        page.on_loaded();

        let button = page.set_content(ViewData::new("Button")).unwrap();
        assert_eq!(page.view(button).unwrap().style.get("color"), Some("red"));
        assert!(page.view(button).unwrap().loaded);
    }

    #[test]
    fn add_css_file_resolves_against_app_root() {
        let files = Rc::new(MemoryFiles::new().with_file("/app/main.css", "Label { color: red }"));
        let page = Page::builder(Rc::new(DialogPlatform::new()))
            .files(files)
            .config(PageConfig::new().with_app_root("/app"))
            .build();

        page.add_css_file("main.css").unwrap();
        assert_eq!(page.css(), "Label { color: red }");
    }

    #[test]
    fn missing_css_file_is_ignored_by_default() {
        let page = Page::builder(Rc::new(DialogPlatform::new()))
            .files(Rc::new(MemoryFiles::new()))
            .build();
        page.add_css_file("missing.css").unwrap();
        assert_eq!(page.css(), "");
    }

    #[test]
    fn missing_css_file_can_be_an_error() {
        let page = Page::builder(Rc::new(DialogPlatform::new()))
            .files(Rc::new(MemoryFiles::new()))
            .config(
                PageConfig::new()
                    .with_app_root("/app")
                    .with_missing_css_file(crate::config::MissingCssFile::Error),
            )
            .build();
        let err = page.add_css_file("missing.css").unwrap_err();
        assert!(matches!(err, PageError::CssFileNotFound(p) if p == Path::new("/app/missing.css")));
    }
}

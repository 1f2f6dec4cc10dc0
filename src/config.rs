//! Page configuration: application root and CSS file policy.

use std::path::{Path, PathBuf};

/// What `Page::add_css_file` does when the resolved path does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingCssFile {
    /// Return `Ok(())` without touching the stylesheet.
    #[default]
    Ignore,
    /// Return [`PageError::CssFileNotFound`](crate::error::PageError::CssFileNotFound).
    Error,
}

/// Configuration shared by the pages of an application.
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Folder that relative CSS file names are resolved against.
    pub app_root: PathBuf,
    /// Behaviour for CSS files that do not exist.
    pub missing_css_file: MissingCssFile,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            app_root: PathBuf::from("."),
            missing_css_file: MissingCssFile::Ignore,
        }
    }
}

impl PageConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the application root folder (builder).
    pub fn with_app_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.app_root = root.into();
        self
    }

    /// Set the missing CSS file policy (builder).
    pub fn with_missing_css_file(mut self, policy: MissingCssFile) -> Self {
        self.missing_css_file = policy;
        self
    }

    /// Resolve a CSS file name against the application root.
    ///
    /// Paths that already live under the root are returned unchanged.
    pub fn resolve_css_path(&self, file_name: impl AsRef<Path>) -> PathBuf {
        let file_name = file_name.as_ref();
        if file_name.starts_with(&self.app_root) {
            file_name.to_path_buf()
        } else {
            self.app_root.join(file_name)
        }
    }
}

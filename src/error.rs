//! Error type shared by pages, action bars and the navigation frame.

use std::io;
use std::path::PathBuf;

use crate::page::PageId;

/// Errors raised by page, action bar and frame operations.
///
/// Every operation that returns one of these leaves its target unchanged.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// An argument violates an ownership rule (e.g. an item that already
    /// belongs to another action bar).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested element is not part of the collection.
    #[error("not found: {0}")]
    NotFound(String),

    /// The page already hosts a modal child.
    #[error("{0} is already presenting a modal page")]
    ModalAlreadyPresented(PageId),

    /// No page factory is registered under the module name.
    #[error("no page registered for module `{0}`")]
    UnknownModule(String),

    /// A CSS file did not exist and the config asks for an error.
    #[error("css file not found: {}", .0.display())]
    CssFileNotFound(PathBuf),

    /// A CSS file existed but could not be read.
    #[error("failed to read css file {}: {source}", path.display())]
    CssFileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `go_back` was called with an empty back stack.
    #[error("no page to navigate back to")]
    EmptyBackStack,
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, PageError>;

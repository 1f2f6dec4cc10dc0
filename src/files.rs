//! File access used to load CSS files.

use std::fs;
use std::io;
use std::path::Path;

/// Synchronous text file access.
pub trait FileSource {
    fn exists(&self, path: &Path) -> bool;
    fn read_text(&self, path: &Path) -> io::Result<String>;
}

/// [`FileSource`] backed by the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFiles;

impl FileSource for FsFiles {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

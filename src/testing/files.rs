//! In-memory file source.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::files::FileSource;

/// A [`FileSource`] over a fixed set of in-memory files.
#[derive(Debug, Clone, Default)]
pub struct MemoryFiles {
    files: HashMap<PathBuf, String>,
}

impl MemoryFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }
}

impl FileSource for MemoryFiles {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_registered_files() {
        let files = MemoryFiles::new().with_file("/app/a.css", "Label {}");
        assert!(files.exists(Path::new("/app/a.css")));
        assert_eq!(files.read_text(Path::new("/app/a.css")).unwrap(), "Label {}");

        let err = files.read_text(Path::new("/app/b.css")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}

//! `MockFs`: a path-to-text map implementing `FileSystem`.

use crate::collector::traits::FileSystem;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// Files held in memory, keyed by absolute path.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    files: HashMap<PathBuf, String>,
    /// Every ancestor directory of an added file.
    directories: HashSet<PathBuf>,
}

impl MockFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `content` at `path` and records every ancestor as a directory.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        for dir in path.ancestors().skip(1) {
            if !dir.as_os_str().is_empty() {
                self.directories.insert(dir.to_path_buf());
            }
        }
        self.files.insert(path, content.into());
    }

    /// Adds `<proc_path>/self/mountstats` with the given content.
    pub fn add_mountstats(&mut self, proc_path: &str, content: impl Into<String>) {
        self.add_file(format!("{}/self/mountstats", proc_path), content);
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        match self.files.get(path) {
            Some(content) => Ok(content.clone()),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.directories.contains(path)
    }
}

//! Filesystem seam used by the mountstats collector.
//!
//! `RealFs` reads the live `/proc`; `MockFs` serves canned mountstats text.

use std::io;
use std::path::Path;

/// Read-only view of the files the collector needs.
pub trait FileSystem: Send + Sync {
    /// Returns the whole file as text. Read failures are passed through untouched.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn exists(&self, path: &Path) -> bool;
}

/// `std::fs` backed implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

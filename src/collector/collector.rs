//! Collector that reads and decodes `/proc/self/mountstats`.

use std::path::PathBuf;

use tracing::debug;

use crate::collector::mountstats::{Mountstats, ParseError, parse_mountstats};
use crate::collector::traits::FileSystem;

/// Default location of the proc filesystem.
pub const DEFAULT_PROC_PATH: &str = "/proc";

/// Error type for collection failures.
#[derive(Debug)]
pub enum CollectError {
    /// I/O error reading the mountstats file.
    Io(std::io::Error),
    /// The mountstats content could not be decoded.
    Parse(ParseError),
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Io(e) => write!(f, "failed to read mountstats: {}", e),
            CollectError::Parse(e) => write!(f, "failed to parse mountstats: {}", e),
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::Io(e) => Some(e),
            CollectError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for CollectError {
    fn from(e: std::io::Error) -> Self {
        CollectError::Io(e)
    }
}

impl From<ParseError> for CollectError {
    fn from(e: ParseError) -> Self {
        CollectError::Parse(e)
    }
}

/// Reads `<proc_path>/self/mountstats` and decodes it.
///
/// The proc path is explicit per collector, so tests point it at a fixture
/// tree and concurrent collectors never share it.
pub struct MountstatsCollector<F: FileSystem> {
    fs: F,
    proc_path: String,
}

impl<F: FileSystem> MountstatsCollector<F> {
    /// Creates a new mountstats collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
        }
    }

    /// Path of the mountstats file this collector reads.
    pub fn mountstats_path(&self) -> PathBuf {
        PathBuf::from(format!("{}/self/mountstats", self.proc_path))
    }

    /// Returns `true` if the mountstats file exists.
    pub fn is_available(&self) -> bool {
        self.fs.exists(&self.mountstats_path())
    }

    /// Reads the raw mountstats text.
    pub fn read_raw(&self) -> Result<String, CollectError> {
        Ok(self.fs.read_to_string(&self.mountstats_path())?)
    }

    /// Reads and decodes the mountstats file into a fresh snapshot.
    pub fn collect(&self) -> Result<Mountstats, CollectError> {
        let content = self.read_raw()?;
        let stats = parse_mountstats(&content)?;

        debug!(
            path = %self.mountstats_path().display(),
            devices = stats.devices.len(),
            nfs = stats.nfs_devices().len(),
            "collected mountstats"
        );
        Ok(stats)
    }
}

//! NFS client statistics collector for Linux.
//!
//! This module reads `/proc/self/mountstats` and decodes it into a typed
//! snapshot, with support for mocking the filesystem in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    MountstatsCollector                      │
//! │  - <proc_path>/self/mountstats                              │
//! │                                                             │
//! │     read ──▶ parse_mountstats ──▶ Device ──▶ NfsDetail      │
//! │                                    │          ├ events      │
//! │                                    │          ├ bytes       │
//! │                                    │          ├ xprt        │
//! │                                    │          └ per-op      │
//! │                             ┌──────▼──────┐                 │
//! │                             │  FileSystem │ (trait)         │
//! │                             └──────┬──────┘                 │
//! └────────────────────────────────────┼────────────────────────┘
//!                              ┌───────┴───────┐
//!                       ┌──────▼──────┐ ┌──────▼──────┐
//!                       │   RealFs    │ │   MockFs    │
//!                       │ (Linux)     │ │ (Testing)   │
//!                       └─────────────┘ └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use nfsmountstats::collector::{MockFs, MountstatsCollector};
//!
//! let collector = MountstatsCollector::new(MockFs::nfs_client(), "/proc");
//! let stats = collector.collect().unwrap();
//! assert_eq!(stats.nfs_devices().len(), 3);
//! ```

#[allow(clippy::module_inception)]
mod collector;
pub mod mock;
pub mod mountstats;
pub mod traits;

pub use collector::{CollectError, DEFAULT_PROC_PATH, MountstatsCollector};
pub use mock::MockFs;
pub use traits::{FileSystem, RealFs};

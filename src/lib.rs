//! nfsmountstats - decoder for the Linux per-mount NFS client statistics.
//!
//! Provides:
//! - `collector` - reading and decoding `/proc/self/mountstats`
//! - `view` - report rows (ops, cache, transport) built from a decoded snapshot
//! - `fmt` - shared formatting helpers (bytes, duration, percent)

pub mod collector;
pub mod fmt;
pub mod view;

pub use collector::mountstats::{Device, Mountstats, ParseError, parse_mountstats};

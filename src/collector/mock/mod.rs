//! In-memory `/proc` stand-in with canned NFS client scenarios.

mod filesystem;
mod scenarios;

pub use filesystem::MockFs;

//! Report view models.
//!
//! Each view turns decoded devices into flat rows, one per NFS mount, sorted
//! by mountpoint. Rendering is left to the binary.

pub mod cache;
pub mod ops;
pub mod xprt;

pub use cache::{AttrCacheRow, DataCacheRow, build_attr_cache_rows, build_data_cache_rows};
pub use ops::{OpsRow, build_ops_rows};
pub use xprt::{XprtRow, build_xprt_rows};

//! Decoder for `/proc/self/mountstats`.
//!
//! Turns the per-mount NFS client statistics exported by the kernel into a
//! typed [`Mountstats`] snapshot. Decoding is pure and synchronous; see
//! [`crate::collector::MountstatsCollector`] for reading the file.

pub mod counters;
pub mod error;
pub mod nfs;
pub mod parser;
pub mod per_op;
pub mod transport;

pub use counters::{ByteCounters, EventCounters};
pub use error::ParseError;
pub use nfs::NfsDetail;
pub use parser::{Device, MountDetail, Mountstats, NFS_MOUNT_TYPES, parse_mountstats};
pub use per_op::RpcOpStat;
pub use transport::{RdmaCounters, TcpCounters, TransportCounters, TransportProtocol, UdpCounters};

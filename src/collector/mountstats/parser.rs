//! Parser for `/proc/self/mountstats`.
//!
//! The file is a sequence of device blocks. Each block opens with an identity
//! line and, for NFS mounts, continues with the statistics section:
//!
//! ```text
//! device rootfs mounted on / with fstype rootfs
//! device 10.0.2.31:/volume1/Public/docs mounted on /mnt/nfs1/docs with fstype nfs4 statvers=1.1
//!         opts:   rw,vers=4.2,...
//!         age:    247663
//!         ...
//! ```
//!
//! These are pure functions over the file content; reading the file is the
//! collector's job.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ParseError;
use super::nfs::{NfsDetail, parse_nfs_detail};

/// Keyword opening every device block.
const DEVICE_KEYWORD: &str = "device";

/// Marker expected as the third field of the identity line.
const MOUNTED_MARKER: &str = "mounted";

/// Minimum field count of the identity line:
/// `device <dev> mounted on <mountpoint> with fstype <type>`.
const DEVICE_LINE_MIN_FIELDS: usize = 8;

/// Mount types whose blocks carry NFS statistics.
pub const NFS_MOUNT_TYPES: [&str; 2] = ["nfs", "nfs4"];

// ============ Numeric fields ============

/// Converts a counter token into `u64`.
///
/// Only plain ASCII digits are accepted: no sign, no whitespace, no overflow.
pub fn parse_counter(token: &str) -> Result<u64, ParseError> {
    let malformed = || ParseError::MalformedNumber {
        token: token.to_string(),
    };
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    token.parse().map_err(|_| malformed())
}

/// Returns the counter at `idx` if the line was long enough to carry it, 0 otherwise.
///
/// Used for the trailing fields that only newer kernels print.
pub(crate) fn optional_counter(values: &[u64], idx: usize) -> u64 {
    if values.len() > idx { values[idx] } else { 0 }
}

// ============ Document ============

/// Decoded content of `/proc/self/mountstats`.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct Mountstats {
    /// Devices in file order.
    pub devices: Vec<Device>,
}

impl Mountstats {
    /// Returns the devices with an NFS mount type.
    pub fn nfs_devices(&self) -> Vec<&Device> {
        self.devices.iter().filter(|d| d.is_nfs()).collect()
    }

    /// Returns the NFS devices keyed by mountpoint.
    ///
    /// A duplicated mountpoint keeps the later device.
    pub fn nfs_mount_map(&self) -> HashMap<&str, &Device> {
        self.nfs_devices()
            .into_iter()
            .map(|d| (d.mountpoint.as_str(), d))
            .collect()
    }
}

/// Parses the whole `/proc/self/mountstats` content.
///
/// Decoding is all-or-nothing: the first malformed block fails the document.
pub fn parse_mountstats(content: &str) -> Result<Mountstats, ParseError> {
    let blocks = split_device_blocks(content);
    if blocks.is_empty() {
        return Err(ParseError::EmptyDocument);
    }

    let mut devices = Vec::with_capacity(blocks.len());
    for block in blocks {
        if block.trim().is_empty() {
            continue;
        }
        devices.push(parse_device(block)?);
    }

    debug!(devices = devices.len(), "parsed mountstats");
    Ok(Mountstats { devices })
}

/// Splits the content at every line whose first field is `device`.
///
/// Only line starts are considered, so paths such as `/sys/devices` never
/// split a block. Text before the first device line is returned as a block
/// of its own. Returns nothing when no device line exists.
fn split_device_blocks(content: &str) -> Vec<&str> {
    let mut starts = Vec::new();
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if line.split_whitespace().next() == Some(DEVICE_KEYWORD) {
            starts.push(offset);
        }
        offset += line.len();
    }

    let Some(&first) = starts.first() else {
        return Vec::new();
    };

    let mut blocks = Vec::with_capacity(starts.len() + 1);
    if first > 0 {
        blocks.push(&content[..first]);
    }
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(content.len());
        blocks.push(&content[start..end]);
    }
    blocks
}

// ============ Device ============

/// Mount-type specific part of a device block.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MountDetail {
    /// Decoded statistics of an `nfs`/`nfs4` mount.
    Nfs(Box<NfsDetail>),
    /// Lines following the identity line of any other mount type, verbatim.
    /// Empty when nothing follows.
    Other(String),
}

/// One mounted filesystem.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Device {
    /// Mounted device, e.g. `server:/export` for NFS.
    pub device: String,
    /// Local mountpoint.
    pub mountpoint: String,
    /// Filesystem type (`nfs4`, `ext4`, `proc`, ...).
    pub mount_type: String,
    /// Value of the `statvers=` token, when the kernel prints one.
    pub statvers: Option<String>,
    /// `Nfs` for `nfs`/`nfs4` mounts, `Other` for everything else.
    pub detail: MountDetail,
}

impl Device {
    pub fn is_nfs(&self) -> bool {
        NFS_MOUNT_TYPES.contains(&self.mount_type.as_str())
    }

    pub fn nfs(&self) -> Option<&NfsDetail> {
        match &self.detail {
            MountDetail::Nfs(nfs) => Some(nfs.as_ref()),
            _ => None,
        }
    }

    pub fn other_info(&self) -> Option<&str> {
        match &self.detail {
            MountDetail::Other(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

/// Parses one device block.
///
/// Format of the first line:
/// `device <dev> mounted on <mountpoint> with fstype <type> [statvers=<ver>]`
///
/// Everything after the first newline is the mount-type section. An NFS
/// block that ends in a newline always goes through the NFS decoder, so an
/// empty section fails; a block without any newline gets zeroed NFS stats.
pub fn parse_device(block: &str) -> Result<Device, ParseError> {
    let (first, rest) = match block.split_once('\n') {
        Some((first, rest)) => (first, Some(rest)),
        None => (block, None),
    };

    let malformed = |reason: &'static str| ParseError::MalformedDeviceLine {
        line: first.trim().to_string(),
        reason,
    };

    let fields: Vec<&str> = first.split_whitespace().collect();
    if fields.len() < DEVICE_LINE_MIN_FIELDS {
        return Err(malformed("expected at least 8 fields"));
    }
    if fields[0] != DEVICE_KEYWORD {
        return Err(malformed("line does not start with `device`"));
    }
    if fields[2] != MOUNTED_MARKER {
        return Err(malformed("third field is not `mounted`"));
    }

    let name = fields[1];
    let mount_type = fields[7];

    let detail = if NFS_MOUNT_TYPES.contains(&mount_type) {
        let nfs = match rest {
            Some(section) => {
                parse_nfs_detail(section).map_err(|e| ParseError::NfsDetailDecodeFailed {
                    device: name.to_string(),
                    source: Box::new(e),
                })?
            }
            None => NfsDetail::default(),
        };
        MountDetail::Nfs(Box::new(nfs))
    } else {
        MountDetail::Other(rest.unwrap_or_default().to_string())
    };

    let device = Device {
        device: name.to_string(),
        mountpoint: fields[4].to_string(),
        mount_type: mount_type.to_string(),
        statvers: fields[DEVICE_LINE_MIN_FIELDS..]
            .iter()
            .find_map(|f| f.strip_prefix("statvers="))
            .map(str::to_string),
        detail,
    };

    debug!(
        device = %device.device,
        mountpoint = %device.mountpoint,
        mount_type = %device.mount_type,
        "parsed device block"
    );
    Ok(device)
}

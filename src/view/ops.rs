//! READ/WRITE throughput view built from the per-op table.
//!
//! The per-op counters are what actually went over the wire, so throughput
//! is taken from them rather than from the `bytes:` line.

use crate::collector::mountstats::{Device, RpcOpStat};

/// One row per NFS mount.
#[derive(Debug, Clone, PartialEq)]
pub struct OpsRow {
    pub mountpoint: String,
    pub read_ops: u64,
    pub write_ops: u64,
    /// Bytes sent plus received for READ.
    pub read_bytes: u64,
    /// Bytes sent plus received for WRITE.
    pub write_bytes: u64,
    /// Average READ round trip in ms, `None` without operations.
    pub read_rtt_ms: Option<f64>,
    pub write_rtt_ms: Option<f64>,
}

fn avg_rtt(op: &RpcOpStat) -> Option<f64> {
    if op.operations == 0 {
        return None;
    }
    Some(op.response_time as f64 / op.operations as f64)
}

/// Builds rows for the given devices, sorted by mountpoint.
///
/// Devices without decoded NFS statistics are skipped.
pub fn build_ops_rows<'a>(devices: impl IntoIterator<Item = &'a Device>) -> Vec<OpsRow> {
    let mut rows: Vec<OpsRow> = devices
        .into_iter()
        .filter_map(|device| {
            let nfs = device.nfs()?;
            let read = nfs.op("READ").cloned().unwrap_or_default();
            let write = nfs.op("WRITE").cloned().unwrap_or_default();
            Some(OpsRow {
                mountpoint: device.mountpoint.clone(),
                read_ops: read.operations,
                write_ops: write.operations,
                read_bytes: read.total_bytes(),
                write_bytes: write.total_bytes(),
                read_rtt_ms: avg_rtt(&read),
                write_rtt_ms: avg_rtt(&write),
            })
        })
        .collect();
    rows.sort_by(|a, b| a.mountpoint.cmp(&b.mountpoint));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mountstats::parse_mountstats;
    use crate::collector::{MockFs, MountstatsCollector};

    #[test]
    fn test_build_ops_rows() {
        let stats = MountstatsCollector::new(MockFs::nfs_client(), "/proc")
            .collect()
            .unwrap();
        let rows = build_ops_rows(stats.nfs_devices());

        let mountpoints: Vec<&str> = rows.iter().map(|r| r.mountpoint.as_str()).collect();
        assert_eq!(mountpoints, ["/home", "/mnt/projects", "/scratch"]);

        let projects = &rows[1];
        assert_eq!(projects.read_ops, 484);
        assert_eq!(projects.write_ops, 513);
        assert_eq!(projects.read_bytes, 121212 + 11259100);
        assert_eq!(projects.write_bytes, 121747828 + 97008);
        assert_eq!(projects.read_rtt_ms, Some(2152.0 / 484.0));
    }

    const NO_READ_WRITE: &str = "\
device srv:/x mounted on /x with fstype nfs
\tage: 1
\tper-op statistics
\tNULL: 0 0 0 0 0 0 0 0
";

    #[test]
    fn test_missing_ops_are_zero() {
        let stats = parse_mountstats(NO_READ_WRITE).unwrap();
        let rows = build_ops_rows(stats.nfs_devices());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].read_ops, 0);
        assert_eq!(rows[0].read_rtt_ms, None);
    }

    #[test]
    fn test_non_nfs_devices_skipped() {
        let stats = parse_mountstats(
            "device /dev/sda1 mounted on /boot with fstype ext4\n\
             device srv:/x mounted on /x with fstype nfs",
        )
        .unwrap();
        let rows = build_ops_rows(&stats.devices);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].mountpoint, "/x");
        assert_eq!(rows[0].write_ops, 0);
    }
}

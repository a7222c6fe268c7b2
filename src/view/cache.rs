//! Data and attribute cache view built from the `bytes:` and `events:` lines.

use crate::collector::mountstats::{ByteCounters, Device};

/// Data cache efficiency of one mount.
#[derive(Debug, Clone, PartialEq)]
pub struct DataCacheRow {
    pub mountpoint: String,
    /// Bytes read by applications.
    pub app_read_bytes: u64,
    /// Bytes fetched from the server.
    pub server_read_bytes: u64,
    /// Bytes read with O_DIRECT, which bypass the cache.
    pub direct_read_bytes: u64,
    /// Share of application reads served from the page cache, in percent.
    pub hit_rate: f64,
}

/// Attribute cache activity of one mount.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrCacheRow {
    pub mountpoint: String,
    pub vfs_open: u64,
    pub inode_revalidate: u64,
    pub attr_invalidate: u64,
    pub data_invalidate: u64,
}

/// Percentage of application reads that did not reach the server.
///
/// `(app - (server - direct)) * 100 / app`, 0 when nothing was read.
pub fn data_cache_hit_rate(bytes: &ByteCounters) -> f64 {
    let app = bytes.normal_read_bytes;
    if app == 0 {
        return 0.0;
    }
    let client = bytes
        .server_read_bytes
        .saturating_sub(bytes.direct_read_bytes);
    app.saturating_sub(client) as f64 * 100.0 / app as f64
}

/// Builds data cache rows, sorted by mountpoint.
pub fn build_data_cache_rows<'a>(
    devices: impl IntoIterator<Item = &'a Device>,
) -> Vec<DataCacheRow> {
    let mut rows: Vec<DataCacheRow> = devices
        .into_iter()
        .filter_map(|device| {
            let bytes = &device.nfs()?.bytes;
            Some(DataCacheRow {
                mountpoint: device.mountpoint.clone(),
                app_read_bytes: bytes.normal_read_bytes,
                server_read_bytes: bytes.server_read_bytes,
                direct_read_bytes: bytes.direct_read_bytes,
                hit_rate: data_cache_hit_rate(bytes),
            })
        })
        .collect();
    rows.sort_by(|a, b| a.mountpoint.cmp(&b.mountpoint));
    rows
}

/// Builds attribute cache rows, sorted by mountpoint.
pub fn build_attr_cache_rows<'a>(
    devices: impl IntoIterator<Item = &'a Device>,
) -> Vec<AttrCacheRow> {
    let mut rows: Vec<AttrCacheRow> = devices
        .into_iter()
        .filter_map(|device| {
            let events = &device.nfs()?.events;
            Some(AttrCacheRow {
                mountpoint: device.mountpoint.clone(),
                vfs_open: events.vfs_open,
                inode_revalidate: events.inode_revalidate,
                attr_invalidate: events.attr_invalidate,
                data_invalidate: events.data_invalidate,
            })
        })
        .collect();
    rows.sort_by(|a, b| a.mountpoint.cmp(&b.mountpoint));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{MockFs, MountstatsCollector};

    #[test]
    fn test_hit_rate() {
        let bytes = ByteCounters {
            normal_read_bytes: 1000,
            server_read_bytes: 300,
            direct_read_bytes: 100,
            ..Default::default()
        };
        assert_eq!(data_cache_hit_rate(&bytes), 80.0);
    }

    #[test]
    fn test_hit_rate_without_reads() {
        assert_eq!(data_cache_hit_rate(&ByteCounters::default()), 0.0);
    }

    #[test]
    fn test_hit_rate_server_exceeds_app() {
        let bytes = ByteCounters {
            normal_read_bytes: 100,
            server_read_bytes: 400,
            ..Default::default()
        };
        assert_eq!(data_cache_hit_rate(&bytes), 0.0);
    }

    #[test]
    fn test_build_cache_rows() {
        let stats = MountstatsCollector::new(MockFs::nfs_client(), "/proc")
            .collect()
            .unwrap();

        let data = build_data_cache_rows(stats.nfs_devices());
        assert_eq!(data.len(), 3);
        assert_eq!(data[0].mountpoint, "/home");
        assert_eq!(data[0].app_read_bytes, 52428800);
        assert_eq!(data[0].hit_rate, 20.0);

        let attr = build_attr_cache_rows(stats.nfs_devices());
        assert_eq!(attr[1].mountpoint, "/mnt/projects");
        assert_eq!(attr[1].vfs_open, 6485);
        assert_eq!(attr[1].inode_revalidate, 10432);
        assert_eq!(attr[1].attr_invalidate, 1673);
        assert_eq!(attr[1].data_invalidate, 372);
    }
}

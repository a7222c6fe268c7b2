//! Transport view built from the `xprt:` line.

use crate::collector::mountstats::{Device, TransportCounters, TransportProtocol};

/// Transport summary of one mount.
#[derive(Debug, Clone, PartialEq)]
pub struct XprtRow {
    pub mountpoint: String,
    pub protocol: TransportProtocol,
    pub port: u64,
    pub sends: u64,
    pub receives: u64,
    pub bad_xids: u64,
    /// Average backlog queue length per send.
    pub avg_backlog: f64,
    /// Connection count, UDP has none.
    pub connects: Option<u64>,
    /// Highest RPC slot usage, TCP only.
    pub max_slots: Option<u64>,
    /// Average sending queue length per send, TCP only.
    pub avg_sending_queue: Option<f64>,
}

fn per_send(total: u64, sends: u64) -> f64 {
    if sends == 0 {
        0.0
    } else {
        total as f64 / sends as f64
    }
}

impl XprtRow {
    fn new(mountpoint: &str, xprt: &TransportCounters) -> Self {
        let sends = xprt.rpc_sends();
        let (connects, max_slots, avg_sending_queue) = match xprt {
            TransportCounters::Udp(_) => (None, None, None),
            TransportCounters::Tcp(tcp) => (
                Some(tcp.connect_count),
                Some(tcp.max_slots),
                Some(per_send(tcp.sending_queue, sends)),
            ),
            TransportCounters::Rdma(rdma) => (Some(rdma.connect_count), None, None),
        };

        Self {
            mountpoint: mountpoint.to_string(),
            protocol: xprt.protocol(),
            port: xprt.port(),
            sends,
            receives: xprt.rpc_receives(),
            bad_xids: xprt.bad_xids(),
            avg_backlog: per_send(xprt.backlog_util(), sends),
            connects,
            max_slots,
            avg_sending_queue,
        }
    }
}

/// Builds transport rows, sorted by mountpoint.
///
/// Mounts without an `xprt:` line are skipped.
pub fn build_xprt_rows<'a>(devices: impl IntoIterator<Item = &'a Device>) -> Vec<XprtRow> {
    let mut rows: Vec<XprtRow> = devices
        .into_iter()
        .filter_map(|device| {
            let xprt = device.nfs()?.transport.as_ref()?;
            Some(XprtRow::new(&device.mountpoint, xprt))
        })
        .collect();
    rows.sort_by(|a, b| a.mountpoint.cmp(&b.mountpoint));
    rows
}

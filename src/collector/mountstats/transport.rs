//! Decoder for the `xprt:` line of an NFS mount.
//!
//! The kernel prints a different counter set per transport, see
//! `net/sunrpc/xprtsock.c` (`xs_udp_print_stats`, `xs_tcp_print_stats`) and
//! `net/sunrpc/xprtrdma/transport.c` (`xprt_rdma_print_stats`).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ParseError;
use super::parser::{optional_counter, parse_counter};

/// Minimum token count for each transport: `xprt:` + protocol + counters.
const UDP_MIN_FIELDS: usize = 9;
const TCP_MIN_FIELDS: usize = 12;
const RDMA_MIN_FIELDS: usize = 21;

/// Transport protocol tag of an `xprt:` line.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransportProtocol {
    Udp,
    Tcp,
    Rdma,
}

impl TransportProtocol {
    pub fn as_str(self) -> &'static str {
        match self {
            TransportProtocol::Udp => "udp",
            TransportProtocol::Tcp => "tcp",
            TransportProtocol::Rdma => "rdma",
        }
    }
}

impl fmt::Display for TransportProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// UDP transport counters.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct UdpCounters {
    /// Local port used by the transport.
    pub port: u64,
    pub bind_count: u64,
    pub rpc_sends: u64,
    pub rpc_receives: u64,
    pub bad_xids: u64,
    /// Cumulative active request count, sampled at every send.
    pub inflight_sends: u64,
    /// Cumulative backlog queue length, sampled at every send.
    pub backlog_util: u64,
}

/// TCP transport counters.
///
/// The last three fields appeared with statvers 1.1 and are zero on older
/// kernels.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct TcpCounters {
    pub port: u64,
    pub bind_count: u64,
    pub connect_count: u64,
    /// Cumulative time spent connecting, in jiffies.
    pub connect_time: u64,
    /// Seconds since the transport was last used.
    pub idle_time: u64,
    pub rpc_sends: u64,
    pub rpc_receives: u64,
    pub bad_xids: u64,
    pub inflight_sends: u64,
    pub backlog_util: u64,
    /// Highest number of simultaneously used RPC slots.
    pub max_slots: u64,
    /// Sum of the sending queue length sampled at every send.
    pub sending_queue: u64,
    /// Sum of the pending queue length sampled at every send.
    pub pending_queue: u64,
}

/// RDMA transport counters.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct RdmaCounters {
    pub port: u64,
    pub bind_count: u64,
    pub connect_count: u64,
    pub connect_time: u64,
    pub idle_time: u64,
    pub rpc_sends: u64,
    pub rpc_receives: u64,
    pub bad_xids: u64,
    pub backlog_util: u64,
    pub read_chunks: u64,
    pub write_chunks: u64,
    pub reply_chunks: u64,
    pub total_rdma_request: u64,
    pub total_rdma_reply: u64,
    pub pullup: u64,
    pub fixup: u64,
    pub hardway: u64,
    pub failed_marshal: u64,
    pub bad_reply: u64,
}

/// Counters of the `xprt:` line, one variant per transport.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "protocol", rename_all = "lowercase")]
pub enum TransportCounters {
    Udp(UdpCounters),
    Tcp(TcpCounters),
    Rdma(RdmaCounters),
}

impl TransportCounters {
    pub fn protocol(&self) -> TransportProtocol {
        match self {
            TransportCounters::Udp(_) => TransportProtocol::Udp,
            TransportCounters::Tcp(_) => TransportProtocol::Tcp,
            TransportCounters::Rdma(_) => TransportProtocol::Rdma,
        }
    }

    pub fn port(&self) -> u64 {
        match self {
            TransportCounters::Udp(c) => c.port,
            TransportCounters::Tcp(c) => c.port,
            TransportCounters::Rdma(c) => c.port,
        }
    }

    pub fn rpc_sends(&self) -> u64 {
        match self {
            TransportCounters::Udp(c) => c.rpc_sends,
            TransportCounters::Tcp(c) => c.rpc_sends,
            TransportCounters::Rdma(c) => c.rpc_sends,
        }
    }

    pub fn rpc_receives(&self) -> u64 {
        match self {
            TransportCounters::Udp(c) => c.rpc_receives,
            TransportCounters::Tcp(c) => c.rpc_receives,
            TransportCounters::Rdma(c) => c.rpc_receives,
        }
    }

    pub fn bad_xids(&self) -> u64 {
        match self {
            TransportCounters::Udp(c) => c.bad_xids,
            TransportCounters::Tcp(c) => c.bad_xids,
            TransportCounters::Rdma(c) => c.bad_xids,
        }
    }

    pub fn backlog_util(&self) -> u64 {
        match self {
            TransportCounters::Udp(c) => c.backlog_util,
            TransportCounters::Tcp(c) => c.backlog_util,
            TransportCounters::Rdma(c) => c.backlog_util,
        }
    }
}

/// Parses an `xprt:` line, dispatching on the protocol tag.
///
/// Format: `xprt: <udp|tcp|rdma> <counters...>`
pub fn parse_transport(line: &str) -> Result<TransportCounters, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(ParseError::TooFewTransportFields {
            fields: fields.len(),
        });
    }

    match fields[1] {
        "udp" => parse_udp(&fields).map(TransportCounters::Udp),
        "tcp" => parse_tcp(&fields).map(TransportCounters::Tcp),
        "rdma" => parse_rdma(&fields).map(TransportCounters::Rdma),
        other => Err(ParseError::UnsupportedTransportProtocol {
            protocol: other.to_string(),
        }),
    }
}

fn malformed(fields: &[&str], detail: String) -> ParseError {
    ParseError::MalformedCounterLine {
        keyword: "xprt:".to_string(),
        fields: fields.len(),
        detail,
    }
}

/// Validates the `xprt: <protocol>` prefix and the minimum width, then
/// converts every counter after the prefix.
fn transport_counters(
    fields: &[&str],
    protocol: TransportProtocol,
    min_fields: usize,
) -> Result<Vec<u64>, ParseError> {
    if fields[0] != "xprt:" {
        return Err(malformed(
            fields,
            format!("expected `xprt:`, got `{}`", fields[0]),
        ));
    }
    if fields[1] != protocol.as_str() {
        return Err(malformed(
            fields,
            format!("expected `{}`, got `{}`", protocol, fields[1]),
        ));
    }
    if fields.len() < min_fields {
        return Err(malformed(
            fields,
            format!("{} needs at least {} fields", protocol, min_fields),
        ));
    }

    fields[2..]
        .iter()
        .enumerate()
        .map(|(idx, token)| {
            parse_counter(token)
                .map_err(|e| malformed(fields, format!("{} counter {}: {}", protocol, idx, e)))
        })
        .collect()
}

fn parse_udp(fields: &[&str]) -> Result<UdpCounters, ParseError> {
    let v = transport_counters(fields, TransportProtocol::Udp, UDP_MIN_FIELDS)?;

    Ok(UdpCounters {
        port: v[0],
        bind_count: v[1],
        rpc_sends: v[2],
        rpc_receives: v[3],
        bad_xids: v[4],
        inflight_sends: v[5],
        backlog_util: v[6],
    })
}

fn parse_tcp(fields: &[&str]) -> Result<TcpCounters, ParseError> {
    let v = transport_counters(fields, TransportProtocol::Tcp, TCP_MIN_FIELDS)?;

    // Kernels have been seen reporting only part of the statvers 1.1
    // extension, so each field is gated on its own position.
    Ok(TcpCounters {
        port: v[0],
        bind_count: v[1],
        connect_count: v[2],
        connect_time: v[3],
        idle_time: v[4],
        rpc_sends: v[5],
        rpc_receives: v[6],
        bad_xids: v[7],
        inflight_sends: v[8],
        backlog_util: v[9],
        max_slots: optional_counter(&v, 10),
        sending_queue: optional_counter(&v, 11),
        pending_queue: optional_counter(&v, 12),
    })
}

fn parse_rdma(fields: &[&str]) -> Result<RdmaCounters, ParseError> {
    let v = transport_counters(fields, TransportProtocol::Rdma, RDMA_MIN_FIELDS)?;

    Ok(RdmaCounters {
        port: v[0],
        bind_count: v[1],
        connect_count: v[2],
        connect_time: v[3],
        idle_time: v[4],
        rpc_sends: v[5],
        rpc_receives: v[6],
        bad_xids: v[7],
        backlog_util: v[8],
        read_chunks: v[9],
        write_chunks: v[10],
        reply_chunks: v[11],
        total_rdma_request: v[12],
        total_rdma_reply: v[13],
        pullup: v[14],
        fixup: v[15],
        hardway: v[16],
        failed_marshal: v[17],
        bad_reply: v[18],
    })
}

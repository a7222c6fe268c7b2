//! Decoder for the statistics section that follows an NFS `device` line.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::counters::{ByteCounters, EventCounters, parse_bytes, parse_events};
use super::error::ParseError;
use super::parser::parse_counter;
use super::per_op::{RpcOpStat, parse_per_op_stats};
use super::transport::{TransportCounters, parse_transport};

/// Decoded NFS statistics of one mount.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct NfsDetail {
    /// The `opts:` line, verbatim.
    pub opts: String,
    /// Seconds since the mount was created.
    pub age: u64,
    pub events: EventCounters,
    pub bytes: ByteCounters,
    /// `None` when the section has no `xprt:` line.
    pub transport: Option<TransportCounters>,
    /// Per-op table keyed by RPC operation name (`READ`, `GETATTR`, ...).
    pub per_op: HashMap<String, RpcOpStat>,
    /// Lines with an unrecognized leading keyword, keyed by that keyword.
    pub other: HashMap<String, String>,
}

impl NfsDetail {
    /// Looks up one mount option from the `opts:` line.
    ///
    /// Returns the value for `key=value` options and an empty string for
    /// flags such as `hard`.
    pub fn option(&self, key: &str) -> Option<&str> {
        let list = self.opts.strip_prefix("opts:").unwrap_or(&self.opts).trim();
        list.split(',').find_map(|opt| match opt.split_once('=') {
            Some((k, v)) if k == key => Some(v),
            None if opt == key => Some(""),
            _ => None,
        })
    }

    pub fn op(&self, name: &str) -> Option<&RpcOpStat> {
        self.per_op.get(name)
    }
}

/// Leading keywords of the lines in an NFS section.
enum LineKind<'a> {
    Age,
    Events,
    Bytes,
    Transport,
    Opts,
    PerOp,
    Other(&'a str),
}

impl<'a> LineKind<'a> {
    fn classify(keyword: &'a str) -> Self {
        match keyword {
            "age:" => LineKind::Age,
            "events:" => LineKind::Events,
            "bytes:" => LineKind::Bytes,
            "xprt:" => LineKind::Transport,
            "opts:" => LineKind::Opts,
            "per-op" => LineKind::PerOp,
            other => LineKind::Other(other),
        }
    }
}

/// Parses the NFS section of a device block (every line after the `device` line).
///
/// Format:
/// ```text
///         opts:   rw,vers=4.2,rsize=1048576,...
///         age:    247663
///         events: <counters>
///         bytes:  <counters>
///         xprt:   tcp <counters>
///         per-op statistics
///             NULL: <counters>
/// ```
pub fn parse_nfs_detail(content: &str) -> Result<NfsDetail, ParseError> {
    let lines: Vec<&str> = content.split('\n').collect();
    if lines.len() <= 1 {
        return Err(ParseError::EmptyNfsSection);
    }

    let mut detail = NfsDetail::default();

    for (idx, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        let Some(keyword) = line.split_whitespace().next() else {
            continue;
        };

        match LineKind::classify(keyword) {
            LineKind::Age => detail.age = parse_age(line)?,
            LineKind::Events => detail.events = parse_events(line)?,
            LineKind::Bytes => detail.bytes = parse_bytes(line)?,
            LineKind::Transport => detail.transport = Some(parse_transport(line)?),
            LineKind::Opts => detail.opts = line.to_string(),
            LineKind::PerOp => {
                // The table runs to the end of the section.
                detail.per_op = parse_per_op_stats(&lines[idx..])?;
                break;
            }
            LineKind::Other(keyword) => {
                trace!(keyword, "keeping unrecognized nfs line");
                detail.other.insert(keyword.to_string(), line.to_string());
            }
        }
    }

    Ok(detail)
}

fn parse_age(line: &str) -> Result<u64, ParseError> {
    let malformed = || ParseError::MalformedAge {
        line: line.to_string(),
    };
    let value = line.split_whitespace().nth(1).ok_or_else(malformed)?;
    parse_counter(value).map_err(|_| malformed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mountstats::transport::TransportProtocol;

    const NFS4_SECTION: &str = " opts:   rw,vers=4.2,rsize=1048576,wsize=1048576,namlen=255,acregmin=3,acregmax=60,acdirmin=30,acdirmax=60,hard,proto=tcp,timeo=600,retrans=2,sec=sys,clientaddr=10.0.6.15,local_lock=none
        age:    247663
        impl_id:        name='',domain='',date='0,0'
        caps:   caps=0xfffbc0b7,wtmult=512,dtsize=1048576,bsize=0,namlen=255
        nfsv4:  bm0=0xfdffafff,bm1=0xf9be3e,bm2=0x60800,acl=0x0,sessions,pnfs=not configured,lease_time=90,lease_expired=0
        sec:    flavor=1,pseudoflavor=1
        events: 10432 443365 372 1673 6485 2502 561227 206063 0 409 0 589 12831 232 9793 90 0 9695 0 10 205921 0 0 0 0 0 0
        bytes:  109502449 121343899 0 0 10952332 121346572 2910 29875
        RPC iostats version: 1.1  p/v: 100003/4 (nfs)
        xprt:   tcp 0 0 60 0 10 28063 28031 3 653569 0 31 9925 9193
        per-op statistics
                NULL: 1 1 0 44 24 2 3 6 0
                READ: 484 484 0 121212 11259100 23 2152 2190 0
               WRITE: 513 513 0 121747828 97008 260140 5367 265518 0
";

    #[test]
    fn test_parse_nfs4_section() {
        let detail = parse_nfs_detail(NFS4_SECTION).unwrap();

        assert_eq!(detail.age, 247663);
        assert!(detail.opts.starts_with("opts:"));
        assert!(detail.opts.ends_with("local_lock=none"));
        assert_eq!(detail.events.inode_revalidate, 10432);
        assert_eq!(detail.events.pnfs_write, 0);
        assert_eq!(detail.bytes.normal_read_bytes, 109502449);
        assert_eq!(detail.bytes.write_pages, 29875);

        let transport = detail.transport.as_ref().unwrap();
        assert_eq!(transport.protocol(), TransportProtocol::Tcp);
        let TransportCounters::Tcp(tcp) = transport else {
            panic!("expected tcp counters");
        };
        assert_eq!(tcp.max_slots, 31);
        assert_eq!(tcp.pending_queue, 9193);

        assert_eq!(detail.per_op.len(), 3);
        assert_eq!(detail.op("READ").unwrap().operations, 484);
        assert_eq!(detail.op("WRITE").unwrap().bytes_sent, 121747828);
    }

    #[test]
    fn test_unrecognized_lines_kept() {
        let detail = parse_nfs_detail(NFS4_SECTION).unwrap();

        assert_eq!(detail.other.len(), 5);
        assert_eq!(detail.other["sec:"], "sec:    flavor=1,pseudoflavor=1");
        assert!(detail.other["RPC"].starts_with("RPC iostats version: 1.1"));
        assert!(detail.other.contains_key("impl_id:"));
        assert!(detail.other.contains_key("caps:"));
        assert!(detail.other.contains_key("nfsv4:"));
    }

    #[test]
    fn test_unrecognized_keyword_last_wins() {
        let detail = parse_nfs_detail("sec: flavor=1\nsec: flavor=6\n").unwrap();
        assert_eq!(detail.other["sec:"], "sec: flavor=6");
    }

    #[test]
    fn test_per_op_stops_line_dispatch() {
        let section = "age: 5\nper-op statistics\nREAD: 1 1 0 10 10 0 0 0\nage: oops\n";
        let err = parse_nfs_detail(section).unwrap_err();
        // `age: oops` belongs to the table and is rejected as a per-op row.
        assert!(matches!(err, ParseError::MalformedPerOpLine { .. }));
    }

    #[test]
    fn test_mount_options() {
        let detail = parse_nfs_detail(NFS4_SECTION).unwrap();
        assert_eq!(detail.option("vers"), Some("4.2"));
        assert_eq!(detail.option("proto"), Some("tcp"));
        assert_eq!(detail.option("hard"), Some(""));
        assert_eq!(detail.option("soft"), None);
    }

    #[test]
    fn test_empty_section() {
        assert_eq!(
            parse_nfs_detail("").unwrap_err(),
            ParseError::EmptyNfsSection
        );
        assert_eq!(
            parse_nfs_detail("age: 10").unwrap_err(),
            ParseError::EmptyNfsSection
        );
    }

    #[test]
    fn test_malformed_age() {
        assert!(matches!(
            parse_nfs_detail("age: -1\n"),
            Err(ParseError::MalformedAge { .. })
        ));
        assert!(matches!(
            parse_nfs_detail("age:\n"),
            Err(ParseError::MalformedAge { .. })
        ));
    }

    #[test]
    fn test_sub_decoder_failure_propagates() {
        let section = "age: 5\nbytes: 1 2 3\n";
        assert!(matches!(
            parse_nfs_detail(section),
            Err(ParseError::MalformedCounterLine { .. })
        ));

        let section = "xprt: sctp 1 2 3\n";
        assert!(matches!(
            parse_nfs_detail(section),
            Err(ParseError::UnsupportedTransportProtocol { .. })
        ));
    }
}

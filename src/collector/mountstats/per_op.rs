//! Decoder for the `per-op statistics` table of an NFS mount.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::ParseError;
use super::parser::{optional_counter, parse_counter};

/// Header line that opens the per-op table.
pub const PER_OP_HEADER: &str = "per-op statistics";

/// Counters that every per-op row carries, statvers 1.0 included.
const PER_OP_MIN_COUNTERS: usize = 8;

/// Statistics of one RPC operation (one row of the per-op table).
///
/// Times are cumulative milliseconds.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct RpcOpStat {
    pub operations: u64,
    pub transmissions: u64,
    pub major_timeouts: u64,
    pub bytes_sent: u64,
    pub bytes_received: u64,
    pub queue_time: u64,
    pub response_time: u64,
    pub total_request_time: u64,
    /// Operations that completed with an error status. Newer kernels only.
    pub errors: u64,
}

impl RpcOpStat {
    /// Bytes moved on the wire in both directions.
    pub fn total_bytes(&self) -> u64 {
        self.bytes_sent.saturating_add(self.bytes_received)
    }
}

/// Parses the per-op table.
///
/// `lines` starts at the `per-op statistics` header and runs to the end of
/// the NFS section. Each row looks like `READ: 484 484 0 121212 11259100 23 2152 2190 [0]`.
/// A repeated operation name keeps the last row.
pub fn parse_per_op_stats(lines: &[&str]) -> Result<HashMap<String, RpcOpStat>, ParseError> {
    if lines.len() <= 1 {
        return Err(ParseError::TooFewPerOpLines { lines: lines.len() });
    }

    let mut stats = HashMap::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() || line == PER_OP_HEADER {
            continue;
        }

        let mut parts = line.split_whitespace();
        let Some(label) = parts.next() else {
            continue;
        };
        let op = label.strip_suffix(':').unwrap_or(label);

        let counters = parts
            .map(parse_counter)
            .collect::<Result<Vec<u64>, ParseError>>()
            .map_err(|e| ParseError::MalformedPerOpLine {
                line: line.to_string(),
                detail: e.to_string(),
            })?;

        if counters.len() < PER_OP_MIN_COUNTERS {
            return Err(ParseError::MalformedPerOpLine {
                line: line.to_string(),
                detail: format!(
                    "expected at least {} counters, got {}",
                    PER_OP_MIN_COUNTERS,
                    counters.len()
                ),
            });
        }

        stats.insert(
            op.to_string(),
            RpcOpStat {
                operations: counters[0],
                transmissions: counters[1],
                major_timeouts: counters[2],
                bytes_sent: counters[3],
                bytes_received: counters[4],
                queue_time: counters[5],
                response_time: counters[6],
                total_request_time: counters[7],
                errors: optional_counter(&counters, 8),
            },
        );
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NFSV4_TABLE: &str = "\tper-op statistics
\t        NULL: 1 1 0 44 24 2 3 6 0
\t        READ: 484 484 0 121212 11259100 23 2152 2190 0
\t       WRITE: 513 513 0 121747828 97008 260140 5367 265518 0
\t        OPEN: 916 916 0 310636 251444 56 1957 2033 374
\tOPEN_DOWNGRADE: 1 1 0 252 112 0 2 2 0
\t     GETATTR: 13920 13924 0 3187904 3394844 6668 27030 34563 7
\t      LOOKUP: 5109 5109 0 1274016 1197256 96 9244 9647 1728
\tBIND_CONN_TO_SESSION: 0 0 0 0 0 0 0 0 0
";

    const NFSV3_TABLE: &str = "per-op statistics
        NULL: 0 0 0 0 0 0 0 0
     GETATTR: 2183 2183 0 244352 244496 13 1227 1283
        READ: 34 34 0 4352 2102912 0 21 21
";

    fn lines(text: &str) -> Vec<&str> {
        text.split('\n').collect()
    }

    #[test]
    fn test_parse_nfsv4_table() {
        let stats = parse_per_op_stats(&lines(NFSV4_TABLE)).unwrap();
        assert_eq!(stats.len(), 8);

        let read = &stats["READ"];
        assert_eq!(read.operations, 484);
        assert_eq!(read.transmissions, 484);
        assert_eq!(read.bytes_received, 11259100);
        assert_eq!(read.errors, 0);

        let write = &stats["WRITE"];
        assert_eq!(write.operations, 513);
        assert_eq!(write.bytes_sent, 121747828);
        assert_eq!(write.total_request_time, 265518);

        assert_eq!(stats["OPEN"].errors, 374);
        assert_eq!(stats["LOOKUP"].errors, 1728);
        assert!(stats.contains_key("BIND_CONN_TO_SESSION"));
        assert!(!stats.contains_key(PER_OP_HEADER));
    }

    #[test]
    fn test_parse_nfsv3_table_without_errors() {
        let stats = parse_per_op_stats(&lines(NFSV3_TABLE)).unwrap();
        assert_eq!(stats.len(), 3);

        let getattr = &stats["GETATTR"];
        assert_eq!(getattr.operations, 2183);
        assert_eq!(getattr.queue_time, 13);
        assert_eq!(getattr.response_time, 1227);
        assert_eq!(getattr.total_request_time, 1283);
        assert_eq!(getattr.errors, 0);
        assert_eq!(stats["READ"].total_bytes(), 4352 + 2102912);
    }

    #[test]
    fn test_repeated_op_keeps_last() {
        let table = "per-op statistics\nREAD: 1 1 0 10 10 0 0 0 0\nREAD: 2 2 0 20 20 0 0 0 5\n";
        let stats = parse_per_op_stats(&lines(table)).unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats["READ"].operations, 2);
        assert_eq!(stats["READ"].errors, 5);
    }

    #[test]
    fn test_too_few_lines() {
        assert_eq!(
            parse_per_op_stats(&["per-op statistics"]).unwrap_err(),
            ParseError::TooFewPerOpLines { lines: 1 }
        );
        assert_eq!(
            parse_per_op_stats(&[]).unwrap_err(),
            ParseError::TooFewPerOpLines { lines: 0 }
        );
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let stats = parse_per_op_stats(&lines("per-op statistics\n\n")).unwrap();
        assert!(stats.is_empty());
    }

    #[test]
    fn test_non_numeric_counter() {
        let table = "per-op statistics\nREAD: 1 1 0 10 ten 0 0 0\n";
        let err = parse_per_op_stats(&lines(table)).unwrap_err();
        match err {
            ParseError::MalformedPerOpLine { line, detail } => {
                assert!(line.starts_with("READ:"));
                assert!(detail.contains("ten"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_short_row() {
        let table = "per-op statistics\nREAD: 1 1 0 10 10 0 0\n";
        assert!(matches!(
            parse_per_op_stats(&lines(table)),
            Err(ParseError::MalformedPerOpLine { .. })
        ));
    }
}

//! Decoders for the `events:` and `bytes:` lines of an NFS mount.

use serde::{Deserialize, Serialize};

use super::error::ParseError;
use super::parser::{optional_counter, parse_counter};

/// Minimum token count of an `events:` line (keyword + 25 counters).
const EVENTS_MIN_FIELDS: usize = 26;

/// Exact token count of a `bytes:` line (keyword + 8 counters).
const BYTES_FIELDS: usize = 9;

/// VFS-level event counters from the `events:` line.
///
/// Source: `fs/nfs/iostat.h` (`enum nfs_stat_eventcounters`).
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct EventCounters {
    /// Inode attribute revalidations forced by the attribute cache timing out.
    pub inode_revalidate: u64,
    /// Dentry revalidations.
    pub dentry_revalidate: u64,
    /// Inode data cache invalidations.
    pub data_invalidate: u64,
    /// Inode attribute cache invalidations.
    pub attr_invalidate: u64,
    pub vfs_open: u64,
    pub vfs_lookup: u64,
    pub vfs_access: u64,
    pub vfs_update_page: u64,
    pub vfs_read_page: u64,
    pub vfs_read_pages: u64,
    pub vfs_write_page: u64,
    pub vfs_write_pages: u64,
    pub vfs_getdents: u64,
    pub vfs_setattr: u64,
    pub vfs_flush: u64,
    pub vfs_fsync: u64,
    pub vfs_lock: u64,
    pub vfs_release: u64,
    pub congestion_wait: u64,
    /// setattr calls that truncated the file.
    pub setattr_trunc: u64,
    /// Writes that extended the file.
    pub extend_write: u64,
    pub silly_rename: u64,
    pub short_read: u64,
    pub short_write: u64,
    /// Server replied NFS3ERR_JUKEBOX / NFS4ERR_DELAY.
    pub delay: u64,
    /// pNFS reads. Only reported by NFSv4.1+ kernels.
    pub pnfs_read: u64,
    /// pNFS writes. Only reported by NFSv4.1+ kernels.
    pub pnfs_write: u64,
}

/// Byte counters from the `bytes:` line.
///
/// Source: `fs/nfs/iostat.h` (`enum nfs_stat_bytecounters`).
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct ByteCounters {
    /// Bytes read by applications via read(2).
    pub normal_read_bytes: u64,
    /// Bytes written by applications via write(2).
    pub normal_write_bytes: u64,
    /// Bytes read with O_DIRECT.
    pub direct_read_bytes: u64,
    /// Bytes written with O_DIRECT.
    pub direct_write_bytes: u64,
    /// Bytes read from the server with READ requests.
    pub server_read_bytes: u64,
    /// Bytes written to the server with WRITE requests.
    pub server_write_bytes: u64,
    pub read_pages: u64,
    pub write_pages: u64,
}

/// Converts the counters of a keyword line, left to right.
fn parse_line_counters(keyword: &str, fields: &[&str]) -> Result<Vec<u64>, ParseError> {
    fields[1..]
        .iter()
        .map(|token| {
            parse_counter(token).map_err(|e| ParseError::MalformedCounterLine {
                keyword: keyword.to_string(),
                fields: fields.len(),
                detail: e.to_string(),
            })
        })
        .collect()
}

fn check_keyword(keyword: &str, fields: &[&str]) -> Result<(), ParseError> {
    if fields[0] != keyword {
        return Err(ParseError::MalformedCounterLine {
            keyword: keyword.to_string(),
            fields: fields.len(),
            detail: format!("expected `{}`, got `{}`", keyword, fields[0]),
        });
    }
    Ok(())
}

/// Parses an `events:` line.
///
/// Format: `events: <25 counters> [pnfs_read [pnfs_write]]`
pub fn parse_events(line: &str) -> Result<EventCounters, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < EVENTS_MIN_FIELDS {
        return Err(ParseError::MalformedCounterLine {
            keyword: "events:".to_string(),
            fields: fields.len(),
            detail: format!("expected at least {} fields", EVENTS_MIN_FIELDS),
        });
    }
    check_keyword("events:", &fields)?;

    let v = parse_line_counters("events:", &fields)?;

    Ok(EventCounters {
        inode_revalidate: v[0],
        dentry_revalidate: v[1],
        data_invalidate: v[2],
        attr_invalidate: v[3],
        vfs_open: v[4],
        vfs_lookup: v[5],
        vfs_access: v[6],
        vfs_update_page: v[7],
        vfs_read_page: v[8],
        vfs_read_pages: v[9],
        vfs_write_page: v[10],
        vfs_write_pages: v[11],
        vfs_getdents: v[12],
        vfs_setattr: v[13],
        vfs_flush: v[14],
        vfs_fsync: v[15],
        vfs_lock: v[16],
        vfs_release: v[17],
        congestion_wait: v[18],
        setattr_trunc: v[19],
        extend_write: v[20],
        silly_rename: v[21],
        short_read: v[22],
        short_write: v[23],
        delay: v[24],
        pnfs_read: optional_counter(&v, 25),
        pnfs_write: optional_counter(&v, 26),
    })
}

/// Parses a `bytes:` line.
///
/// Format: `bytes: <8 counters>`. The width never varies across kernels.
pub fn parse_bytes(line: &str) -> Result<ByteCounters, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != BYTES_FIELDS {
        return Err(ParseError::MalformedCounterLine {
            keyword: "bytes:".to_string(),
            fields: fields.len(),
            detail: format!("expected exactly {} fields", BYTES_FIELDS),
        });
    }
    check_keyword("bytes:", &fields)?;

    let v = parse_line_counters("bytes:", &fields)?;

    Ok(ByteCounters {
        normal_read_bytes: v[0],
        normal_write_bytes: v[1],
        direct_read_bytes: v[2],
        direct_write_bytes: v[3],
        server_read_bytes: v[4],
        server_write_bytes: v[5],
        read_pages: v[6],
        write_pages: v[7],
    })
}

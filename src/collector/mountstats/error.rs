//! Error type for `/proc/self/mountstats` decoding.

use std::fmt;

/// Error type for mountstats decoding failures.
///
/// Every decode step is strict: the first violation aborts the enclosing
/// decode and is returned with enough context to locate the offending text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input contains no `device` line at all.
    EmptyDocument,
    /// The identity line of a device block does not follow
    /// `device <dev> mounted on <path> with fstype <type>`.
    MalformedDeviceLine { line: String, reason: &'static str },
    /// The NFS section of a device block failed to decode.
    NfsDetailDecodeFailed {
        device: String,
        source: Box<ParseError>,
    },
    /// The NFS section has one line or fewer.
    EmptyNfsSection,
    /// The `age:` line is missing its value or the value is not numeric.
    MalformedAge { line: String },
    /// An `events:`, `bytes:` or `xprt:` line has the wrong shape.
    MalformedCounterLine {
        keyword: String,
        fields: usize,
        detail: String,
    },
    /// An `xprt:` line has fewer than 3 tokens.
    TooFewTransportFields { fields: usize },
    /// An `xprt:` line names a protocol other than udp, tcp or rdma.
    UnsupportedTransportProtocol { protocol: String },
    /// The per-op table has one line or fewer.
    TooFewPerOpLines { lines: usize },
    /// A per-op row is short or carries a non-numeric counter.
    MalformedPerOpLine { line: String, detail: String },
    /// A token is not an unsigned 64-bit decimal integer.
    MalformedNumber { token: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyDocument => {
                write!(f, "no `device` line found, not a mountstats document")
            }
            ParseError::MalformedDeviceLine { line, reason } => {
                write!(f, "malformed device line ({}): `{}`", reason, line)
            }
            ParseError::NfsDetailDecodeFailed { device, source } => {
                write!(f, "failed to decode NFS section of {}: {}", device, source)
            }
            ParseError::EmptyNfsSection => write!(f, "empty NFS section"),
            ParseError::MalformedAge { line } => write!(f, "malformed age line: `{}`", line),
            ParseError::MalformedCounterLine {
                keyword,
                fields,
                detail,
            } => write!(
                f,
                "malformed `{}` line with {} fields: {}",
                keyword, fields, detail
            ),
            ParseError::TooFewTransportFields { fields } => write!(
                f,
                "xprt line has {} fields, expected at least 3",
                fields
            ),
            ParseError::UnsupportedTransportProtocol { protocol } => {
                write!(f, "unsupported transport protocol: {}", protocol)
            }
            ParseError::TooFewPerOpLines { lines } => write!(
                f,
                "per-op statistics has {} lines, expected more than 1",
                lines
            ),
            ParseError::MalformedPerOpLine { line, detail } => {
                write!(f, "malformed per-op line `{}`: {}", line, detail)
            }
            ParseError::MalformedNumber { token } => {
                write!(f, "not an unsigned 64-bit integer: `{}`", token)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::NfsDetailDecodeFailed { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_nfs_detail_failure_exposes_source() {
        let err = ParseError::NfsDetailDecodeFailed {
            device: "srv:/export".to_string(),
            source: Box::new(ParseError::EmptyNfsSection),
        };

        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "empty NFS section");
        assert!(err.to_string().contains("srv:/export"));
    }

    #[test]
    fn test_display_names_protocol() {
        let err = ParseError::UnsupportedTransportProtocol {
            protocol: "foo".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported transport protocol: foo");
        assert!(err.source().is_none());
    }
}

//! Error types for trace loading.
//!
//! The trace reader validates the whole input before the engine runs; the
//! pipeline itself has no recoverable failures, so every error the crate can
//! surface originates here.

use std::fmt;
use std::io;

/// Error raised while loading or parsing an instruction trace.
#[derive(Debug)]
pub enum TraceError {
    /// The trace file could not be opened.
    Open {
        /// Path the caller tried to open.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A line could not be read from the trace file.
    Read {
        /// 1-based line number where reading failed.
        line_no: usize,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A line did not match the `<pc> <op> <dst> <src1> <src2>` format.
    Malformed {
        /// 1-based line number of the offending line.
        line_no: usize,
        /// The offending line, verbatim.
        line: String,
        /// Which field was rejected.
        reason: &'static str,
    },
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::Open { path, source } => {
                write!(f, "cannot open trace file '{}': {}", path, source)
            }
            TraceError::Read { line_no, source } => {
                write!(f, "read error at trace line {}: {}", line_no, source)
            }
            TraceError::Malformed {
                line_no,
                line,
                reason,
            } => {
                write!(f, "malformed trace line {} ({}): '{}'", line_no, reason, line)
            }
        }
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TraceError::Open { source, .. } | TraceError::Read { source, .. } => Some(source),
            TraceError::Malformed { .. } => None,
        }
    }
}

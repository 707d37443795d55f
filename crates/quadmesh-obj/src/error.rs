//! Error types for OBJ import and export.

use quadmesh_topo::TopologyError;
use thiserror::Error;

/// Errors that can occur while reading or writing OBJ files.
#[derive(Error, Debug)]
pub enum ObjError {
    /// I/O error reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record does not have the expected shape.
    #[error("line {line}: {message}")]
    Parse {
        /// Line number (1-indexed).
        line: usize,
        /// Error message.
        message: String,
    },

    /// A face record without exactly four corners.
    #[error("line {line}: face has {count} corners, expected 4")]
    NotQuad {
        /// Line number (1-indexed).
        line: usize,
        /// Number of corners found.
        count: usize,
    },

    /// A face refers to a vertex or normal that is not declared.
    #[error("line {line}: {kind} index {index} out of range (1..={len})")]
    IndexOutOfRange {
        /// Line number (1-indexed).
        line: usize,
        /// `"vertex"` or `"normal"`.
        kind: &'static str,
        /// The index as written in the file.
        index: i64,
        /// Number of declared elements.
        len: usize,
    },

    /// A record produced invalid mesh topology.
    #[error("line {line}: {source}")]
    Topology {
        /// Line number (1-indexed).
        line: usize,
        /// Underlying topology error.
        source: TopologyError,
    },

    /// Rescaling the imported mesh failed.
    #[error("cannot unitize mesh: {0}")]
    Unitize(#[source] TopologyError),
}

impl ObjError {
    /// Create a parse error.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result type for OBJ operations.
pub type Result<T> = std::result::Result<T, ObjError>;

//! Graph-subsystem error type.

use std::path::PathBuf;

use thiserror::Error;

use ad_core::VertexId;

/// Errors produced by `ad-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Name/matrix count mismatch, unparsable entry, or a negative weight.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("no path from {from} to {to}")]
    NoPathFound { from: VertexId, to: VertexId },

    #[error("vertex {vertex} out of range (graph has {count} vertices)")]
    VertexOutOfRange { vertex: VertexId, count: usize },

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;

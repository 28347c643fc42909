use ad_core::{UnitId, VertexId};
use ad_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("unit {0} is not registered")]
    UnitNotFound(UnitId),

    #[error("{what} vertex {vertex} out of range (graph has {count} vertices)")]
    VertexOutOfRange {
        what:   &'static str,
        vertex: VertexId,
        count:  usize,
    },

    #[error("routing failed: {0}")]
    Routing(#[from] GraphError),
}

pub type FleetResult<T> = Result<T, FleetError>;

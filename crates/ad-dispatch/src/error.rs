use ad_core::{CoreError, VertexId};
use ad_fleet::FleetError;
use ad_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no ambulance can reach the patient at {vertex}")]
    NoneAvailable { vertex: VertexId },

    #[error("request vertex {vertex} out of range (graph has {count} vertices)")]
    VertexOutOfRange { vertex: VertexId, count: usize },

    #[error("configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("routing error: {0}")]
    Graph(#[from] GraphError),

    #[error("fleet error: {0}")]
    Fleet(#[from] FleetError),
}

impl DispatchError {
    /// `true` for conditions a session reports and moves past: nobody can
    /// reach the patient, a bad location index, or no route.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DispatchError::NoneAvailable { .. }
                | DispatchError::VertexOutOfRange { .. }
                | DispatchError::Graph(GraphError::NoPathFound { .. })
        )
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;

//! Per-unit state.

use ad_core::{UnitId, VertexId};

/// One ambulance.
///
/// A unit is either **available** (can be assigned) or **busy** (on a run).
/// Its `vertex` is where it currently stands; after a dispatch that is the
/// request vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub id:        UnitId,
    pub vertex:    VertexId,
    pub available: bool,
}

impl Unit {
    /// An available unit stationed at `vertex`.
    #[inline]
    pub fn stationed(id: UnitId, vertex: VertexId) -> Self {
        Self { id, vertex, available: true }
    }

    /// Human-readable status, e.g. for a status table.
    pub fn status(&self) -> &'static str {
        if self.available { "Available" } else { "Busy" }
    }
}

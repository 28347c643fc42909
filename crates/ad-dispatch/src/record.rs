//! Request and per-dispatch record types.

use ad_core::{Priority, UnitId, VertexId};
use ad_fleet::HospitalMatch;

/// An incoming call: where the patient is and how urgent it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub vertex:   VertexId,
    pub priority: Priority,
}

impl Request {
    pub fn new(vertex: VertexId, priority: Priority) -> Self {
        Self { vertex, priority }
    }
}

/// Outcome of one successful dispatch, handed to loggers and writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchRecord {
    /// Zero-based cycle counter of the dispatcher that produced this record.
    pub cycle:          u64,
    pub request_vertex: VertexId,
    pub priority:       Priority,
    pub unit:           UnitId,
    /// Where the unit was before it moved to the patient.
    pub origin:         VertexId,
    /// Plain shortest-path distance from `origin` to the patient, without
    /// traffic or priority adjustment.
    pub distance:       u64,
    /// Nearest hospital from the patient, if any is reachable.
    pub hospital:       Option<HospitalMatch>,
    /// Patient feedback, when the session draws it.
    pub feedback:       Option<&'static str>,
}

//! Row types written by output backends.

use std::fmt;

use ad_core::{Priority, UnitId};
use ad_dispatch::SessionStats;

/// One completed dispatch with vertex names already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRow {
    pub cycle:             u64,
    pub patient:           String,
    pub priority:          Priority,
    pub unit:              UnitId,
    /// Location the unit left from.
    pub origin:            String,
    pub distance:          u64,
    /// `None` when no hospital is reachable from the patient.
    pub hospital:          Option<String>,
    pub hospital_distance: Option<u64>,
}

/// Renders the dispatch log line:
/// `Patient at <name> | Priority: <p> | Ambulance: #<id> | Distance: <d> | Hospital: <name|N/A>`.
impl fmt::Display for DispatchRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Patient at {} | Priority: {} | Ambulance: {} | Distance: {} | Hospital: {}",
            self.patient,
            self.priority,
            self.unit,
            self.distance,
            self.hospital.as_deref().unwrap_or("N/A"),
        )
    }
}

/// End-of-session totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryRow {
    pub served:           u64,
    pub unassigned:       u64,
    pub total_distance:   u64,
    pub average_distance: Option<u64>,
}

impl From<&SessionStats> for SummaryRow {
    fn from(stats: &SessionStats) -> Self {
        Self {
            served:           stats.served,
            unassigned:       stats.unassigned,
            total_distance:   stats.total_distance,
            average_distance: stats.average_distance(),
        }
    }
}

pub(crate) fn opt_field<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

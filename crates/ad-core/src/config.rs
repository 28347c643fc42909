//! Run configuration.
//!
//! `DispatchConfig` collects every tunable the simulation reads.  The defaults
//! reproduce the reference Delhi scenario: three hospitals at vertices 0, 3
//! and 5, one ambulance stationed at each, 0–50 % traffic slow-down, 40–60 km/h
//! vehicle speed, and a 1-in-5 chance per cycle that a busy unit frees up.

use std::ops::RangeInclusive;

use crate::{CoreError, CoreResult, VertexId};

/// Global configuration for a dispatch session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchConfig {
    /// Seed for the session's [`SimRng`](crate::SimRng).
    pub seed: u64,

    /// Vertices designated as hospitals, in tie-break order.
    pub hospitals: Vec<VertexId>,

    /// Starting vertex of each unit.  Unit `i` starts at `unit_positions[i]`.
    pub unit_positions: Vec<VertexId>,

    /// Traffic multiplier in percent, drawn uniformly per candidate.
    /// `100..=150` means a multiplier in `[1.00, 1.50]`.
    pub traffic_percent: RangeInclusive<u32>,

    /// Vehicle speed in km/h, drawn uniformly per candidate for the ETA.
    pub speed_kmh: RangeInclusive<u32>,

    /// Probability that a busy unit becomes available at the end of a cycle.
    pub release_probability: f64,

    /// Draw a patient feedback message after each successful dispatch.
    /// Adds one draw per dispatch, after the hospital lookup and before the
    /// availability refresh.
    pub patient_feedback: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            seed:                0,
            hospitals:           vec![VertexId(0), VertexId(3), VertexId(5)],
            unit_positions:      vec![VertexId(0), VertexId(3), VertexId(5)],
            traffic_percent:     100..=150,
            speed_kmh:           40..=60,
            release_probability: 0.2,
            patient_feedback:    false,
        }
    }
}

impl DispatchConfig {
    /// Check internal consistency.  Graph-dependent checks (vertex ranges)
    /// happen when the dispatcher is built.
    pub fn validate(&self) -> CoreResult<()> {
        if self.traffic_percent.is_empty() {
            return Err(CoreError::Config(format!(
                "traffic_percent range {:?} is empty",
                self.traffic_percent
            )));
        }
        if self.speed_kmh.is_empty() || *self.speed_kmh.start() == 0 {
            return Err(CoreError::Config(format!(
                "speed_kmh range {:?} must be non-empty and start above 0",
                self.speed_kmh
            )));
        }
        if !(0.0..=1.0).contains(&self.release_probability) {
            return Err(CoreError::Config(format!(
                "release_probability {} is outside [0, 1]",
                self.release_probability
            )));
        }
        Ok(())
    }
}

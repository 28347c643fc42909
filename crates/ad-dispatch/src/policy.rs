//! Greedy ambulance assignment.
//!
//! For one request the policy scores every available unit and picks the
//! cheapest.  The score of a unit is its *weighted distance*:
//!
//! ```text
//! base      = shortest-path distance, unit vertex → request vertex
//! adjusted  = floor(base × t / 100)          t uniform in traffic_percent
//! weighted  = floor(adjusted × w)            w = priority weight (0.5 / 0.75 / 1.0)
//! ```
//!
//! Units with no path to the request are listed but not scored.  The running
//! minimum uses a strict `<`, so on equal scores the lower unit id wins.
//!
//! Per scored unit the policy draws exactly two values from the random source,
//! traffic first and speed second; unreachable units draw nothing.  The speed
//! only feeds the ETA shown to operators and never affects selection.

use std::ops::RangeInclusive;

use ad_core::{DispatchConfig, RandomSource, UnitId, VertexId};
use ad_fleet::{Unit, UnitRegistry};
use ad_graph::{Graph, PathResult, Route, Router};

use crate::{DispatchError, DispatchResult, Request};

// ── Candidate evaluation ──────────────────────────────────────────────────────

/// Score of one reachable unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Estimate {
    pub base_distance:     u64,
    /// Drawn traffic multiplier in percent (100 = free-flowing).
    pub traffic_percent:   u32,
    pub adjusted_distance: u64,
    pub speed_kmh:         u32,
    pub eta_minutes:       u64,
    pub weighted_distance: u64,
}

/// One available unit as seen by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub unit:     UnitId,
    pub origin:   VertexId,
    /// `None` if the unit has no route to the request.
    pub estimate: Option<Estimate>,
}

/// Result of a successful [`AssignmentPolicy::assign`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub request:           Request,
    pub unit:              UnitId,
    /// Vertex the unit was dispatched from.
    pub origin:            VertexId,
    pub base_distance:     u64,
    pub weighted_distance: u64,
    /// Shortest route from `origin` to the request vertex.
    pub route:             Route,
    /// Every available unit in id order, including unreachable ones.
    pub candidates:        Vec<Candidate>,
}

impl Assignment {
    /// The winning candidate's estimate.
    pub fn estimate(&self) -> Option<&Estimate> {
        self.candidates
            .iter()
            .find(|c| c.unit == self.unit)
            .and_then(|c| c.estimate.as_ref())
    }
}

// ── AssignmentPolicy ──────────────────────────────────────────────────────────

/// Traffic and speed model used to score candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentPolicy {
    pub traffic_percent: RangeInclusive<u32>,
    pub speed_kmh:       RangeInclusive<u32>,
}

impl Default for AssignmentPolicy {
    fn default() -> Self {
        Self::from_config(&DispatchConfig::default())
    }
}

impl AssignmentPolicy {
    pub fn from_config(config: &DispatchConfig) -> Self {
        Self {
            traffic_percent: config.traffic_percent.clone(),
            speed_kmh:       config.speed_kmh.clone(),
        }
    }

    /// Score `unit` for a request at `target`, or `None` if unreachable.
    ///
    /// Returns the path result alongside the estimate so the winner's route
    /// can be rebuilt without a second search.
    pub fn evaluate<R, S>(
        &self,
        graph:  &Graph,
        router: &R,
        rng:    &mut S,
        unit:   &Unit,
        target: VertexId,
        weight: f64,
    ) -> DispatchResult<Option<(Estimate, PathResult)>>
    where
        R: Router + ?Sized,
        S: RandomSource + ?Sized,
    {
        let path = router.shortest_path(graph, unit.vertex, target)?;
        let Some(base) = path.distance else {
            return Ok(None);
        };

        let traffic  = rng.pick_inclusive(&self.traffic_percent);
        let adjusted = base * u64::from(traffic) / 100;
        let speed    = rng.pick_inclusive(&self.speed_kmh).max(1);
        let eta      = adjusted * 60 / u64::from(speed);
        let weighted = (adjusted as f64 * weight).floor() as u64;

        let estimate = Estimate {
            base_distance:     base,
            traffic_percent:   traffic,
            adjusted_distance: adjusted,
            speed_kmh:         speed,
            eta_minutes:       eta,
            weighted_distance: weighted,
        };
        Ok(Some((estimate, path)))
    }

    /// Pick the best available unit for `request` and dispatch it.
    ///
    /// On success the chosen unit is moved to the request vertex and marked
    /// busy.  On any error the registry is left untouched.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::VertexOutOfRange`] for a request outside the graph.
    /// - [`DispatchError::NoneAvailable`] if every unit is busy or cannot
    ///   reach the request.
    pub fn assign<R, S>(
        &self,
        graph:    &Graph,
        registry: &mut UnitRegistry,
        router:   &R,
        rng:      &mut S,
        request:  &Request,
    ) -> DispatchResult<Assignment>
    where
        R: Router + ?Sized,
        S: RandomSource + ?Sized,
    {
        if !graph.contains(request.vertex) {
            return Err(DispatchError::VertexOutOfRange {
                vertex: request.vertex,
                count:  graph.vertex_count(),
            });
        }

        let weight = request.priority.weight();
        let pool: Vec<Unit> = registry.units().iter().filter(|u| u.available).copied().collect();

        let mut candidates = Vec::with_capacity(pool.len());
        // (index into candidates, weighted distance, path)
        let mut best: Option<(usize, u64, PathResult)> = None;

        for unit in &pool {
            let scored = self.evaluate(graph, router, rng, unit, request.vertex, weight)?;
            let estimate = match scored {
                None => {
                    tracing::debug!(unit = %unit.id, from = %unit.vertex, "no route to request");
                    None
                }
                Some((estimate, path)) => {
                    tracing::debug!(
                        unit     = %unit.id,
                        base     = estimate.base_distance,
                        adjusted = estimate.adjusted_distance,
                        weighted = estimate.weighted_distance,
                        eta_min  = estimate.eta_minutes,
                        "candidate scored"
                    );
                    if best.as_ref().is_none_or(|(_, w, _)| estimate.weighted_distance < *w) {
                        best = Some((candidates.len(), estimate.weighted_distance, path));
                    }
                    Some(estimate)
                }
            };
            candidates.push(Candidate { unit: unit.id, origin: unit.vertex, estimate });
        }

        let Some((index, weighted_distance, path)) = best else {
            return Err(DispatchError::NoneAvailable { vertex: request.vertex });
        };
        let chosen = candidates[index];
        let base_distance = path.distance.unwrap_or(0);
        let route = path.into_route()?;

        registry.set_position(chosen.unit, request.vertex)?;
        registry.set_availability(chosen.unit, false)?;

        tracing::debug!(unit = %chosen.unit, weighted = weighted_distance, "unit selected");

        Ok(Assignment {
            request: *request,
            unit: chosen.unit,
            origin: chosen.origin,
            base_distance,
            weighted_distance,
            route,
            candidates,
        })
    }
}

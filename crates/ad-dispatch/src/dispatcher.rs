//! The `Dispatcher` struct and its request cycle.

use ad_core::{DispatchConfig, RandomSource};
use ad_fleet::UnitRegistry;
use ad_graph::{Graph, Router};

use crate::feedback::pick_feedback;
use crate::{
    AssignmentPolicy, DispatchError, DispatchObserver, DispatchRecord, DispatchResult, Request,
    SessionStats,
};

/// All state of one dispatch session.
///
/// Everything a cycle reads or writes lives here and is passed explicitly:
/// the immutable graph, the unit registry, the random source, and running
/// statistics.  There is no process-wide state.
///
/// Create via [`DispatcherBuilder`][crate::DispatcherBuilder].
pub struct Dispatcher<R: Router, S: RandomSource> {
    /// Run configuration (release probability, seed, …).
    pub config: DispatchConfig,

    /// Location graph.  Never mutated after construction.
    pub graph: Graph,

    /// Unit positions, availability, and hospitals.
    pub registry: UnitRegistry,

    /// Scoring model for candidates.
    pub policy: AssignmentPolicy,

    /// Shortest-path engine.
    pub router: R,

    /// Source of every random draw in the session.
    pub rng: S,

    /// Totals over handled requests.
    pub stats: SessionStats,

    /// Number of completed cycles.  Rejected requests do not count.
    pub cycle: u64,
}

impl<R: Router, S: RandomSource> Dispatcher<R, S> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Handle one request end to end.
    ///
    /// A request outside the graph is rejected before anything happens and
    /// does not use up a cycle.  Otherwise the assignment runs, the outcome is
    /// reported to `observer`, and the cycle closes with an availability
    /// refresh, whether or not a unit was found.
    pub fn handle<O: DispatchObserver>(
        &mut self,
        request:  Request,
        observer: &mut O,
    ) -> DispatchResult<DispatchRecord> {
        if !self.graph.contains(request.vertex) {
            return Err(DispatchError::VertexOutOfRange {
                vertex: request.vertex,
                count:  self.graph.vertex_count(),
            });
        }

        let outcome = self.dispatch(&request, observer);
        self.end_cycle(observer);
        outcome
    }

    /// Handle a batch of requests, skipping over recoverable failures.
    ///
    /// Returns the successful records in order.  Useful for scripted sessions
    /// and tests.
    pub fn run<I, O>(&mut self, requests: I, observer: &mut O) -> DispatchResult<Vec<DispatchRecord>>
    where
        I: IntoIterator<Item = Request>,
        O: DispatchObserver,
    {
        let mut records = Vec::new();
        for request in requests {
            match self.handle(request, observer) {
                Ok(record) => records.push(record),
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(error = %e, "request skipped");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(records)
    }

    /// Close the session: report final statistics and return them.
    pub fn finish<O: DispatchObserver>(&mut self, observer: &mut O) -> SessionStats {
        tracing::info!(
            served         = self.stats.served,
            unassigned     = self.stats.unassigned,
            total_distance = self.stats.total_distance,
            "session finished"
        );
        observer.on_session_end(&self.stats);
        self.stats
    }

    // ── Cycle phases ──────────────────────────────────────────────────────

    fn dispatch<O: DispatchObserver>(
        &mut self,
        request:  &Request,
        observer: &mut O,
    ) -> DispatchResult<DispatchRecord> {
        let assignment = match self.policy.assign(
            &self.graph,
            &mut self.registry,
            &self.router,
            &mut self.rng,
            request,
        ) {
            Ok(a) => a,
            Err(e @ DispatchError::NoneAvailable { .. }) => {
                tracing::warn!(cycle = self.cycle, vertex = %request.vertex, "no ambulance can reach the patient");
                self.stats.record_unassigned();
                observer.on_unassigned(self.cycle, request);
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        let hospital = self
            .registry
            .nearest_hospital(&self.graph, &self.router, request.vertex)?;
        let feedback = self
            .config
            .patient_feedback
            .then(|| pick_feedback(&mut self.rng));

        let record = DispatchRecord {
            cycle:          self.cycle,
            request_vertex: request.vertex,
            priority:       request.priority,
            unit:           assignment.unit,
            origin:         assignment.origin,
            distance:       assignment.base_distance,
            hospital,
            feedback,
        };
        self.stats.record_served(record.distance);

        tracing::info!(
            cycle    = record.cycle,
            unit     = %record.unit,
            patient  = self.graph.name(record.request_vertex),
            priority = %record.priority,
            distance = record.distance,
            "ambulance dispatched"
        );
        observer.on_dispatch(&assignment, &record);
        Ok(record)
    }

    fn end_cycle<O: DispatchObserver>(&mut self, observer: &mut O) {
        let released = self
            .registry
            .refresh_availability(&mut self.rng, self.config.release_probability);
        observer.on_release(self.cycle, &released);
        self.cycle += 1;
    }
}

//! Fluent builder for constructing a [`Dispatcher`].

use ad_core::{DispatchConfig, RandomSource, SimRng};
use ad_fleet::UnitRegistry;
use ad_graph::{Graph, Router};

use crate::{AssignmentPolicy, Dispatcher, DispatchResult, SessionStats};

/// Fluent builder for [`Dispatcher<R, S>`].
///
/// # Required inputs
///
/// - [`DispatchConfig`] — hospitals, unit start positions, traffic/speed model
/// - [`Graph`] — the location graph
/// - `R: Router` — the routing engine (e.g. [`ad_graph::DijkstraRouter`])
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                          |
/// |-------------------------|----------------------------------|
/// | `.random_source(s)`     | `SimRng::new(config.seed)`       |
///
/// # Example
///
/// ```rust,ignore
/// let mut dispatcher = DispatcherBuilder::new(config, graph, DijkstraRouter)
///     .random_source(FixedRng(0.0))
///     .build()?;
/// ```
pub struct DispatcherBuilder<R: Router, S: RandomSource> {
    config: DispatchConfig,
    graph:  Graph,
    router: R,
    rng:    S,
}

impl<R: Router> DispatcherBuilder<R, SimRng> {
    /// Create a builder with all required inputs and a seeded [`SimRng`].
    pub fn new(config: DispatchConfig, graph: Graph, router: R) -> Self {
        let rng = SimRng::new(config.seed);
        Self { config, graph, router, rng }
    }
}

impl<R: Router, S: RandomSource> DispatcherBuilder<R, S> {
    /// Replace the random source, e.g. with a fixed sequence in tests.
    pub fn random_source<S2: RandomSource>(self, rng: S2) -> DispatcherBuilder<R, S2> {
        DispatcherBuilder {
            config: self.config,
            graph:  self.graph,
            router: self.router,
            rng,
        }
    }

    /// Validate the configuration against the graph and return a ready
    /// [`Dispatcher`].
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Config`](crate::DispatchError::Config) for an
    ///   inconsistent configuration.
    /// - [`DispatchError::Fleet`](crate::DispatchError::Fleet) if a unit or
    ///   hospital vertex is outside the graph.
    pub fn build(self) -> DispatchResult<Dispatcher<R, S>> {
        self.config.validate()?;

        let registry = UnitRegistry::for_graph(
            &self.graph,
            &self.config.unit_positions,
            &self.config.hospitals,
        )?;

        tracing::debug!(
            locations = self.graph.vertex_count(),
            units     = registry.len(),
            hospitals = registry.hospitals().len(),
            "dispatcher built"
        );

        Ok(Dispatcher {
            policy:   AssignmentPolicy::from_config(&self.config),
            config:   self.config,
            graph:    self.graph,
            registry,
            router:   self.router,
            rng:      self.rng,
            stats:    SessionStats::default(),
            cycle:    0,
        })
    }
}

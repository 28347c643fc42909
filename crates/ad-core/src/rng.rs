//! Random sources for the dispatch simulation.
//!
//! # Determinism strategy
//!
//! Every stochastic decision in the simulator (traffic multiplier, vehicle
//! speed, unit release) draws from a single [`RandomSource`] owned by the
//! dispatcher.  The trait has exactly one required method returning a float in
//! `[0, 1)`; all integer and Bernoulli draws are derived from it, so a test can
//! pin the whole simulation by injecting a [`SequenceRng`] or [`FixedRng`].
//!
//! Production runs use [`SimRng`], a `SmallRng` seeded explicitly from
//! `DispatchConfig::seed`.  The same seed and the same request sequence always
//! reproduce the same dispatches.

use std::ops::RangeInclusive;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Largest `f64` strictly below `1.0`.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

// ── RandomSource ──────────────────────────────────────────────────────────────

/// Capability to draw uniform random numbers.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `range` (both ends inclusive).
    ///
    /// A reversed range yields its start.
    fn pick_inclusive(&mut self, range: &RangeInclusive<u32>) -> u32 {
        let (lo, hi) = (*range.start(), *range.end());
        if hi <= lo {
            return lo;
        }
        let span = u64::from(hi - lo) + 1;
        let k = (self.next_unit() * span as f64) as u64;
        lo + k.min(span - 1) as u32
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p.clamp(0.0, 1.0)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Production random source: a seeded `SmallRng`.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }
}

impl RandomSource for SimRng {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

// ── Deterministic sources ─────────────────────────────────────────────────────

/// Replays a fixed list of values, wrapping around at the end.
///
/// Values are clamped into `[0, 1)`.  An empty sequence always yields `0.0`.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, BELOW_ONE))
            .collect();
        Self { values, cursor: 0 }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRng {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

/// Always returns the same value.
///
/// `FixedRng(0.0)` pins the traffic multiplier to `1.00`, the speed to the
/// bottom of its range, and releases every busy unit on refresh.
#[derive(Debug, Clone, Copy)]
pub struct FixedRng(pub f64);

impl RandomSource for FixedRng {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.0.clamp(0.0, BELOW_ONE)
    }
}

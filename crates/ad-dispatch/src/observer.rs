//! Dispatcher observer trait for logging and data collection.

use ad_core::UnitId;

use crate::{Assignment, DispatchRecord, Request, SessionStats};

/// Callbacks invoked by the [`Dispatcher`][crate::Dispatcher] at key points
/// of each cycle.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example
///
/// ```rust,ignore
/// struct Echo;
///
/// impl DispatchObserver for Echo {
///     fn on_dispatch(&mut self, _a: &Assignment, record: &DispatchRecord) {
///         println!("cycle {}: unit {} → {}", record.cycle, record.unit, record.request_vertex);
///     }
/// }
/// ```
pub trait DispatchObserver {
    /// A unit was assigned.  `assignment` carries the full candidate table and
    /// route; `record` is what gets logged.
    fn on_dispatch(&mut self, _assignment: &Assignment, _record: &DispatchRecord) {}

    /// No unit could reach the request; it was dropped.
    fn on_unassigned(&mut self, _cycle: u64, _request: &Request) {}

    /// End-of-cycle availability refresh released these units (may be empty).
    fn on_release(&mut self, _cycle: u64, _released: &[UnitId]) {}

    /// Called once when the session is finished.
    fn on_session_end(&mut self, _stats: &SessionStats) {}
}

/// A [`DispatchObserver`] that does nothing.
pub struct NoopObserver;

impl DispatchObserver for NoopObserver {}

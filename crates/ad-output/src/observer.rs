//! Bridge from `DispatchObserver` to an `OutputWriter`.

use ad_dispatch::{Assignment, DispatchObserver, DispatchRecord, SessionStats};
use ad_graph::Graph;

use crate::row::{DispatchRow, SummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`DispatchObserver`] that writes every dispatch and the final summary to
/// any [`OutputWriter`] backend.
///
/// Location names are copied from the graph at construction, so the observer
/// holds no borrow of the dispatcher it watches.
///
/// Errors from the writer are stored internally because `DispatchObserver`
/// methods have no return value.  After the session, check with
/// [`take_error`][Self::take_error].
pub struct DispatchOutputObserver<W: OutputWriter> {
    writer:     W,
    names:      Vec<String>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> DispatchOutputObserver<W> {
    pub fn new(writer: W, graph: &Graph) -> Self {
        Self {
            writer,
            names:      graph.names().to_vec(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn name(&self, index: usize) -> String {
        self.names.get(index).cloned().unwrap_or_else(|| format!("v{index}"))
    }

    fn row(&self, record: &DispatchRecord) -> DispatchRow {
        DispatchRow {
            cycle:             record.cycle,
            patient:           self.name(record.request_vertex.index()),
            priority:          record.priority,
            unit:              record.unit,
            origin:            self.name(record.origin.index()),
            distance:          record.distance,
            hospital:          record.hospital.map(|h| self.name(h.hospital.index())),
            hospital_distance: record.hospital.map(|h| h.distance),
        }
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            tracing::error!(error = %e, "output write failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> DispatchObserver for DispatchOutputObserver<W> {
    fn on_dispatch(&mut self, _assignment: &Assignment, record: &DispatchRecord) {
        let row = self.row(record);
        let result = self.writer.write_dispatch(&row);
        self.store_err(result);
    }

    fn on_session_end(&mut self, stats: &SessionStats) {
        let result = self.writer.write_summary(&SummaryRow::from(stats));
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}

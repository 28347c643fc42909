//! The `OutputWriter` trait implemented by all backend writers.

use crate::{DispatchRow, OutputResult, SummaryRow};

/// Trait implemented by the text, CSV, and SQLite writers.
///
/// Errors are returned to the caller; [`DispatchOutputObserver`] stores them
/// for [`take_error`].
///
/// [`DispatchOutputObserver`]: crate::DispatchOutputObserver
/// [`take_error`]: crate::DispatchOutputObserver::take_error
pub trait OutputWriter {
    /// Write one dispatch.
    fn write_dispatch(&mut self, row: &DispatchRow) -> OutputResult<()>;

    /// Write the session summary.
    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

impl<W: OutputWriter + ?Sized> OutputWriter for Box<W> {
    fn write_dispatch(&mut self, row: &DispatchRow) -> OutputResult<()> {
        (**self).write_dispatch(row)
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        (**self).write_summary(row)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}

/// Fan-out to several backends in order.  Every backend sees every call; the
/// first error is returned.
impl<W: OutputWriter> OutputWriter for Vec<W> {
    fn write_dispatch(&mut self, row: &DispatchRow) -> OutputResult<()> {
        fan_out(self, |w| w.write_dispatch(row))
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        fan_out(self, |w| w.write_summary(row))
    }

    fn finish(&mut self) -> OutputResult<()> {
        fan_out(self, |w| w.finish())
    }
}

fn fan_out<W, F>(writers: &mut [W], mut f: F) -> OutputResult<()>
where
    F: FnMut(&mut W) -> OutputResult<()>,
{
    let mut first = None;
    for w in writers {
        if let Err(e) = f(w) {
            first.get_or_insert(e);
        }
    }
    first.map_or(Ok(()), Err)
}

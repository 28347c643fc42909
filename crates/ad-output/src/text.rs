//! Plain-text backend.
//!
//! - `logs.txt` gets one line per dispatch and is appended to across sessions.
//! - `summary.txt` is overwritten with the latest session totals.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::writer::OutputWriter;
use crate::{DispatchRow, OutputResult, SummaryRow};

pub struct TextLogWriter {
    log:          BufWriter<File>,
    summary_path: PathBuf,
    finished:     bool,
}

impl TextLogWriter {
    /// Open `logs.txt` in `dir` for appending.  `summary.txt` is only touched
    /// by [`write_summary`][OutputWriter::write_summary].
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("logs.txt"))?;
        Ok(Self {
            log:          BufWriter::new(log),
            summary_path: dir.join("summary.txt"),
            finished:     false,
        })
    }
}

impl OutputWriter for TextLogWriter {
    fn write_dispatch(&mut self, row: &DispatchRow) -> OutputResult<()> {
        writeln!(self.log, "{row}")?;
        // Flushed per line: interactive sessions may be killed mid-run.
        self.log.flush()?;
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        let mut text = format!(
            "Patients Served: {}\nTotal Distance Covered: {} km\n",
            row.served, row.total_distance
        );
        if let Some(avg) = row.average_distance {
            text.push_str(&format!("Average Distance per Patient: {avg} km\n"));
        }
        fs::write(&self.summary_path, text)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.log.flush()?;
        Ok(())
    }
}

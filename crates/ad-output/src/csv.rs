//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `dispatches.csv`
//! - `summary.csv`
//!
//! Missing values (no reachable hospital, no average) are empty fields.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::row::opt_field;
use crate::writer::OutputWriter;
use crate::{DispatchRow, OutputResult, SummaryRow};

/// Writes dispatch output to two CSV files.
pub struct CsvWriter {
    dispatches: Writer<File>,
    summary:    Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Create (truncating) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut dispatches = Writer::from_path(dir.join("dispatches.csv"))?;
        dispatches.write_record([
            "cycle",
            "patient",
            "priority",
            "unit",
            "origin",
            "distance",
            "hospital",
            "hospital_distance",
        ])?;

        let mut summary = Writer::from_path(dir.join("summary.csv"))?;
        summary.write_record(["served", "unassigned", "total_distance", "average_distance"])?;

        Ok(Self {
            dispatches,
            summary,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_dispatch(&mut self, row: &DispatchRow) -> OutputResult<()> {
        self.dispatches.write_record(&[
            row.cycle.to_string(),
            row.patient.clone(),
            row.priority.to_string(),
            row.unit.0.to_string(),
            row.origin.clone(),
            row.distance.to_string(),
            row.hospital.clone().unwrap_or_default(),
            opt_field(row.hospital_distance),
        ])?;
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.summary.write_record(&[
            row.served.to_string(),
            row.unassigned.to_string(),
            row.total_distance.to_string(),
            opt_field(row.average_distance),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.dispatches.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}

//! `ad-output` — dispatch log and session summary writers.
//!
//! Three backends are provided:
//!
//! | Backend         | Feature   | Files created                          |
//! |-----------------|-----------|----------------------------------------|
//! | [`TextLogWriter`] | *(none)* | `logs.txt` (appended), `summary.txt`  |
//! | [`CsvWriter`]     | *(none)* | `dispatches.csv`, `summary.csv`       |
//! | `SqliteWriter`    | `sqlite` | `dispatch.db`                         |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`DispatchOutputObserver`], which implements
//! `ad_dispatch::DispatchObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ad_output::{DispatchOutputObserver, TextLogWriter};
//!
//! let writer = TextLogWriter::new(Path::new("."))?;
//! let mut obs = DispatchOutputObserver::new(writer, &dispatcher.graph);
//! dispatcher.run(requests, &mut obs)?;
//! dispatcher.finish(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod text;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::DispatchOutputObserver;
pub use row::{DispatchRow, SummaryRow};
pub use text::TextLogWriter;
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

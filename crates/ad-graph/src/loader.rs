//! Location list and distance matrix loaders.
//!
//! # Input formats
//!
//! **Locations**: one name per line.  Order defines vertex indices.  Blank
//! lines are skipped and trailing whitespace (including `\r`) is trimmed.
//! A line holding only whitespace counts as blank, so no location is ever
//! named by whitespace alone.
//!
//! ```text
//! AIIMS Hospital
//! Connaught Place
//! Karol Bagh
//! ```
//!
//! **Distance matrix**: exactly `N²` whitespace-separated integers in
//! row-major order, where `N` is the number of locations.  `-1`, and `0` off
//! the diagonal, mean "no edge".
//!
//! ```text
//!  0  7 -1
//!  7  0  4
//! -1  4  0
//! ```
//!
//! Both files are read once at startup; any problem is fatal.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use crate::network::{Graph, UNREACHABLE};
use crate::{GraphError, GraphResult};

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`Graph`] from a location file and a matrix file.
///
/// # Errors
///
/// [`GraphError::Read`] if either file cannot be opened;
/// [`GraphError::MalformedInput`] for any content problem.
pub fn load_graph(locations: &Path, matrix: &Path) -> GraphResult<Graph> {
    let graph = read_graph(open(locations)?, open(matrix)?)?;
    tracing::info!(
        locations = graph.vertex_count(),
        edges     = graph.edge_count(),
        "graph loaded from {} and {}",
        locations.display(),
        matrix.display()
    );
    Ok(graph)
}

/// Like [`load_graph`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded data.
pub fn read_graph<L: Read, M: Read>(locations: L, matrix: M) -> GraphResult<Graph> {
    let names = parse_locations(locations)?;
    let raw   = parse_matrix(matrix, names.len())?;
    Graph::from_flat(names, raw)
}

/// Read location names, one per non-blank line.
pub fn parse_locations<R: Read>(reader: R) -> GraphResult<Vec<String>> {
    let mut names = Vec::new();
    for line in BufReader::new(reader).lines() {
        let line = line?;
        let name = line.trim_end();
        if !name.is_empty() {
            names.push(name.to_owned());
        }
    }
    if names.is_empty() {
        return Err(GraphError::MalformedInput("location list is empty".into()));
    }
    Ok(names)
}

/// Read exactly `n * n` integers in row-major order.
pub fn parse_matrix<R: Read>(mut reader: R, n: usize) -> GraphResult<Vec<i64>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let expected = n * n;
    let mut values = Vec::with_capacity(expected);
    for (k, token) in text.split_whitespace().enumerate() {
        if k >= expected {
            return Err(GraphError::MalformedInput(format!(
                "distance matrix has more than {expected} entries for {n} locations"
            )));
        }
        let value = token.parse::<i64>().map_err(|_| {
            GraphError::MalformedInput(format!(
                "invalid matrix entry {token:?} at row {}, column {}",
                k / n,
                k % n
            ))
        })?;
        values.push(value);
    }

    if values.len() != expected {
        return Err(GraphError::MalformedInput(format!(
            "distance matrix has {} entries, expected {expected} for {n} locations",
            values.len()
        )));
    }
    Ok(values)
}

/// Write the normalized matrix back in input format.
///
/// Every unreachable entry is written as `-1`, so parsing the output yields an
/// identical graph.
pub fn write_matrix<W: Write>(graph: &Graph, mut writer: W) -> GraphResult<()> {
    for u in graph.vertices() {
        let row = graph
            .row(u)
            .iter()
            .map(|&w| if w == UNREACHABLE { "-1".to_owned() } else { w.to_string() })
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "{row}")?;
    }
    writer.flush()?;
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn open(path: &Path) -> GraphResult<File> {
    File::open(path).map_err(|source| GraphError::Read { path: path.to_owned(), source })
}

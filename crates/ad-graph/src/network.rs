//! Location graph representation and builder.
//!
//! # Data layout
//!
//! The graph is a dense **row-major weight matrix** over `N` named vertices:
//!
//! ```text
//! weights[ u * N + v ]  =  cost of the edge u → v, or UNREACHABLE
//! ```
//!
//! Dispatch networks are small (tens of locations) and usually close to
//! complete, so a flat matrix beats an adjacency list for both memory locality
//! and construction cost.  Row `u` is a contiguous slice, which keeps the
//! Dijkstra relaxation loop a linear scan.
//!
//! # Normalization
//!
//! Raw input uses `-1` for "no edge".  An off-diagonal `0` is also read as "no
//! edge": zero-cost links between distinct locations do not exist in this
//! model.  The diagonal is always `0` regardless of input.  These rules define
//! reachability and are applied by every constructor.
//!
//! The graph is immutable once built.  Only unit positions move during a
//! session, and those live in `ad-fleet`.

use ad_core::VertexId;

use crate::{GraphError, GraphResult};

/// Sentinel weight meaning "no edge" / "no path".
pub const UNREACHABLE: u32 = u32::MAX;

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Immutable weighted graph over named locations.
///
/// Do not construct field-by-field; use [`Graph::from_matrix`],
/// [`Graph::from_flat`], or [`GraphBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    names:   Vec<String>,
    weights: Vec<u32>,
}

impl Graph {
    /// Build from a name list and an `N × N` matrix of raw integers.
    ///
    /// # Errors
    ///
    /// [`GraphError::MalformedInput`] if the row count or any row length
    /// differs from `names.len()`, or an entry is not a valid weight.
    pub fn from_matrix(names: Vec<String>, rows: Vec<Vec<i64>>) -> GraphResult<Self> {
        let n = names.len();
        if rows.len() != n {
            return Err(GraphError::MalformedInput(format!(
                "matrix has {} rows but {n} locations were given",
                rows.len()
            )));
        }
        let mut flat = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(GraphError::MalformedInput(format!(
                    "matrix row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            flat.extend(row);
        }
        Self::from_flat(names, flat)
    }

    /// Build from a name list and `N²` raw integers in row-major order.
    pub fn from_flat(names: Vec<String>, raw: Vec<i64>) -> GraphResult<Self> {
        let n = names.len();
        if raw.len() != n * n {
            return Err(GraphError::MalformedInput(format!(
                "expected {} matrix entries for {n} locations, found {}",
                n * n,
                raw.len()
            )));
        }

        let weights = raw
            .into_iter()
            .enumerate()
            .map(|(k, value)| normalize(k / n.max(1), k % n.max(1), value))
            .collect::<GraphResult<Vec<u32>>>()?;

        Ok(Self { names, weights })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of finite off-diagonal entries (directed edges).
    pub fn edge_count(&self) -> usize {
        let n = self.vertex_count();
        self.weights
            .iter()
            .enumerate()
            .filter(|&(k, &w)| w != UNREACHABLE && k / n != k % n)
            .count()
    }

    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        v.index() < self.vertex_count()
    }

    /// `Ok(())` if `v` is a vertex of this graph.
    pub fn check(&self, v: VertexId) -> GraphResult<()> {
        if self.contains(v) {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange { vertex: v, count: self.vertex_count() })
        }
    }

    // ── Names ─────────────────────────────────────────────────────────────

    /// Display name of `v`.
    ///
    /// # Panics
    /// Panics if `v` is out of range; call [`check`](Self::check) first on
    /// untrusted ids.
    pub fn name(&self, v: VertexId) -> &str {
        &self.names[v.index()]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// First vertex whose name equals `name` exactly.
    pub fn vertex_by_name(&self, name: &str) -> Option<VertexId> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| VertexId(i as u32))
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.vertex_count()).map(|i| VertexId(i as u32))
    }

    // ── Weights ───────────────────────────────────────────────────────────

    /// Edge weight `u → v`, or `None` if there is no edge.
    #[inline]
    pub fn weight(&self, u: VertexId, v: VertexId) -> Option<u32> {
        let w = self.raw_weight(u, v);
        (w != UNREACHABLE).then_some(w)
    }

    /// Edge weight `u → v` with [`UNREACHABLE`] for a missing edge.
    #[inline]
    pub fn raw_weight(&self, u: VertexId, v: VertexId) -> u32 {
        self.weights[u.index() * self.vertex_count() + v.index()]
    }

    /// Row `u` of the matrix.
    #[inline]
    pub fn row(&self, u: VertexId) -> &[u32] {
        let n = self.vertex_count();
        &self.weights[u.index() * n..(u.index() + 1) * n]
    }

    /// Outgoing edges of `u` as `(neighbor, weight)`, self-loop excluded.
    pub fn neighbors(&self, u: VertexId) -> impl Iterator<Item = (VertexId, u32)> + '_ {
        self.row(u)
            .iter()
            .enumerate()
            .filter(move |&(v, &w)| w != UNREACHABLE && v != u.index())
            .map(|(v, &w)| (VertexId(v as u32), w))
    }
}

/// Apply the input normalization rules to one raw entry at `(i, j)`.
fn normalize(i: usize, j: usize, value: i64) -> GraphResult<u32> {
    if i == j {
        return Ok(0);
    }
    match value {
        -1 | 0 => Ok(UNREACHABLE),
        v if v < 0 => Err(GraphError::MalformedInput(format!(
            "negative weight {v} at row {i}, column {j}"
        ))),
        v => u32::try_from(v)
            .ok()
            .filter(|&w| w != UNREACHABLE)
            .ok_or_else(|| {
                GraphError::MalformedInput(format!("weight {v} at row {i}, column {j} is too large"))
            }),
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`Graph`] incrementally, then call [`build`](Self::build).
///
/// Edges not added stay absent.  The same normalization as the file loader
/// applies, so a zero-weight road between two locations is dropped.
///
/// # Example
///
/// ```
/// use ad_graph::GraphBuilder;
///
/// let mut b = GraphBuilder::new();
/// let a = b.add_location("AIIMS");
/// let c = b.add_location("Connaught Place");
/// b.add_road(a, c, 7);
/// let g = b.build().unwrap();
/// assert_eq!(g.vertex_count(), 2);
/// assert_eq!(g.edge_count(), 2); // bidirectional
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    names: Vec<String>,
    edges: Vec<(VertexId, VertexId, i64)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location and return its `VertexId` (sequential from 0).
    pub fn add_location(&mut self, name: impl Into<String>) -> VertexId {
        let id = VertexId(self.names.len() as u32);
        self.names.push(name.into());
        id
    }

    /// Add a **directed** edge. A later edge between the same pair wins.
    pub fn add_directed_edge(&mut self, from: VertexId, to: VertexId, weight: i64) {
        self.edges.push((from, to, weight));
    }

    /// Add edges in both directions.
    pub fn add_road(&mut self, a: VertexId, b: VertexId, weight: i64) {
        self.add_directed_edge(a, b, weight);
        self.add_directed_edge(b, a, weight);
    }

    pub fn location_count(&self) -> usize {
        self.names.len()
    }

    /// Consume the builder and produce a [`Graph`].
    ///
    /// # Errors
    ///
    /// [`GraphError::VertexOutOfRange`] for an edge endpoint that was never
    /// added; [`GraphError::MalformedInput`] for an invalid weight.
    pub fn build(self) -> GraphResult<Graph> {
        let n = self.names.len();
        let mut raw = vec![-1i64; n * n];
        for (from, to, w) in self.edges {
            for v in [from, to] {
                if v.index() >= n {
                    return Err(GraphError::VertexOutOfRange { vertex: v, count: n });
                }
            }
            raw[from.index() * n + to.index()] = w;
        }
        Graph::from_flat(self.names, raw)
    }
}

//! Routing trait, path results, and the Dijkstra engines.
//!
//! # Pluggability
//!
//! `ad-fleet` and `ad-dispatch` call routing through the [`Router`] trait.
//! The canonical engine is [`DijkstraRouter`] (binary-heap frontier).
//! [`LinearScanRouter`] is the O(N²) minimum-scan form; it produces the same
//! distances and is kept as a reference oracle for small graphs.
//!
//! # Results
//!
//! A query returns a [`PathResult`]: the distance to the target (or `None`
//! when the target is unreachable) plus the full predecessor table of the run.
//! Edge weights are `u32`; path totals are accumulated as `u64`, so a sum of
//! large weights never collides with "unreachable".
//! Unreachability is a normal outcome, not an error.  [`PathResult::path`]
//! turns the predecessor table into a vertex sequence and only then reports
//! [`GraphError::NoPathFound`].

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ad_core::VertexId;

use crate::network::Graph;
use crate::{GraphError, GraphResult};

// ── PathResult ────────────────────────────────────────────────────────────────

/// Output of one single-source-to-target shortest-path run.
///
/// Owned by the caller and discarded after use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    pub start: VertexId,
    pub end:   VertexId,
    /// Minimum total weight from `start` to `end`; `None` if unreachable.
    pub distance: Option<u64>,
    /// `predecessor[v]` is the vertex `v` was reached from, or
    /// `VertexId::INVALID` if `v` was never reached (and for `start`).
    pub predecessor: Vec<VertexId>,
}

impl PathResult {
    #[inline]
    pub fn is_reachable(&self) -> bool {
        self.distance.is_some()
    }

    /// The vertex `v` was reached from during this run.
    pub fn predecessor_of(&self, v: VertexId) -> Option<VertexId> {
        self.predecessor
            .get(v.index())
            .copied()
            .filter(|p| p.is_valid())
    }

    /// Vertices from `start` to `end` inclusive.
    ///
    /// Empty when `start == end`.
    ///
    /// # Errors
    ///
    /// [`GraphError::NoPathFound`] if `end` was not reached.
    pub fn path(&self) -> GraphResult<Vec<VertexId>> {
        if self.start == self.end {
            return Ok(Vec::new());
        }
        let no_path = || GraphError::NoPathFound { from: self.start, to: self.end };
        if self.distance.is_none() {
            return Err(no_path());
        }

        let mut path = vec![self.end];
        let mut cur = self.end;
        // A predecessor chain visits each vertex at most once.
        for _ in 0..self.predecessor.len() {
            let prev = self.predecessor_of(cur).ok_or_else(no_path)?;
            path.push(prev);
            if prev == self.start {
                path.reverse();
                return Ok(path);
            }
            cur = prev;
        }
        Err(no_path())
    }

    /// Reconstruct the path and package it with its distance.
    pub fn into_route(self) -> GraphResult<Route> {
        let vertices = self.path()?;
        Ok(Route {
            vertices,
            distance: self.distance.unwrap_or(0),
        })
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// A reconstructed shortest path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Route {
    /// Vertices to visit in order, source first.  Empty for a trivial route.
    pub vertices: Vec<VertexId>,
    /// Total edge weight.
    pub distance: u64,
}

impl Route {
    /// `true` if the source and destination are the same vertex.
    pub fn is_trivial(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Render as `A -> B -> C` using the graph's location names.
    pub fn describe(&self, graph: &Graph) -> String {
        self.vertices
            .iter()
            .map(|&v| graph.name(v))
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
pub trait Router {
    /// Minimum distance from `start` to `end` and the predecessor table.
    ///
    /// An unreachable target is `Ok` with `distance == None`.
    ///
    /// # Errors
    ///
    /// [`GraphError::VertexOutOfRange`] if either endpoint is not in `graph`.
    fn shortest_path(
        &self,
        graph: &Graph,
        start: VertexId,
        end:   VertexId,
    ) -> GraphResult<PathResult>;

    /// Shortest path as a [`Route`]; unreachable targets become
    /// [`GraphError::NoPathFound`].
    fn route(&self, graph: &Graph, start: VertexId, end: VertexId) -> GraphResult<Route> {
        self.shortest_path(graph, start, end)?.into_route()
    }

    /// Distance only.
    fn distance(&self, graph: &Graph, start: VertexId, end: VertexId) -> GraphResult<Option<u64>> {
        Ok(self.shortest_path(graph, start, end)?.distance)
    }
}

impl<R: Router + ?Sized> Router for &R {
    fn shortest_path(&self, graph: &Graph, start: VertexId, end: VertexId) -> GraphResult<PathResult> {
        (**self).shortest_path(graph, start, end)
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra's algorithm with a binary-heap frontier and early exit.
///
/// The search stops the moment the target is popped; a finalized vertex is
/// never revisited, so the early exit does not change the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn shortest_path(&self, graph: &Graph, start: VertexId, end: VertexId) -> GraphResult<PathResult> {
        graph.check(start)?;
        graph.check(end)?;

        let n = graph.vertex_count();
        // dist[v] = best known cost to reach v.
        let mut dist        = vec![NOT_REACHED; n];
        let mut predecessor = vec![VertexId::INVALID; n];
        let mut visited     = vec![false; n];

        dist[start.index()] = 0;

        // Min-heap: (cost, vertex). Reverse makes BinaryHeap (max) behave as
        // min-heap; the secondary key makes tie order deterministic.
        let mut heap: BinaryHeap<Reverse<(u64, VertexId)>> = BinaryHeap::new();
        heap.push(Reverse((0, start)));

        while let Some(Reverse((cost, u))) = heap.pop() {
            // Stale entry for an already-finalized vertex.
            if visited[u.index()] {
                continue;
            }
            visited[u.index()] = true;

            if u == end {
                break;
            }

            for (v, w) in graph.neighbors(u) {
                if visited[v.index()] {
                    continue;
                }
                let candidate = cost + u64::from(w);
                if candidate < dist[v.index()] {
                    dist[v.index()] = candidate;
                    predecessor[v.index()] = u;
                    heap.push(Reverse((candidate, v)));
                }
            }
        }

        Ok(finish(start, end, &dist, predecessor))
    }
}

// ── LinearScanRouter ──────────────────────────────────────────────────────────

/// Dijkstra with an O(N) minimum scan per step instead of a heap.
///
/// Quadratic in the vertex count.  Use [`DijkstraRouter`] for real work.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearScanRouter;

impl Router for LinearScanRouter {
    fn shortest_path(&self, graph: &Graph, start: VertexId, end: VertexId) -> GraphResult<PathResult> {
        graph.check(start)?;
        graph.check(end)?;

        let n = graph.vertex_count();
        let mut dist        = vec![NOT_REACHED; n];
        let mut predecessor = vec![VertexId::INVALID; n];
        let mut visited     = vec![false; n];
        dist[start.index()] = 0;

        loop {
            let next = (0..n)
                .filter(|&i| !visited[i] && dist[i] != NOT_REACHED)
                .min_by_key(|&i| dist[i]);
            let Some(u) = next else { break };

            visited[u] = true;
            if u == end.index() {
                break;
            }

            let u = VertexId(u as u32);
            for (v, w) in graph.neighbors(u) {
                let candidate = dist[u.index()] + u64::from(w);
                if !visited[v.index()] && candidate < dist[v.index()] {
                    dist[v.index()] = candidate;
                    predecessor[v.index()] = u;
                }
            }
        }

        Ok(finish(start, end, &dist, predecessor))
    }
}

/// Tentative-distance marker for vertices not reached yet.  A real total is at
/// most `(N - 1) * (u32::MAX - 1)`, far below this.
const NOT_REACHED: u64 = u64::MAX;

fn finish(start: VertexId, end: VertexId, dist: &[u64], predecessor: Vec<VertexId>) -> PathResult {
    let d = dist[end.index()];
    tracing::trace!(%start, %end, distance = d, "shortest path computed");
    PathResult {
        start,
        end,
        distance: (d != NOT_REACHED).then_some(d),
        predecessor,
    }
}

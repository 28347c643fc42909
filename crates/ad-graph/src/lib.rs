//! `ad-graph` — location graph, loaders, and shortest-path routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `Graph` (dense weight matrix), `GraphBuilder`, `UNREACHABLE` |
//! | [`loader`]  | Location list / distance matrix parsing and re-serialization |
//! | [`router`]  | `Router` trait, `PathResult`, `Route`, `DijkstraRouter`, `LinearScanRouter` |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                              |

pub mod error;
pub mod loader;
pub mod network;
pub mod router;


pub use error::{GraphError, GraphResult};
pub use loader::{load_graph, parse_locations, parse_matrix, read_graph, write_matrix};
pub use network::{Graph, GraphBuilder, UNREACHABLE};
pub use router::{DijkstraRouter, LinearScanRouter, PathResult, Route, Router};

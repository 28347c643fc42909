//! `ad-core` — foundational types for the ambulance dispatch simulator.
//!
//! Every other `ad-*` crate depends on this one.  It has no `ad-*`
//! dependencies and only a handful of external ones (`rand`, `thiserror`,
//! `tracing`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VertexId`, `UnitId`                                  |
//! | [`priority`]    | `Priority` and its distance weighting                 |
//! | [`rng`]         | `RandomSource` trait, `SimRng`, `SequenceRng`, `FixedRng` |
//! | [`config`]      | `DispatchConfig`                                      |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod priority;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::DispatchConfig;
pub use error::{CoreError, CoreResult};
pub use ids::{UnitId, VertexId};
pub use priority::Priority;
pub use rng::{FixedRng, RandomSource, SequenceRng, SimRng};

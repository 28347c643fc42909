//! `ad-fleet` — ambulance units, hospitals, and availability bookkeeping.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`unit`]     | `Unit` — per-ambulance position and availability             |
//! | [`registry`] | `UnitRegistry` — all units plus the hospital set; `HospitalMatch` |
//! | [`error`]    | `FleetError`, `FleetResult<T>`                               |
//!
//! # Movement model
//!
//! Units **teleport on dispatch**: when the assignment policy picks a unit it
//! calls [`UnitRegistry::set_position`] with the request vertex and marks the
//! unit busy.  There is no en-route state.  A busy unit frees up through
//! [`UnitRegistry::refresh_availability`], a per-cycle Bernoulli trial that
//! stands in for "the crew finished the run".  The unit stays where it was
//! dispatched to.

pub mod error;
pub mod registry;
pub mod unit;


pub use error::{FleetError, FleetResult};
pub use registry::{HospitalMatch, UnitRegistry};
pub use unit::Unit;

//! `ad-dispatch` — assignment policy and dispatch cycle orchestrator.
//!
//! # One dispatch cycle
//!
//! ```text
//! Dispatcher::handle(request):
//!   ① Validate   — reject a request vertex outside the graph (no cycle used).
//!   ② Assign     — AssignmentPolicy::assign evaluates every available unit:
//!                    base      = shortest path unit → patient (skip if none)
//!                    adjusted  = floor(base × traffic%)      traffic ∈ [100, 150]
//!                    weighted  = floor(adjusted × priority weight)
//!                  lowest weighted wins, earlier unit on ties; the winner
//!                  moves to the patient and turns busy.
//!   ③ Record     — nearest hospital from the patient, optional patient
//!                  feedback draw, DispatchRecord,
//!                  session statistics, observer callback.
//!   ④ Release    — every busy unit gets a 1-in-5 chance to free up.
//! ```
//!
//! Steps ② and ③ form one transaction over the `UnitRegistry`: nothing else
//! touches it between reading availability and marking the winner busy.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ad_core::{DispatchConfig, Priority, VertexId};
//! use ad_dispatch::{DispatcherBuilder, NoopObserver, Request};
//! use ad_graph::DijkstraRouter;
//!
//! let mut dispatcher = DispatcherBuilder::new(config, graph, DijkstraRouter).build()?;
//! let record = dispatcher.handle(Request::new(VertexId(4), Priority::Critical), &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod dispatcher;
pub mod error;
pub mod feedback;
pub mod observer;
pub mod policy;
pub mod record;
pub mod stats;


pub use builder::DispatcherBuilder;
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, DispatchResult};
pub use feedback::{PATIENT_FEEDBACK, pick_feedback};
pub use observer::{DispatchObserver, NoopObserver};
pub use policy::{Assignment, AssignmentPolicy, Candidate, Estimate};
pub use record::{DispatchRecord, Request};
pub use stats::SessionStats;

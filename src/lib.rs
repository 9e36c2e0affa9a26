//! Weekly nurse rostering pipeline.
//!
//! Assigns hospital nurses to daily shifts one week at a time, in two
//! stages: forecast per-ward staffing demand from recent operational
//! signals, then solve a constrained 0/1 assignment problem that turns
//! demand into a concrete roster. The surrounding service layer hands
//! in a nurse roster and a historical demand table and receives a
//! schedule table, a coverage summary, and per-nurse hour totals.
//!
//! # Modules
//!
//! - **`models`**: domain types — `Nurse`, `Ward`, `Shift`, demand and
//!   roster tables
//! - **`forecast`**: per-ward random-forest demand models (training,
//!   artifact store, prediction)
//! - **`assign`**: MIP formulation and exact solve of the weekly
//!   assignment
//! - **`materialize`**: projection of a raw solution into the calendar
//!   roster plus coverage and hour summaries
//! - **`cursor`**: persisted rolling "next week" start date
//! - **`pipeline`**: one-call weekly generation
//! - **`validation`**: roster integrity checks
//!
//! # Architecture
//!
//! The whole pipeline is a single-threaded, synchronous batch
//! computation. The week cursor file is the only shared mutable
//! external state; concurrent generation requests must be serialized
//! by the caller.
//!
//! # References
//!
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod assign;
pub mod cursor;
pub mod error;
pub mod forecast;
pub mod materialize;
pub mod models;
pub mod pipeline;
pub mod validation;

pub use error::{Error, Result};

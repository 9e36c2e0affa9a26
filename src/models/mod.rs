//! Rostering domain models.
//!
//! Core data types for the weekly nurse-rostering problem and its
//! solution: the fixed ward and shift vocabularies, nurse records,
//! the per-day demand table, and the materialized week schedule.
//!
//! # Lifecycle
//!
//! | Type | Owner | Mutability |
//! |------|-------|-----------|
//! | `Nurse` | caller's roster | immutable during a run |
//! | `DemandForecast` | forecaster output | immutable after predict |
//! | `WeekSchedule` | materializer output | immutable once produced |

mod demand;
mod nurse;
mod roster;
mod shift;
mod ward;

pub use demand::{DemandForecast, DemandRow, MIN_WARD_COVER};
pub use nurse::Nurse;
pub use roster::{
    slot_label, CoverageRow, DutyStatus, RosterRow, ShiftCoverage, WardCoverage, WeekRoster,
    WeekSchedule,
};
pub use shift::{Shift, MAX_WEEKLY_HOURS, SHIFT_HOURS};
pub use ward::{Ward, ROLE_SUFFIXES};

//! Weekly rostering pipeline.
//!
//! One synchronous batch call per generated week: load the per-ward
//! demand models, forecast the horizon, advance the week cursor, build
//! and solve the assignment model, then materialize the schedule. No
//! background state exists beyond the cursor file and the trained
//! model artifacts; concurrent calls must be serialized by the caller.

use tracing::{info, warn};

use crate::assign::{RosterSolver, SolveOutcome};
use crate::cursor::WeekCursor;
use crate::error::Result;
use crate::forecast::{DemandForecaster, HistoryTable, ModelStore};
use crate::materialize::materialize_week;
use crate::models::{Nurse, WeekSchedule};

/// Default scheduling horizon in days.
pub const DEFAULT_HORIZON_DAYS: usize = 7;

/// Result of one generation run.
#[derive(Debug, Clone)]
pub enum ScheduleOutcome {
    /// A schedule was generated for the returned week.
    Generated(Box<WeekSchedule>),
    /// No feasible assignment exists; nothing was written.
    Infeasible {
        /// Human-readable explanation for reporting.
        reason: String,
    },
}

impl ScheduleOutcome {
    /// The generated schedule, if any.
    pub fn schedule(&self) -> Option<&WeekSchedule> {
        match self {
            ScheduleOutcome::Generated(s) => Some(s),
            ScheduleOutcome::Infeasible { .. } => None,
        }
    }
}

/// The forecast-then-assign weekly pipeline.
pub struct RosterPipeline {
    store: ModelStore,
    cursor: WeekCursor,
    horizon_days: usize,
    solver_seed: Option<u64>,
}

impl RosterPipeline {
    /// Creates a pipeline over a model store and week cursor.
    pub fn new(store: ModelStore, cursor: WeekCursor) -> Self {
        Self {
            store,
            cursor,
            horizon_days: DEFAULT_HORIZON_DAYS,
            solver_seed: None,
        }
    }

    /// Overrides the scheduling horizon.
    pub fn with_horizon(mut self, days: usize) -> Self {
        self.horizon_days = days;
        self
    }

    /// Fixes the solver's perturbation seed.
    ///
    /// Without this, every run draws a fresh seed and may return a
    /// different optimal roster for identical input — the intended
    /// behavior in production.
    pub fn with_solver_seed(mut self, seed: u64) -> Self {
        self.solver_seed = Some(seed);
        self
    }

    /// Generates the next week's schedule.
    ///
    /// Fatal configuration problems (missing models, empty history,
    /// unusable cursor) surface as errors; an infeasible roster is the
    /// recoverable [`ScheduleOutcome::Infeasible`].
    pub fn generate_week(
        &self,
        history: &HistoryTable,
        nurses: &[Nurse],
    ) -> Result<ScheduleOutcome> {
        let forecaster = DemandForecaster::load(&self.store)?;
        let demand = forecaster.forecast(history, self.horizon_days)?;

        let start_date = self.cursor.advance()?;
        info!(
            %start_date,
            days = self.horizon_days,
            nurses = nurses.len(),
            "generating weekly roster"
        );

        let solver = match self.solver_seed {
            Some(seed) => RosterSolver::with_seed(seed),
            None => RosterSolver::new(),
        };

        match solver.solve(nurses, &demand, self.horizon_days)? {
            SolveOutcome::Solved(assignment) => {
                let schedule = materialize_week(&assignment, nurses, &demand, start_date);
                info!(
                    assigned = assignment.assigned_count(),
                    "weekly roster generated"
                );
                Ok(ScheduleOutcome::Generated(Box::new(schedule)))
            }
            SolveOutcome::Infeasible { reason } => {
                warn!(%reason, "no schedule generated");
                Ok(ScheduleOutcome::Infeasible { reason })
            }
        }
    }
}

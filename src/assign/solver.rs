//! Assignment solve.
//!
//! Hands a constructed [`RosterModel`] to the MILP backend and
//! extracts the 0/1 assignment. Infeasibility is a recoverable,
//! reportable outcome — the caller gets [`SolveOutcome::Infeasible`]
//! and writes nothing — while backend failures surface as errors.
//!
//! Repeated solves over identical input intentionally vary: each
//! [`RosterSolver::new`] draws a fresh perturbation seed, so the
//! backend may return a different optimal roster per run. Fix the seed
//! with [`RosterSolver::with_seed`] for reproducible solves.

use good_lp::{default_solver, ResolutionError, Solution, SolverModel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{DemandForecast, Nurse, Shift};

use super::model::{RosterModel, RosterModelBuilder};

/// The extracted 0/1 solution, indexed (nurse, day, shift).
#[derive(Debug, Clone)]
pub struct AssignmentMatrix {
    days: usize,
    on: Vec<bool>,
}

impl AssignmentMatrix {
    pub(crate) fn new(days: usize, on: Vec<bool>) -> Self {
        Self { days, on }
    }

    /// Whether a nurse works a (day, shift) slot.
    #[inline]
    pub fn is_on(&self, nurse: usize, day: usize, shift: Shift) -> bool {
        self.on
            .get((nurse * self.days + day) * Shift::COUNT + shift.index())
            .copied()
            .unwrap_or(false)
    }

    /// Horizon length in days.
    pub fn days(&self) -> usize {
        self.days
    }

    /// Number of nurses the matrix covers.
    pub fn nurse_count(&self) -> usize {
        if self.days == 0 {
            0
        } else {
            self.on.len() / (self.days * Shift::COUNT)
        }
    }

    /// Total assigned shifts.
    pub fn assigned_count(&self) -> usize {
        self.on.iter().filter(|&&b| b).count()
    }

    /// Assigned shifts for one nurse across the horizon.
    pub fn shifts_for(&self, nurse: usize) -> usize {
        let mut count = 0;
        for day in 0..self.days {
            for shift in Shift::ALL {
                if self.is_on(nurse, day, shift) {
                    count += 1;
                }
            }
        }
        count
    }
}

/// Result of one solve attempt.
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    /// An optimal or feasible assignment was found.
    Solved(AssignmentMatrix),
    /// The constraints cannot all be met; no assignment exists.
    Infeasible {
        /// Human-readable explanation for reporting.
        reason: String,
    },
}

impl SolveOutcome {
    /// The assignment, if one was found.
    pub fn assignment(&self) -> Option<&AssignmentMatrix> {
        match self {
            SolveOutcome::Solved(m) => Some(m),
            SolveOutcome::Infeasible { .. } => None,
        }
    }
}

/// MILP-backed assignment solver.
#[derive(Debug, Clone)]
pub struct RosterSolver {
    seed: u64,
}

impl RosterSolver {
    /// Creates a solver with a freshly drawn perturbation seed.
    ///
    /// Two solvers created this way will usually pick different optima
    /// for the same input; that variety is intended.
    pub fn new() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }

    /// Creates a solver with a fixed perturbation seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    /// The perturbation seed in use.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Builds the model for `total_days` days and solves it.
    pub fn solve(
        &self,
        nurses: &[Nurse],
        demand: &DemandForecast,
        total_days: usize,
    ) -> Result<SolveOutcome> {
        let builder = RosterModelBuilder::new(nurses, demand, total_days);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let RosterModel {
            vars,
            objective,
            constraints,
            grid,
        } = builder.build(&mut rng);

        debug!(
            variables = grid.len(),
            constraints = constraints.len(),
            seed = self.seed,
            "solving assignment model"
        );

        let mut problem = vars.minimise(objective).using(default_solver);
        for constraint in constraints {
            problem = problem.with(constraint);
        }

        match problem.solve() {
            Ok(solution) => {
                let on: Vec<bool> = grid.iter().map(|v| solution.value(v) > 0.5).collect();
                let matrix = AssignmentMatrix::new(total_days, on);
                debug!(assigned = matrix.assigned_count(), "assignment extracted");
                Ok(SolveOutcome::Solved(matrix))
            }
            Err(ResolutionError::Infeasible) => Ok(SolveOutcome::Infeasible {
                reason: "coverage floors cannot be met by the eligible roster \
                         under the weekly shift and hour caps"
                    .to_string(),
            }),
            Err(other) => Err(Error::Backend(other.to_string())),
        }
    }
}

impl Default for RosterSolver {
    fn default() -> Self {
        Self::new()
    }
}

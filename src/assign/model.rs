//! MIP formulation of the weekly assignment problem.
//!
//! One binary decision variable per (nurse, day, shift), four linear
//! constraint families, and a utilization objective:
//!
//! 1. at most one shift per nurse per day;
//! 2. no Night shift followed by next-day Morning;
//! 3. at least [`MIN_WARD_COVER`] eligible nurses per day/ward/shift,
//!    independent of the forecast value (the forecast is reported
//!    alongside the roster, it is not a bound);
//! 4. per-nurse weekly shift cap and the fixed hour ceiling.
//!
//! The objective minimizes unused nurse capacity — equivalently it
//! maximizes total assigned shifts. A seeded sub-integral perturbation
//! on the objective coefficients varies which optimal assignment the
//! backend returns without changing the optimal assignment count.

use good_lp::{constraint, variable, variables, Constraint, Expression, ProblemVariables, Variable};
use rand::Rng;

use crate::models::{DemandForecast, Nurse, Shift, MAX_WEEKLY_HOURS, MIN_WARD_COVER, SHIFT_HOURS, Ward};

use super::eligibility::EligibilityTable;

/// The decision variables of one solve, indexed (nurse, day, shift).
#[derive(Debug, Clone)]
pub struct VariableGrid {
    vars: Vec<Variable>,
    days: usize,
}

impl VariableGrid {
    fn new(vars: Vec<Variable>, days: usize) -> Self {
        Self { vars, days }
    }

    /// Variable for one (nurse, day, shift) slot.
    #[inline]
    pub fn at(&self, nurse: usize, day: usize, shift: Shift) -> Variable {
        self.vars[(nurse * self.days + day) * Shift::COUNT + shift.index()]
    }

    /// All variables in (nurse, day, shift) order.
    pub fn iter(&self) -> impl Iterator<Item = Variable> + '_ {
        self.vars.iter().copied()
    }

    /// Total variable count.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the grid has no variables.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Horizon length the grid was built for.
    pub fn days(&self) -> usize {
        self.days
    }
}

/// A fully constructed assignment model, ready to hand to the backend.
pub struct RosterModel {
    /// Variable registry (consumed by the solve).
    pub vars: ProblemVariables,
    /// Objective to minimize.
    pub objective: Expression,
    /// All hard constraints.
    pub constraints: Vec<Constraint>,
    /// Slot-indexed handle onto the variables.
    pub grid: VariableGrid,
}

/// Builds [`RosterModel`]s from a roster and a demand table.
///
/// The builder owns the variable set for the duration of one build and
/// hands it off inside the returned model; eligibility is resolved
/// through a table built once at construction.
pub struct RosterModelBuilder<'a> {
    nurses: &'a [Nurse],
    demand: &'a DemandForecast,
    total_days: usize,
    eligibility: EligibilityTable,
}

impl<'a> RosterModelBuilder<'a> {
    /// Creates a builder for a horizon of `total_days` days.
    pub fn new(nurses: &'a [Nurse], demand: &'a DemandForecast, total_days: usize) -> Self {
        Self {
            nurses,
            demand,
            total_days,
            eligibility: EligibilityTable::build(nurses),
        }
    }

    /// The eligibility table backing constraint construction.
    pub fn eligibility(&self) -> &EligibilityTable {
        &self.eligibility
    }

    /// Expected number of constraints for the current roster/horizon.
    pub fn constraint_count(&self) -> usize {
        let n = self.nurses.len();
        let d = self.total_days;
        n * d                                      // one shift per day
            + n * d.saturating_sub(1)              // night rest
            + d * Ward::COUNT * Shift::COUNT       // coverage floors
            + n * 2                                // weekly caps
    }

    /// Builds variables, constraints, and the seeded objective.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> RosterModel {
        let n = self.nurses.len();
        let days = self.total_days;

        let mut vars = variables!();
        let mut slots = Vec::with_capacity(n * days * Shift::COUNT);
        for _ in 0..n * days * Shift::COUNT {
            slots.push(vars.add(variable().binary()));
        }
        let grid = VariableGrid::new(slots, days);

        let mut constraints = Vec::with_capacity(self.constraint_count());

        // 1. One shift per nurse per day (a nurse may also rest).
        for nurse in 0..n {
            for day in 0..days {
                let mut on_day = Expression::with_capacity(Shift::COUNT);
                for shift in Shift::ALL {
                    on_day += grid.at(nurse, day, shift);
                }
                constraints.push(constraint!(on_day <= 1.0));
            }
        }

        // 2. A Night shift blocks the following Morning.
        for nurse in 0..n {
            for day in 0..days.saturating_sub(1) {
                let rest = grid.at(nurse, day, Shift::Night) + grid.at(nurse, day + 1, Shift::Morning);
                constraints.push(constraint!(rest <= 1.0));
            }
        }

        // 3. Coverage floor per day/ward/shift over eligible nurses.
        // The forecast value itself is not a bound; only the floor is.
        let floor = f64::from(MIN_WARD_COVER);
        for day in 0..days {
            for ward in Ward::ALL {
                let eligible = self.eligibility.eligible(ward);
                for shift in Shift::ALL {
                    let mut cover = Expression::with_capacity(eligible.len());
                    for &nurse in eligible {
                        cover += grid.at(nurse, day, shift);
                    }
                    constraints.push(constraint!(cover >= floor));
                }
            }
        }

        // 4. Weekly shift cap and hour ceiling per nurse.
        let hour_ceiling = f64::from(MAX_WEEKLY_HOURS);
        for (idx, nurse) in self.nurses.iter().enumerate() {
            let mut shifts_total = Expression::with_capacity(days * Shift::COUNT);
            let mut hours_total = Expression::with_capacity(days * Shift::COUNT);
            for day in 0..days {
                for shift in Shift::ALL {
                    shifts_total += grid.at(idx, day, shift);
                    hours_total += grid.at(idx, day, shift) * f64::from(SHIFT_HOURS);
                }
            }
            let shift_cap = f64::from(nurse.max_shifts_per_week);
            constraints.push(constraint!(shifts_total <= shift_cap));
            constraints.push(constraint!(hours_total <= hour_ceiling));
        }

        // Objective: every assigned shift reduces unused capacity by
        // one. The epsilon budget stays below one in total, so the
        // assignment count still dominates and only tie-breaking among
        // optimal rosters varies with the seed.
        let mut objective = Expression::with_capacity(grid.len());
        if !grid.is_empty() {
            let epsilon_cap = 0.5 / grid.len() as f64;
            for var in grid.iter() {
                objective += var * (-1.0 - rng.random_range(0.0..epsilon_cap));
            }
        }

        RosterModel {
            vars,
            objective,
            constraints,
            grid,
        }
    }

    /// Roster size this builder was constructed with.
    pub fn nurse_count(&self) -> usize {
        self.nurses.len()
    }

    /// Demand table handed to the builder.
    pub fn demand(&self) -> &DemandForecast {
        self.demand
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DemandRow;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn flat_demand(days: usize) -> DemandForecast {
        let start = NaiveDate::from_ymd_opt(2025, 9, 22).unwrap();
        DemandForecast::new(
            (0..days)
                .map(|d| DemandRow::new(start + chrono::Duration::days(d as i64)))
                .collect(),
        )
    }

    fn small_roster() -> Vec<Nurse> {
        vec![
            Nurse::new("N1", Ward::Ed).with_skill("ED").with_max_shifts(5),
            Nurse::new("N2", Ward::Gw).with_skill("GW").with_max_shifts(5),
            Nurse::new("N3", Ward::Icu).with_skill("ICU").with_max_shifts(5),
        ]
    }

    #[test]
    fn test_variable_grid_shape() {
        let nurses = small_roster();
        let demand = flat_demand(7);
        let builder = RosterModelBuilder::new(&nurses, &demand, 7);
        let mut rng = StdRng::seed_from_u64(1);
        let model = builder.build(&mut rng);

        assert_eq!(model.grid.len(), 3 * 7 * Shift::COUNT);
        assert_eq!(model.grid.days(), 7);
    }

    #[test]
    fn test_constraint_count_matches_families() {
        let nurses = small_roster();
        let demand = flat_demand(7);
        let builder = RosterModelBuilder::new(&nurses, &demand, 7);
        let mut rng = StdRng::seed_from_u64(2);
        let model = builder.build(&mut rng);

        // 3*7 one-per-day + 3*6 rest + 7*3*3 coverage + 3*2 caps
        let expected = 21 + 18 + 63 + 6;
        assert_eq!(builder.constraint_count(), expected);
        assert_eq!(model.constraints.len(), expected);
    }

    #[test]
    fn test_empty_roster_builds_empty_model() {
        let nurses: Vec<Nurse> = Vec::new();
        let demand = flat_demand(2);
        let builder = RosterModelBuilder::new(&nurses, &demand, 2);
        let mut rng = StdRng::seed_from_u64(3);
        let model = builder.build(&mut rng);

        assert!(model.grid.is_empty());
        // Coverage floors remain even with nobody to assign.
        assert_eq!(model.constraints.len(), 2 * Ward::COUNT * Shift::COUNT);
    }
}

//! Constrained shift assignment.
//!
//! Encodes a nurse roster, the ward/shift vocabularies, and a demand
//! table into a 0/1 integer program, then solves it exactly with a
//! MILP backend. At realistic staff sizes the variable count stays in
//! the tens-to-hundreds, where an exact solve is tractable and — unlike
//! heuristics — can never violate a hard coverage or labor constraint.
//!
//! # Modules
//!
//! - **`eligibility`**: per-ward nurse index table, built once per roster
//! - **`model`**: decision variables, constraint families, objective
//! - **`solver`**: backend invocation and 0/1 extraction

mod eligibility;
mod model;
mod solver;

pub use eligibility::EligibilityTable;
pub use model::{RosterModel, RosterModelBuilder, VariableGrid};
pub use solver::{AssignmentMatrix, RosterSolver, SolveOutcome};

//! Ward-eligibility lookup table.
//!
//! Built once per roster load. Constraint construction and roster
//! materialization both resolve eligibility through index lookups here
//! instead of rescanning skill strings per constraint.

use crate::models::{Nurse, Ward};

/// Precomputed eligibility of a roster against the fixed ward set.
#[derive(Debug, Clone)]
pub struct EligibilityTable {
    /// Nurse indices eligible per ward, in roster order.
    by_ward: [Vec<usize>; Ward::COUNT],
    /// First eligible ward per nurse, in priority order.
    primary: Vec<Option<Ward>>,
}

impl EligibilityTable {
    /// Scans the roster once and indexes eligibility per ward.
    pub fn build(nurses: &[Nurse]) -> Self {
        let mut by_ward: [Vec<usize>; Ward::COUNT] = Default::default();
        let mut primary = Vec::with_capacity(nurses.len());

        for (idx, nurse) in nurses.iter().enumerate() {
            let mut first = None;
            for ward in Ward::ALL {
                if nurse.is_eligible_for(ward) {
                    by_ward[ward.index()].push(idx);
                    first.get_or_insert(ward);
                }
            }
            primary.push(first);
        }

        Self { by_ward, primary }
    }

    /// Nurse indices eligible for a ward.
    pub fn eligible(&self, ward: Ward) -> &[usize] {
        &self.by_ward[ward.index()]
    }

    /// Whether a nurse counts toward a ward's coverage.
    pub fn is_eligible(&self, nurse: usize, ward: Ward) -> bool {
        self.by_ward[ward.index()].binary_search(&nurse).is_ok()
    }

    /// The ward a nurse's duty resolves to (first eligible in priority
    /// order), if any.
    pub fn primary_ward(&self, nurse: usize) -> Option<Ward> {
        self.primary.get(nurse).copied().flatten()
    }

    /// Nurse indices with no eligible ward at all.
    ///
    /// Such nurses can never appear on duty; usually a data-quality
    /// problem in the roster.
    pub fn unassignable(&self) -> Vec<usize> {
        self.primary
            .iter()
            .enumerate()
            .filter(|(_, ward)| ward.is_none())
            .map(|(idx, _)| idx)
            .collect()
    }
}

//! Roster input validation.
//!
//! Structural integrity checks on the nurse roster before a scheduling
//! run. Detects:
//! - Duplicate nurse IDs
//! - An empty roster
//!
//! Eligibility gaps (a nurse whose skill set matches no ward) are not
//! errors — such a nurse simply never appears on duty — but they
//! usually indicate a data-quality problem, so they are reported
//! separately for diagnostics.

use std::collections::HashSet;

use crate::assign::EligibilityTable;
use crate::models::Nurse;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two nurses share the same ID.
    DuplicateId,
    /// The roster has no nurses.
    EmptyRoster,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the nurse roster.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(nurses: &[Nurse]) -> ValidationResult {
    let mut errors = Vec::new();

    if nurses.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyRoster,
            "Roster has no nurses",
        ));
    }

    let mut ids = HashSet::new();
    for nurse in nurses {
        if !ids.insert(nurse.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate nurse ID: {}", nurse.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// IDs of nurses whose skill set matches no ward.
///
/// Diagnostics only: the scheduler still runs, those nurses just stay
/// off every slot.
pub fn eligibility_gaps(nurses: &[Nurse]) -> Vec<String> {
    let table = EligibilityTable::build(nurses);
    table
        .unassignable()
        .into_iter()
        .map(|idx| nurses[idx].id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ward;

    fn sample_roster() -> Vec<Nurse> {
        vec![
            Nurse::new("N1", Ward::Ed).with_skill("ED Nurse"),
            Nurse::new("N2", Ward::Gw).with_skill("GW"),
        ]
    }

    #[test]
    fn test_valid_roster() {
        assert!(validate_roster(&sample_roster()).is_ok());
    }

    #[test]
    fn test_duplicate_nurse_id() {
        let mut roster = sample_roster();
        roster.push(Nurse::new("N1", Ward::Icu).with_skill("ICU"));

        let errors = validate_roster(&roster).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("N1")));
    }

    #[test]
    fn test_empty_roster() {
        let errors = validate_roster(&[]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyRoster));
    }

    #[test]
    fn test_eligibility_gaps() {
        let mut roster = sample_roster();
        roster.push(Nurse::new("N3", Ward::Gw).with_skill("Ward Clerk"));

        assert_eq!(eligibility_gaps(&roster), vec!["N3".to_string()]);
        assert!(eligibility_gaps(&sample_roster()).is_empty());
    }
}

//! Ward vocabulary and skill-based eligibility matching.
//!
//! The ward set is closed: the roster covers the Emergency Department,
//! the General Ward, and the Intensive Care Unit. Declaration order is
//! the duty-resolution priority order — when a nurse is eligible for
//! several wards, the first eligible ward in [`Ward::ALL`] wins.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A hospital ward with its own staffing demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ward {
    /// Emergency Department.
    #[serde(rename = "ED")]
    Ed,
    /// General Ward.
    #[serde(rename = "GW")]
    Gw,
    /// Intensive Care Unit.
    #[serde(rename = "ICU")]
    Icu,
}

/// Role suffixes recognized in skill strings.
///
/// A skill like "ICU Nurse" or "GW Charge Nurse" grants the same ward
/// eligibility as the bare ward code.
pub const ROLE_SUFFIXES: [&str; 5] = [
    "Nurse",
    "Specialist",
    "Charge Nurse",
    "Nursing Officer",
    "Senior Staff Nurse",
];

impl Ward {
    /// All wards, in duty-resolution priority order.
    pub const ALL: [Ward; 3] = [Ward::Ed, Ward::Gw, Ward::Icu];

    /// Number of wards.
    pub const COUNT: usize = 3;

    /// Short ward code as it appears in skill strings and reports.
    pub fn code(&self) -> &'static str {
        match self {
            Ward::Ed => "ED",
            Ward::Gw => "GW",
            Ward::Icu => "ICU",
        }
    }

    /// Position in the fixed ward order.
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parses a ward code.
    pub fn from_code(code: &str) -> Option<Ward> {
        Ward::ALL.into_iter().find(|w| w.code() == code)
    }

    /// Whether a single skill string grants eligibility for this ward.
    ///
    /// A skill qualifies if it equals the ward code exactly, or equals
    /// "{code} {role}" for a recognized role suffix. Anything else —
    /// including a code with a trailing unknown word — does not count.
    pub fn matches_skill(&self, skill: &str) -> bool {
        if skill == self.code() {
            return true;
        }
        match skill
            .strip_prefix(self.code())
            .and_then(|rest| rest.strip_prefix(' '))
        {
            Some(role) => ROLE_SUFFIXES.contains(&role),
            None => false,
        }
    }
}

impl fmt::Display for Ward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

//! Nurse model.
//!
//! A nurse record as loaded from the external roster: identity, home
//! department, skill strings, and the weekly shift cap. Records are
//! loaded once per scheduling run and are immutable during it.

use serde::{Deserialize, Serialize};

use super::Ward;

/// A rosterable nurse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nurse {
    /// Unique nurse identifier (e.g. "N1000").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Home department.
    pub department: Ward,
    /// Skill strings establishing ward eligibility ("ICU", "ICU Nurse", ...).
    pub skills: Vec<String>,
    /// Maximum shifts this nurse may work in one week.
    pub max_shifts_per_week: u32,
    /// Pay grade. Metadata only — not a scheduling constraint.
    pub grade: Option<String>,
}

impl Nurse {
    /// Creates a nurse with default caps and no skills.
    pub fn new(id: impl Into<String>, department: Ward) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            department,
            skills: Vec::new(),
            max_shifts_per_week: 7,
            grade: None,
        }
    }

    /// Sets the nurse name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a skill string.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.push(skill.into());
        self
    }

    /// Replaces the skill list.
    pub fn with_skills(mut self, skills: Vec<String>) -> Self {
        self.skills = skills;
        self
    }

    /// Sets the weekly shift cap.
    pub fn with_max_shifts(mut self, max_shifts_per_week: u32) -> Self {
        self.max_shifts_per_week = max_shifts_per_week;
        self
    }

    /// Sets the pay grade.
    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    /// Whether this nurse has an exact skill string.
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    /// Whether this nurse's skill set qualifies them for a ward.
    pub fn is_eligible_for(&self, ward: Ward) -> bool {
        self.skills.iter().any(|s| ward.matches_skill(s))
    }

    /// First eligible ward in priority order, if any.
    ///
    /// This is the ward a duty slot resolves to when the nurse is
    /// assigned a shift. A nurse with no eligible ward can never be
    /// shown on duty.
    pub fn eligible_ward(&self) -> Option<Ward> {
        Ward::ALL.into_iter().find(|&w| self.is_eligible_for(w))
    }
}

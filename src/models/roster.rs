//! Roster (output) model.
//!
//! The materialized result of one weekly run: a calendar-indexed duty
//! table, a per-day coverage summary comparing forecast demand with
//! assigned headcount, and per-nurse hour totals. Produced once per
//! solve and treated as immutable output.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{Shift, Ward};

/// Duty state of one roster cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DutyStatus {
    /// Not assigned this slot.
    Off,
    /// Working this slot in the given ward.
    OnDuty(Ward),
}

impl DutyStatus {
    /// Whether the cell is an assignment.
    #[inline]
    pub fn is_on(&self) -> bool {
        matches!(self, DutyStatus::OnDuty(_))
    }
}

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DutyStatus::Off => f.write_str("Off"),
            DutyStatus::OnDuty(ward) => write!(f, "On Duty - {ward}"),
        }
    }
}

/// Column label for a (date, shift) slot: "{Weekday} {YYYY-MM-DD} {Shift}".
pub fn slot_label(date: NaiveDate, shift: Shift) -> String {
    format!("{} {} {}", date.format("%A"), date.format("%Y-%m-%d"), shift)
}

/// One nurse's duty row across the horizon.
///
/// Duties are day-major: index = day × shifts-per-day + shift index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRow {
    /// Nurse identifier.
    pub nurse_id: String,
    /// Nurse name.
    pub name: String,
    /// Duty per slot, day-major.
    pub duties: Vec<DutyStatus>,
}

impl RosterRow {
    /// Duty for a (day, shift) slot.
    pub fn duty(&self, day: usize, shift: Shift) -> DutyStatus {
        self.duties
            .get(day * Shift::COUNT + shift.index())
            .copied()
            .unwrap_or(DutyStatus::Off)
    }

    /// Number of assigned shifts in this row.
    pub fn shifts_on(&self) -> usize {
        self.duties.iter().filter(|d| d.is_on()).count()
    }
}

/// The duty table for one generated week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekRoster {
    /// First calendar day of the horizon.
    pub start_date: NaiveDate,
    /// Horizon length in days.
    pub days: usize,
    /// One row per nurse, in roster order.
    pub rows: Vec<RosterRow>,
}

impl WeekRoster {
    /// Calendar date for a 0-based day offset.
    pub fn date_of(&self, day: usize) -> NaiveDate {
        self.start_date + Duration::days(day as i64)
    }

    /// Column labels in day-major slot order.
    pub fn slot_labels(&self) -> Vec<String> {
        let mut labels = Vec::with_capacity(self.days * Shift::COUNT);
        for day in 0..self.days {
            let date = self.date_of(day);
            for shift in Shift::ALL {
                labels.push(slot_label(date, shift));
            }
        }
        labels
    }

    /// Row for a nurse id.
    pub fn row(&self, nurse_id: &str) -> Option<&RosterRow> {
        self.rows.iter().find(|r| r.nurse_id == nurse_id)
    }

    /// Number of nurses on duty in a (day, shift) slot, any ward.
    pub fn on_duty_count(&self, day: usize, shift: Shift) -> usize {
        self.rows
            .iter()
            .filter(|r| r.duty(day, shift).is_on())
            .count()
    }
}

/// Forecast-vs-assigned headcount for one ward/shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCoverage {
    /// Forecast headcount for the ward that day.
    pub predicted: u32,
    /// Eligible nurses actually on duty.
    pub assigned: u32,
}

/// Coverage of one ward across a day's shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WardCoverage {
    /// Coverage per shift, in shift order.
    pub by_shift: [ShiftCoverage; Shift::COUNT],
    /// Assigned headcount summed over the day's shifts.
    pub assigned_total: u32,
}

impl WardCoverage {
    /// Coverage for one shift.
    pub fn shift(&self, shift: Shift) -> ShiftCoverage {
        self.by_shift[shift.index()]
    }
}

/// Per-day coverage summary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageRow {
    /// Calendar date.
    pub date: NaiveDate,
    /// Coverage per ward.
    pub wards: BTreeMap<Ward, WardCoverage>,
}

impl CoverageRow {
    /// Weekday name ("Monday", ...).
    pub fn day_name(&self) -> String {
        self.date.format("%A").to_string()
    }
}

/// Complete output of one weekly generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekSchedule {
    /// The duty table.
    pub roster: WeekRoster,
    /// One coverage row per day of the horizon.
    pub summary: Vec<CoverageRow>,
    /// Nurse id → total assigned hours for the horizon.
    pub nurse_hours: BTreeMap<String, u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 22).unwrap()
    }

    #[test]
    fn test_duty_display() {
        assert_eq!(DutyStatus::Off.to_string(), "Off");
        assert_eq!(DutyStatus::OnDuty(Ward::Icu).to_string(), "On Duty - ICU");
    }

    #[test]
    fn test_slot_label_format() {
        assert_eq!(
            slot_label(monday(), Shift::Morning),
            "Monday 2025-09-22 Morning"
        );
        assert_eq!(
            slot_label(monday() + Duration::days(1), Shift::Night),
            "Tuesday 2025-09-23 Night"
        );
    }

    #[test]
    fn test_row_indexing() {
        let mut duties = vec![DutyStatus::Off; 2 * Shift::COUNT];
        duties[Shift::COUNT + Shift::Night.index()] = DutyStatus::OnDuty(Ward::Ed);
        let row = RosterRow {
            nurse_id: "N1".into(),
            name: "A".into(),
            duties,
        };
        assert_eq!(row.duty(0, Shift::Night), DutyStatus::Off);
        assert_eq!(row.duty(1, Shift::Night), DutyStatus::OnDuty(Ward::Ed));
        assert_eq!(row.shifts_on(), 1);
        // Out-of-range slots read as Off.
        assert_eq!(row.duty(5, Shift::Morning), DutyStatus::Off);
    }

    #[test]
    fn test_roster_labels_and_counts() {
        let roster = WeekRoster {
            start_date: monday(),
            days: 2,
            rows: vec![RosterRow {
                nurse_id: "N1".into(),
                name: "A".into(),
                duties: vec![
                    DutyStatus::OnDuty(Ward::Gw),
                    DutyStatus::Off,
                    DutyStatus::Off,
                    DutyStatus::Off,
                    DutyStatus::OnDuty(Ward::Gw),
                    DutyStatus::Off,
                ],
            }],
        };
        let labels = roster.slot_labels();
        assert_eq!(labels.len(), 6);
        assert_eq!(labels[0], "Monday 2025-09-22 Morning");
        assert_eq!(labels[5], "Tuesday 2025-09-23 Night");
        assert_eq!(roster.on_duty_count(0, Shift::Morning), 1);
        assert_eq!(roster.on_duty_count(0, Shift::Evening), 0);
        assert!(roster.row("N1").is_some());
        assert!(roster.row("N9").is_none());
    }
}

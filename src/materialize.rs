//! Roster materialization.
//!
//! Projects a solved (or all-off) assignment into the calendar-indexed
//! output: the duty table, the forecast-vs-assigned coverage summary,
//! and per-nurse hour totals. This is pure bookkeeping — no constraint
//! is checked here; the solver already guaranteed them.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use tracing::warn;

use crate::assign::{AssignmentMatrix, EligibilityTable};
use crate::models::{
    CoverageRow, DemandForecast, DutyStatus, Nurse, RosterRow, Shift, ShiftCoverage, Ward,
    WardCoverage, WeekRoster, WeekSchedule, SHIFT_HOURS,
};

/// Materializes one week's schedule from a solved assignment.
///
/// Every cell defaults to Off; a set variable resolves to
/// `On Duty - {ward}` through the nurse's first eligible ward in
/// priority order. A nurse with no eligible ward stays Off (and accrues
/// no hours) even if the solver set a variable for them — that case is
/// logged as a data-quality warning.
///
/// The coverage summary counts *eligible* on-duty nurses per
/// ward/shift, so a nurse eligible for several wards contributes to
/// each of those wards' summary cells while appearing in exactly one
/// ward in the duty table.
pub fn materialize_week(
    assignment: &AssignmentMatrix,
    nurses: &[Nurse],
    demand: &DemandForecast,
    start_date: NaiveDate,
) -> WeekSchedule {
    let days = assignment.days();
    let eligibility = EligibilityTable::build(nurses);

    for idx in eligibility.unassignable() {
        warn!(
            nurse = %nurses[idx].id,
            "nurse has no ward eligibility; every slot stays off"
        );
    }

    let mut rows = Vec::with_capacity(nurses.len());
    let mut nurse_hours: BTreeMap<String, u32> =
        nurses.iter().map(|n| (n.id.clone(), 0)).collect();

    for (idx, nurse) in nurses.iter().enumerate() {
        let mut duties = vec![DutyStatus::Off; days * Shift::COUNT];
        for day in 0..days {
            for shift in Shift::ALL {
                if !assignment.is_on(idx, day, shift) {
                    continue;
                }
                if let Some(ward) = eligibility.primary_ward(idx) {
                    duties[day * Shift::COUNT + shift.index()] = DutyStatus::OnDuty(ward);
                    if let Some(hours) = nurse_hours.get_mut(&nurse.id) {
                        *hours += SHIFT_HOURS;
                    }
                }
            }
        }
        rows.push(RosterRow {
            nurse_id: nurse.id.clone(),
            name: nurse.name.clone(),
            duties,
        });
    }

    let roster = WeekRoster {
        start_date,
        days,
        rows,
    };

    let mut summary = Vec::with_capacity(days);
    for day in 0..days {
        let mut wards = BTreeMap::new();
        for ward in Ward::ALL {
            let mut by_shift = [ShiftCoverage::default(); Shift::COUNT];
            for shift in Shift::ALL {
                let assigned = eligibility
                    .eligible(ward)
                    .iter()
                    .filter(|&&n| assignment.is_on(n, day, shift))
                    .count() as u32;
                by_shift[shift.index()] = ShiftCoverage {
                    predicted: demand.required(day, ward),
                    assigned,
                };
            }
            let assigned_total = by_shift.iter().map(|c| c.assigned).sum();
            wards.insert(
                ward,
                WardCoverage {
                    by_shift,
                    assigned_total,
                },
            );
        }
        summary.push(CoverageRow {
            date: start_date + Duration::days(day as i64),
            wards,
        });
    }

    WeekSchedule {
        roster,
        summary,
        nurse_hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DemandRow;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 22).unwrap()
    }

    fn demand(days: usize) -> DemandForecast {
        DemandForecast::new(
            (0..days)
                .map(|d| {
                    DemandRow::new(monday() + Duration::days(d as i64))
                        .with_required(Ward::Ed, 4)
                })
                .collect(),
        )
    }

    /// Assignment with chosen slots switched on.
    fn matrix(nurses: usize, days: usize, on_slots: &[(usize, usize, Shift)]) -> AssignmentMatrix {
        let mut on = vec![false; nurses * days * Shift::COUNT];
        for &(nurse, day, shift) in on_slots {
            on[(nurse * days + day) * Shift::COUNT + shift.index()] = true;
        }
        AssignmentMatrix::new(days, on)
    }

    #[test]
    fn test_cells_default_to_off() {
        let nurses = vec![Nurse::new("N1", Ward::Ed).with_name("A").with_skill("ED")];
        let schedule = materialize_week(&matrix(1, 2, &[]), &nurses, &demand(2), monday());

        let row = schedule.roster.row("N1").unwrap();
        assert_eq!(row.shifts_on(), 0);
        assert_eq!(schedule.nurse_hours["N1"], 0);
    }

    #[test]
    fn test_duty_resolves_to_priority_ward() {
        // Eligible for GW and ICU: the duty cell shows GW, the earlier
        // ward in priority order.
        let nurses = vec![Nurse::new("N1", Ward::Icu)
            .with_name("A")
            .with_skill("ICU Nurse")
            .with_skill("GW")];
        let schedule = materialize_week(
            &matrix(1, 2, &[(0, 0, Shift::Evening)]),
            &nurses,
            &demand(2),
            monday(),
        );

        let row = schedule.roster.row("N1").unwrap();
        assert_eq!(row.duty(0, Shift::Evening), DutyStatus::OnDuty(Ward::Gw));
        assert_eq!(row.duty(0, Shift::Morning), DutyStatus::Off);
        assert_eq!(schedule.nurse_hours["N1"], SHIFT_HOURS);
    }

    #[test]
    fn test_hours_accumulate_per_shift() {
        let nurses = vec![Nurse::new("N1", Ward::Ed).with_skill("ED")];
        let schedule = materialize_week(
            &matrix(
                1,
                3,
                &[(0, 0, Shift::Morning), (0, 1, Shift::Evening), (0, 2, Shift::Night)],
            ),
            &nurses,
            &demand(3),
            monday(),
        );
        assert_eq!(schedule.nurse_hours["N1"], 3 * SHIFT_HOURS);
    }

    #[test]
    fn test_ineligible_nurse_stays_off_without_hours() {
        // The solver may set a variable for a nurse with no ward
        // eligibility; the projection keeps them off.
        let nurses = vec![Nurse::new("N1", Ward::Gw).with_skill("Phlebotomy")];
        let schedule = materialize_week(
            &matrix(1, 1, &[(0, 0, Shift::Morning)]),
            &nurses,
            &demand(1),
            monday(),
        );

        let row = schedule.roster.row("N1").unwrap();
        assert_eq!(row.duty(0, Shift::Morning), DutyStatus::Off);
        assert_eq!(schedule.nurse_hours["N1"], 0);
    }

    #[test]
    fn test_summary_counts_eligible_on_duty() {
        let nurses = vec![
            Nurse::new("N1", Ward::Ed).with_skill("ED"),
            // Eligible for ED and ICU: counts toward both summaries.
            Nurse::new("N2", Ward::Icu).with_skill("ICU").with_skill("ED"),
        ];
        let schedule = materialize_week(
            &matrix(2, 1, &[(0, 0, Shift::Morning), (1, 0, Shift::Morning)]),
            &nurses,
            &demand(1),
            monday(),
        );

        let day = &schedule.summary[0];
        assert_eq!(day.date, monday());
        assert_eq!(day.day_name(), "Monday");

        let ed = &day.wards[&Ward::Ed];
        assert_eq!(ed.shift(Shift::Morning).assigned, 2);
        assert_eq!(ed.shift(Shift::Morning).predicted, 4);
        assert_eq!(ed.shift(Shift::Evening).assigned, 0);
        assert_eq!(ed.assigned_total, 2);

        let icu = &day.wards[&Ward::Icu];
        assert_eq!(icu.shift(Shift::Morning).assigned, 1);
        assert_eq!(icu.shift(Shift::Morning).predicted, 2);
    }
}

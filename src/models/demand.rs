//! Forecast demand table.
//!
//! One row per day of the forecast horizon with a required headcount
//! per ward. Headcounts never drop below [`MIN_WARD_COVER`]: the floor
//! is enforced at construction, so a row built from any model output —
//! including a negative prediction — still satisfies it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Ward;

/// Minimum nurses per ward per shift, independent of forecast demand.
pub const MIN_WARD_COVER: u32 = 2;

/// Required headcount per ward for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandRow {
    /// Forecast date.
    pub date: NaiveDate,
    /// Required headcount per ward. Always ≥ [`MIN_WARD_COVER`].
    required: BTreeMap<Ward, u32>,
}

impl DemandRow {
    /// Creates a row at the coverage floor for every ward.
    pub fn new(date: NaiveDate) -> Self {
        let required = Ward::ALL
            .into_iter()
            .map(|w| (w, MIN_WARD_COVER))
            .collect();
        Self { date, required }
    }

    /// Sets a ward's headcount, clamped to the coverage floor.
    pub fn with_required(mut self, ward: Ward, headcount: u32) -> Self {
        self.required.insert(ward, headcount.max(MIN_WARD_COVER));
        self
    }

    /// Required headcount for a ward.
    pub fn required(&self, ward: Ward) -> u32 {
        self.required.get(&ward).copied().unwrap_or(MIN_WARD_COVER)
    }
}

/// A demand forecast covering a run's horizon, one row per day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandForecast {
    rows: Vec<DemandRow>,
}

impl DemandForecast {
    /// Wraps forecast rows.
    pub fn new(rows: Vec<DemandRow>) -> Self {
        Self { rows }
    }

    /// Number of forecast days.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the forecast is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Forecast rows in date order.
    pub fn rows(&self) -> &[DemandRow] {
        &self.rows
    }

    /// Row for a 0-based day offset within the horizon.
    pub fn get(&self, day: usize) -> Option<&DemandRow> {
        self.rows.get(day)
    }

    /// Required headcount for a day/ward, at the floor when the day is
    /// outside the forecast.
    pub fn required(&self, day: usize, ward: Ward) -> u32 {
        self.rows
            .get(day)
            .map(|r| r.required(ward))
            .unwrap_or(MIN_WARD_COVER)
    }
}

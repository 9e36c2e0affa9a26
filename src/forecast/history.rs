//! Historical operational signals.
//!
//! The time-ordered dataset consumed both by offline training and by
//! online prediction: daily case counts, ICU occupancy, admissions,
//! and the per-ward staffing levels actually worked (the training
//! targets). Missing numeric values deserialize to zero, matching the
//! zero-fill applied before training.

use chrono::NaiveDate;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::models::Ward;

/// Number of model input features per row.
pub const FEATURE_COUNT: usize = 3;

/// One day of historical signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    /// Observation date.
    pub date: NaiveDate,
    /// New cases recorded that day.
    #[serde(default)]
    pub new_cases: f64,
    /// ICU occupancy that day.
    #[serde(default)]
    pub icu_occupancy: f64,
    /// Admissions that day.
    #[serde(default)]
    pub admissions: f64,
    /// Nurses actually staffed per ward that day (training targets).
    #[serde(default)]
    pub ward_staffing: BTreeMap<Ward, f64>,
    /// Total nurse demand that day (overall-model training target).
    #[serde(default)]
    pub total_demand: f64,
}

impl HistoryRow {
    /// Creates a row with all signals at zero.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            new_cases: 0.0,
            icu_occupancy: 0.0,
            admissions: 0.0,
            ward_staffing: BTreeMap::new(),
            total_demand: 0.0,
        }
    }

    /// Sets the three model input signals.
    pub fn with_signals(mut self, new_cases: f64, icu_occupancy: f64, admissions: f64) -> Self {
        self.new_cases = new_cases;
        self.icu_occupancy = icu_occupancy;
        self.admissions = admissions;
        self
    }

    /// Sets one ward's actual staffing level.
    pub fn with_ward_staffing(mut self, ward: Ward, nurses: f64) -> Self {
        self.ward_staffing.insert(ward, nurses);
        self
    }

    /// Sets the total demand target.
    pub fn with_total_demand(mut self, total: f64) -> Self {
        self.total_demand = total;
        self
    }

    /// The model input feature vector for this row.
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [self.new_cases, self.icu_occupancy, self.admissions]
    }

    /// Actual staffing for a ward, zero when unrecorded.
    pub fn staffing(&self, ward: Ward) -> f64 {
        self.ward_staffing.get(&ward).copied().unwrap_or(0.0)
    }
}

/// The time-ordered historical dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryTable {
    rows: Vec<HistoryRow>,
}

impl HistoryTable {
    /// Builds a table, ordering rows by date ascending.
    pub fn new(mut rows: Vec<HistoryRow>) -> Self {
        rows.sort_by_key(|r| r.date);
        Self { rows }
    }

    /// Rows in date order.
    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Most recent row. An empty table is a fatal precondition.
    pub fn latest(&self) -> Result<&HistoryRow> {
        self.rows.last().ok_or(Error::EmptyHistory)
    }

    /// Feature matrix for training, one row per observation.
    pub fn feature_matrix(&self) -> Array2<f64> {
        let mut m = Array2::zeros((self.rows.len(), FEATURE_COUNT));
        for (i, row) in self.rows.iter().enumerate() {
            for (j, value) in row.features().into_iter().enumerate() {
                m[[i, j]] = value;
            }
        }
        m
    }

    /// Training targets for one ward's staffing model.
    pub fn ward_targets(&self, ward: Ward) -> Vec<f64> {
        self.rows.iter().map(|r| r.staffing(ward)).collect()
    }

    /// Training targets for the overall-demand model.
    pub fn total_targets(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.total_demand).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    #[test]
    fn test_rows_are_sorted_on_construction() {
        let table = HistoryTable::new(vec![
            HistoryRow::new(date(3)),
            HistoryRow::new(date(1)),
            HistoryRow::new(date(2)),
        ]);
        let dates: Vec<_> = table.rows().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(1), date(2), date(3)]);
        assert_eq!(table.latest().unwrap().date, date(3));
    }

    #[test]
    fn test_empty_table_is_fatal() {
        let table = HistoryTable::new(Vec::new());
        assert!(matches!(table.latest(), Err(Error::EmptyHistory)));
    }

    #[test]
    fn test_feature_matrix_shape_and_values() {
        let table = HistoryTable::new(vec![
            HistoryRow::new(date(1)).with_signals(10.0, 4.0, 7.0),
            HistoryRow::new(date(2)).with_signals(12.0, 5.0, 8.0),
        ]);
        let m = table.feature_matrix();
        assert_eq!(m.dim(), (2, FEATURE_COUNT));
        assert_eq!(m[[0, 0]], 10.0);
        assert_eq!(m[[1, 2]], 8.0);
    }

    #[test]
    fn test_missing_values_read_as_zero() {
        // Serialized rows may omit any signal; they deserialize to 0.
        let row: HistoryRow = serde_json::from_str(r#"{"date":"2025-09-01"}"#).unwrap();
        assert_eq!(row.features(), [0.0, 0.0, 0.0]);
        assert_eq!(row.staffing(Ward::Icu), 0.0);
        assert_eq!(row.total_demand, 0.0);
    }

    #[test]
    fn test_targets() {
        let table = HistoryTable::new(vec![
            HistoryRow::new(date(1))
                .with_ward_staffing(Ward::Icu, 6.0)
                .with_total_demand(20.0),
            HistoryRow::new(date(2)).with_total_demand(22.0),
        ]);
        assert_eq!(table.ward_targets(Ward::Icu), vec![6.0, 0.0]);
        assert_eq!(table.total_targets(), vec![20.0, 22.0]);
    }
}

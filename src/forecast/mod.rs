//! Demand forecasting.
//!
//! One regression model per ward, trained offline and loaded once per
//! scheduling run. Prediction is a persistence forecast: every day of
//! the horizon is scored with the *same* feature vector taken from the
//! most recent history row — next week is assumed to resemble the last
//! observation. Predictions are rounded and floored at the ward
//! coverage minimum.
//!
//! # Modules
//!
//! - **`forest`**: random-forest regression (fit / predict)
//! - **`history`**: the time-ordered signal dataset
//! - **`store`**: JSON artifact persistence per model

mod forest;
mod history;
mod store;

pub use forest::{ForestConfig, RandomForest};
pub use history::{HistoryRow, HistoryTable, FEATURE_COUNT};
pub use store::ModelStore;

use std::collections::BTreeMap;

use chrono::Duration;
use rand::Rng;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{DemandForecast, DemandRow, Ward, MIN_WARD_COVER};

/// Per-ward demand predictor.
///
/// Holds one trained model per ward; models are read-only after load.
#[derive(Debug, Clone)]
pub struct DemandForecaster {
    models: BTreeMap<Ward, RandomForest>,
}

impl DemandForecaster {
    /// Loads every ward model from the store.
    ///
    /// A missing artifact for any ward aborts the load — the pipeline
    /// never runs with a partial model set.
    pub fn load(store: &ModelStore) -> Result<Self> {
        let mut models = BTreeMap::new();
        for ward in Ward::ALL {
            models.insert(ward, store.load_ward(ward)?);
        }
        Ok(Self { models })
    }

    /// Forecasts `days` rows of per-ward headcount.
    ///
    /// The latest history row's features are reused for every forecast
    /// day; each prediction is rounded to the nearest integer and
    /// floored at [`MIN_WARD_COVER`].
    pub fn forecast(&self, history: &HistoryTable, days: usize) -> Result<DemandForecast> {
        let last = history.latest()?;
        let features = last.features();

        let mut rows = Vec::with_capacity(days);
        for offset in 1..=days as i64 {
            let mut row = DemandRow::new(last.date + Duration::days(offset));
            for (&ward, model) in &self.models {
                row = row.with_required(ward, floor_headcount(model.predict(&features)));
            }
            rows.push(row);
        }
        Ok(DemandForecast::new(rows))
    }
}

/// Rounds a raw prediction and applies the coverage floor. Negative
/// and near-zero predictions land on the floor rather than underflow.
fn floor_headcount(raw: f64) -> u32 {
    let rounded = raw.round();
    if rounded < f64::from(MIN_WARD_COVER) {
        MIN_WARD_COVER
    } else {
        rounded as u32
    }
}

/// Offline training: fits one forest per ward plus the overall-demand
/// model on the full history and replaces any prior artifacts.
pub fn train_models<R: Rng + ?Sized>(
    history: &HistoryTable,
    store: &ModelStore,
    config: &ForestConfig,
    rng: &mut R,
) -> Result<()> {
    if history.is_empty() {
        return Err(Error::EmptyHistory);
    }
    let x = history.feature_matrix();
    for ward in Ward::ALL {
        let y = history.ward_targets(ward);
        let forest = RandomForest::fit(&x, &y, config, rng);
        store.save_ward(ward, &forest)?;
    }
    let total = RandomForest::fit(&x, &history.total_targets(), config, rng);
    store.save_total(&total)?;
    info!(rows = history.len(), trees = config.trees, "trained demand models");
    Ok(())
}

//! Forecast engine: model fitting, horizon projection and the business
//! rules applied on top
//!
//! One [`ShelfForecaster`] serves one material/customer pairing and is
//! driven once per forecast cycle: forecast, sell, record actual sales
//! via [`ShelfForecaster::update_carryover_stock`], forecast again. The
//! carryover scalar is the only state that survives between cycles;
//! everything else is recomputed from the input series on every call.

use crate::data::{AlignedDailySeries, QuantityColumn};
use crate::error::{ForecastError, Result};
use crate::smoothing::{FittedHoltWinters, HoltWinters};
use crate::utils::future_dates;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shelf_data::Pairing;
use std::collections::HashMap;

/// Configuration surface of the forecast engine.
///
/// Supplied by the web/CLI layer; validated once on engine construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Number of future days to project
    pub horizon_days: usize,
    /// Demand cycle length in days, typically the shelf-life window
    pub seasonal_period: usize,
    /// Upper bound on expired stock as a fraction of the same day's
    /// shelved stock
    pub max_expiry_ratio: f64,
    /// Minimum floor enforced on shelved forecasts
    pub safety_stock: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: 7,
            seasonal_period: 4,
            max_expiry_ratio: 0.05,
            safety_stock: 20.0,
        }
    }
}

impl ForecastConfig {
    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<()> {
        if self.horizon_days == 0 {
            return Err(ForecastError::InvalidConfiguration(
                "forecast horizon must cover at least one day".to_string(),
            ));
        }
        if self.seasonal_period < 2 {
            return Err(ForecastError::InvalidConfiguration(format!(
                "seasonal period must be at least 2, got {}",
                self.seasonal_period
            )));
        }
        if !self.max_expiry_ratio.is_finite() || self.max_expiry_ratio < 0.0 {
            return Err(ForecastError::InvalidConfiguration(format!(
                "max expiry ratio must be non-negative, got {}",
                self.max_expiry_ratio
            )));
        }
        if !self.safety_stock.is_finite() || self.safety_stock < 0.0 {
            return Err(ForecastError::InvalidConfiguration(format!(
                "safety stock must be non-negative, got {}",
                self.safety_stock
            )));
        }
        Ok(())
    }
}

/// One (date, value) row of a forecast, as exchanged with consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    /// Forecast day
    pub date: NaiveDate,
    /// Forecast quantity
    pub value: f64,
}

/// Forward-looking series of daily forecast values.
///
/// Covers consecutive calendar dates starting the day after the input
/// series' last date, one value per day of the horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl ForecastSeries {
    /// Create a forecast series from parallel date and value columns.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(ForecastError::DataError(format!(
                "dates length ({}) doesn't match values length ({})",
                dates.len(),
                values.len()
            )));
        }
        Ok(Self { dates, values })
    }

    /// Forecast days, ascending
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Forecast values, aligned with [`dates`](Self::dates)
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of forecast days
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the forecast covers no days
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Sum of all forecast values across the horizon
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Row view of the forecast
    pub fn rows(&self) -> Vec<ForecastRow> {
        self.dates
            .iter()
            .zip(&self.values)
            .map(|(&date, &value)| ForecastRow { date, value })
            .collect()
    }

    /// Serialize the row view to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.rows())?)
    }
}

/// Forecast engine for one material/customer pairing.
///
/// Holds the configuration and the carryover-stock scalar. Forecast
/// calls never change engine state, so repeated calls over the same
/// series return identical results until
/// [`update_carryover_stock`](Self::update_carryover_stock) is invoked.
#[derive(Debug, Clone)]
pub struct ShelfForecaster {
    config: ForecastConfig,
    carryover_stock: f64,
}

impl ShelfForecaster {
    /// Create an engine with the given configuration and zero carryover.
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            carryover_stock: 0.0,
        })
    }

    /// Engine configuration
    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Unsold stock rolled forward from the previous cycle
    pub fn carryover_stock(&self) -> f64 {
        self.carryover_stock
    }

    /// Fit the smoothing model to one quantity column of the series.
    pub fn fit_column(
        &self,
        series: &AlignedDailySeries,
        column: QuantityColumn,
    ) -> Result<FittedHoltWinters> {
        if series.is_empty() {
            return Err(ForecastError::EmptySeries(format!(
                "cannot fit {} on an empty series",
                column
            )));
        }
        let model = HoltWinters::with_period(self.config.seasonal_period)?;
        model.fit(series.column(column))
    }

    /// The days the next forecast will cover: `horizon_days` consecutive
    /// dates starting the day after the series' last date.
    pub fn forecasting_period(&self, series: &AlignedDailySeries) -> Result<Vec<NaiveDate>> {
        let last = series.last_date().ok_or_else(|| {
            ForecastError::EmptySeries(
                "cannot derive a forecasting period from an empty series".to_string(),
            )
        })?;
        Ok(future_dates(last, self.config.horizon_days))
    }

    /// Raw horizon projection for one column, rounded to whole units.
    fn project_column(
        &self,
        series: &AlignedDailySeries,
        column: QuantityColumn,
    ) -> Result<Vec<f64>> {
        let fitted = self.fit_column(series, column)?;
        Ok(fitted
            .forecast(self.config.horizon_days)
            .into_iter()
            .map(f64::round)
            .collect())
    }

    /// Carryover-adjusted forecast for one quantity column.
    ///
    /// The projection is rounded to whole units, raised by the carryover
    /// buffer and floored at the safety stock. This models the shelved
    /// path; the expired projection bypasses both adjustments (see
    /// [`expired_forecast`](Self::expired_forecast)).
    pub fn quantity_forecast(
        &self,
        series: &AlignedDailySeries,
        column: QuantityColumn,
    ) -> Result<ForecastSeries> {
        let dates = self.forecasting_period(series)?;
        let values = self
            .project_column(series, column)?
            .into_iter()
            .map(|v| (v + self.carryover_stock).max(self.config.safety_stock))
            .collect();
        ForecastSeries::new(dates, values)
    }

    /// Shelved-quantity forecast with carryover and safety-stock floor.
    pub fn shelved_forecast(&self, series: &AlignedDailySeries) -> Result<ForecastSeries> {
        self.quantity_forecast(series, QuantityColumn::ShelvedSum)
    }

    /// Expired-quantity forecast, clipped non-positive and held at or
    /// below `-max_expiry_ratio` times the same day's shelved forecast.
    pub fn expired_forecast(
        &self,
        series: &AlignedDailySeries,
        shelved: &ForecastSeries,
    ) -> Result<ForecastSeries> {
        let dates = self.forecasting_period(series)?;
        let raw = self.project_column(series, QuantityColumn::ExpiredSum)?;
        if raw.len() != shelved.len() {
            return Err(ForecastError::DataError(format!(
                "shelved forecast covers {} days, expected {}",
                shelved.len(),
                raw.len()
            )));
        }

        let ratio = self.config.max_expiry_ratio;
        let values = raw
            .iter()
            .zip(shelved.values())
            .map(|(&expired, &shelved)| expired.min(0.0).min(-ratio * shelved))
            .collect();
        ForecastSeries::new(dates, values)
    }

    /// Net-availability forecast: shelved plus expired per day, floored
    /// at zero.
    pub fn net_forecast(&self, series: &AlignedDailySeries) -> Result<ForecastSeries> {
        let shelved = self.shelved_forecast(series)?;
        let expired = self.expired_forecast(series, &shelved)?;

        let values = shelved
            .values()
            .iter()
            .zip(expired.values())
            .map(|(&s, &e)| (s + e).max(0.0))
            .collect();
        ForecastSeries::new(shelved.dates().to_vec(), values)
    }

    /// Record the actual sales of the elapsed cycle and roll the unsold
    /// remainder forward.
    ///
    /// The new carryover is the shelved forecast total minus
    /// `actual_sold`, clamped to zero from below and to
    /// `total * max_expiry_ratio` from above — the buffer may never
    /// imply more slack than the wastage policy tolerates. Returns the
    /// stored value. This is the engine's only feedback loop from
    /// realized outcomes into future predictions.
    pub fn update_carryover_stock(
        &mut self,
        series: &AlignedDailySeries,
        actual_sold: f64,
    ) -> Result<f64> {
        let total = self.shelved_forecast(series)?.total();
        let unsold = total - actual_sold;
        self.carryover_stock = unsold.max(0.0).min(total * self.config.max_expiry_ratio);

        tracing::debug!(
            total_shelved = total,
            actual_sold,
            carryover = self.carryover_stock,
            "carryover stock updated"
        );
        Ok(self.carryover_stock)
    }
}

/// Registry of forecaster instances, one per material/customer pairing.
///
/// Keeps the carryover state of every pairing explicit and scoped
/// instead of process-global. Callers running concurrent cycles for the
/// same pairing must serialize access to its entry.
#[derive(Debug, Default)]
pub struct ForecasterRegistry {
    config: ForecastConfig,
    forecasters: HashMap<Pairing, ShelfForecaster>,
}

impl ForecasterRegistry {
    /// Create a registry whose engines share one configuration.
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            forecasters: HashMap::new(),
        })
    }

    /// The forecaster for a pairing, created with zero carryover on
    /// first use.
    pub fn forecaster_mut(&mut self, pairing: &Pairing) -> &mut ShelfForecaster {
        self.forecasters
            .entry(pairing.clone())
            .or_insert_with(|| ShelfForecaster {
                config: self.config.clone(),
                carryover_stock: 0.0,
            })
    }

    /// The forecaster for a pairing, if one has been created.
    pub fn forecaster(&self, pairing: &Pairing) -> Option<&ShelfForecaster> {
        self.forecasters.get(pairing)
    }

    /// Number of pairings with a live forecaster
    pub fn len(&self) -> usize {
        self.forecasters.len()
    }

    /// Whether no forecaster has been created yet
    pub fn is_empty(&self) -> bool {
        self.forecasters.is_empty()
    }
}

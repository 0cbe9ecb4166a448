//! Utility functions for the shelf_forecast crate

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};

/// Consecutive calendar dates starting the day after `last_date`.
pub fn future_dates(last_date: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(horizon);
    let mut current = last_date;

    for _ in 0..horizon {
        current = current + Duration::days(1);
        dates.push(current);
    }

    dates
}

/// Accuracy of a forecast against realized daily quantities.
///
/// Used to evaluate the engine on held-out days. MAPE skips days whose
/// actual quantity is zero; SMAPE treats a 0/0 day as a perfect hit.
pub fn forecast_accuracy(forecast: &[f64], actual: &[f64]) -> Result<ForecastAccuracy> {
    if forecast.len() != actual.len() || forecast.is_empty() {
        return Err(ForecastError::DataError(
            "forecast and actual values must have the same non-zero length".to_string(),
        ));
    }

    let n = forecast.len() as f64;
    let mut abs_sum = 0.0;
    let mut sq_sum = 0.0;
    let mut pct_sum = 0.0;
    let mut sym_sum = 0.0;

    for (&f, &a) in forecast.iter().zip(actual) {
        let err = a - f;
        abs_sum += err.abs();
        sq_sum += err * err;
        if a != 0.0 {
            pct_sum += (err.abs() / a.abs()) * 100.0;
        }
        if a.abs() + f.abs() != 0.0 {
            sym_sum += 200.0 * err.abs() / (a.abs() + f.abs());
        }
    }

    let mse = sq_sum / n;
    Ok(ForecastAccuracy {
        mae: abs_sum / n,
        mse,
        rmse: mse.sqrt(),
        mape: pct_sum / n,
        smape: sym_sum / n,
    })
}

/// Forecast accuracy metrics
#[derive(Debug, Clone)]
pub struct ForecastAccuracy {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error
    pub mape: f64,
    /// Symmetric Mean Absolute Percentage Error
    pub smape: f64,
}

impl std::fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Accuracy Metrics:")?;
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        writeln!(f, "  MSE:   {:.4}", self.mse)?;
        writeln!(f, "  RMSE:  {:.4}", self.rmse)?;
        writeln!(f, "  MAPE:  {:.4}%", self.mape)?;
        writeln!(f, "  SMAPE: {:.4}%", self.smape)?;
        Ok(())
    }
}

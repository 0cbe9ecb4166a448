//! Additive Holt-Winters smoothing with fixed coefficients
//!
//! ```text
//! Level:    L_t = alpha (x_t - S_{t-m}) + (1 - alpha)(L_{t-1} + T_{t-1})
//! Trend:    T_t = beta (L_t - L_{t-1}) + (1 - beta) T_{t-1}
//! Season:   S_t = gamma (x_t - L_t) + (1 - gamma) S_{t-m}
//! Forecast: F_{t+h} = L_t + h T_t + S_{t-m+((h-1) mod m)}
//! ```
//!
//! The smoothing constants are fixed rather than fitted by likelihood
//! search, so two runs over the same history always produce the same
//! forecast. Trend damping is not applied.

use crate::error::{ForecastError, Result};

/// Level smoothing constant. Slightly aggressive so the fit follows
/// recent demand swings rather than the long-run average.
pub const LEVEL_SMOOTHING: f64 = 0.6;
/// Trend smoothing constant
pub const TREND_SMOOTHING: f64 = 0.5;
/// Seasonal smoothing constant
pub const SEASONAL_SMOOTHING: f64 = 0.6;

/// Additive-trend, additive-seasonal exponential smoothing model
#[derive(Debug, Clone)]
pub struct HoltWinters {
    alpha: f64,
    beta: f64,
    gamma: f64,
    period: usize,
}

/// Fitted smoothing state, ready to project forward
#[derive(Debug, Clone)]
pub struct FittedHoltWinters {
    /// Final level estimate
    level: f64,
    /// Final trend estimate
    trend: f64,
    /// Seasonal factors of the most recent cycle, oldest first
    seasonal: Vec<f64>,
}

impl HoltWinters {
    /// Create a model with explicit smoothing constants.
    ///
    /// All constants must lie strictly between 0 and 1 and the seasonal
    /// period must be at least 2.
    pub fn new(alpha: f64, beta: f64, gamma: f64, period: usize) -> Result<Self> {
        for (name, value) in [("level", alpha), ("trend", beta), ("seasonal", gamma)] {
            if !value.is_finite() || value <= 0.0 || value >= 1.0 {
                return Err(ForecastError::InvalidConfiguration(format!(
                    "{} smoothing constant must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }
        if period < 2 {
            return Err(ForecastError::InvalidConfiguration(format!(
                "seasonal period must be at least 2, got {}",
                period
            )));
        }

        Ok(Self {
            alpha,
            beta,
            gamma,
            period,
        })
    }

    /// Create a model with the fixed deployment coefficients and the
    /// given seasonal period.
    pub fn with_period(period: usize) -> Result<Self> {
        Self::new(LEVEL_SMOOTHING, TREND_SMOOTHING, SEASONAL_SMOOTHING, period)
    }

    /// Seasonal period in days
    pub fn period(&self) -> usize {
        self.period
    }

    /// Fit the model to a value series.
    ///
    /// Needs at least two full seasonal cycles; initialization is
    /// undefined below that.
    pub fn fit(&self, values: &[f64]) -> Result<FittedHoltWinters> {
        let m = self.period;
        let n = values.len();

        if n < 2 * m {
            return Err(ForecastError::InsufficientHistory(format!(
                "need at least {} observations for a seasonal period of {}, got {}",
                2 * m,
                m,
                n
            )));
        }

        // Initialization: level from the first cycle's mean, trend from
        // the cycle-over-cycle differences, seasonal from the first
        // cycle's deviations.
        let l0: f64 = values[..m].iter().sum::<f64>() / m as f64;
        let t0: f64 = (0..m)
            .map(|i| (values[m + i] - values[i]) / m as f64)
            .sum::<f64>()
            / m as f64;

        let mut seasonal = vec![0.0; n];
        for i in 0..m {
            seasonal[i] = values[i] - l0;
        }

        let mut level = l0;
        let mut trend = t0;

        for t in m..n {
            let s_prev = seasonal[t - m];
            let prev_level = level;

            level = self.alpha * (values[t] - s_prev) + (1.0 - self.alpha) * (level + trend);
            trend = self.beta * (level - prev_level) + (1.0 - self.beta) * trend;
            seasonal[t] = self.gamma * (values[t] - level) + (1.0 - self.gamma) * s_prev;
        }

        Ok(FittedHoltWinters {
            level,
            trend,
            seasonal: seasonal[n - m..].to_vec(),
        })
    }
}

impl FittedHoltWinters {
    /// Project `horizon` steps past the end of the fitted series.
    pub fn forecast(&self, horizon: usize) -> Vec<f64> {
        let m = self.seasonal.len();
        (1..=horizon)
            .map(|h| self.level + h as f64 * self.trend + self.seasonal[(h - 1) % m])
            .collect()
    }

    /// Final level estimate
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Final trend estimate
    pub fn trend(&self) -> f64 {
        self.trend
    }

    /// Seasonal factors of the most recent cycle, oldest first
    pub fn seasonal(&self) -> &[f64] {
        &self.seasonal
    }
}

//! # Shelf Forecast
//!
//! A Rust library for short-term forecasting of perishable shelf stock:
//! how much will be shelved, how much will expire, and what remains
//! available, per day and per material/customer pairing.
//!
//! ## Features
//!
//! - Offset alignment of expiry write-offs to their shelving date
//! - Additive Holt-Winters smoothing with fixed, reproducible coefficients
//! - Business-rule post-processing: expiry cap, safety-stock floor,
//!   carryover-stock feedback from realized sales
//! - CSV ingestion of billing exports
//! - Per material/customer forecaster registry
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use shelf_data::DailyMaterialMetric;
//! use shelf_forecast::{offset_and_recalculate, ForecastConfig, ShelfForecaster};
//!
//! # fn main() -> Result<(), shelf_forecast::ForecastError> {
//! // Twelve days of per-material sums straight from billing
//! let day = |d: u32| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
//! let rows: Vec<DailyMaterialMetric> = (1..=12)
//!     .map(|d| DailyMaterialMetric {
//!         date: day(d),
//!         material_name: "BREAD ROLL SANDWICH".to_string(),
//!         shelved_sum: 120.0,
//!         expired_sum: -6.0,
//!     })
//!     .collect();
//!
//! // Realign expiry to its shelving date and collapse materials
//! let series = offset_and_recalculate(&rows, -4)?;
//!
//! // Forecast with the default business rules
//! let forecaster = ShelfForecaster::new(ForecastConfig::default())?;
//! let net = forecaster.net_forecast(&series)?;
//! assert_eq!(net.len(), 7);
//! # Ok(())
//! # }
//! ```

pub mod align;
pub mod data;
pub mod engine;
pub mod error;
pub mod loader;
pub mod smoothing;
pub mod utils;

// Re-export commonly used types
pub use crate::align::{offset_and_recalculate, DEFAULT_SHIFT_OFFSET};
pub use crate::data::{AlignedDailyRow, AlignedDailySeries, QuantityColumn};
pub use crate::engine::{
    ForecastConfig, ForecastSeries, ForecasterRegistry, ShelfForecaster,
};
pub use crate::error::ForecastError;
pub use crate::loader::BillingLoader;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

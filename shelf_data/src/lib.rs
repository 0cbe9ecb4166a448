//! # Shelf Data
//!
//! `shelf_data` provides the record types used to describe perishable
//! shelf stock: raw billing transactions, the shelved/expired sign split,
//! and the per-day, per-material aggregation consumed by the
//! `shelf_forecast` crate.
//!
//! A billing export records one signed quantity per transaction. Positive
//! quantities are stock placed on the shelf ("shelved"); negative
//! quantities are stock removed due to expiry ("expired"). Everything
//! downstream works on the daily sums of those two buckets.
//!
//! ## Usage Example
//!
//! ```
//! use chrono::NaiveDate;
//! use shelf_data::{aggregate_daily, filter_records, BillingRecord, Pairing};
//!
//! let pairing = Pairing::new("BREAD ROLL SANDWICH", 210094);
//! let records = vec![
//!     BillingRecord {
//!         billing_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!         material_name: "BREAD ROLL SANDWICH".to_string(),
//!         sold_to_party: 210094,
//!         quantity: 120.0,
//!     },
//!     BillingRecord {
//!         billing_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!         material_name: "BREAD ROLL SANDWICH".to_string(),
//!         sold_to_party: 210094,
//!         quantity: -8.0,
//!     },
//! ];
//!
//! let metrics = aggregate_daily(&filter_records(&records, &pairing));
//! assert_eq!(metrics.len(), 1);
//! assert_eq!(metrics[0].shelved_sum, 120.0);
//! assert_eq!(metrics[0].expired_sum, -8.0);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

// Synthetic record generation
pub mod utils;

/// Errors that can occur while normalizing billing data
#[derive(Error, Debug)]
pub enum ShelfDataError {
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// A raw sales transaction as exported from billing.
///
/// `quantity` is signed: positive units were shelved, negative units were
/// written off as expired. The date carries no time component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingRecord {
    /// Calendar day the transaction was billed
    pub billing_date: NaiveDate,
    /// Material (product) name
    pub material_name: String,
    /// Customer the material was sold to
    pub sold_to_party: u64,
    /// Signed quantity in base units
    pub quantity: f64,
}

impl BillingRecord {
    /// Check the record against the export contract: a named material
    /// and a finite quantity.
    pub fn validate(&self) -> Result<(), ShelfDataError> {
        if self.material_name.trim().is_empty() {
            return Err(ShelfDataError::InvalidRecord(format!(
                "record on {} has no material name",
                self.billing_date
            )));
        }
        if !self.quantity.is_finite() {
            return Err(ShelfDataError::InvalidRecord(format!(
                "record on {} for '{}' has non-finite quantity",
                self.billing_date, self.material_name
            )));
        }
        Ok(())
    }

    /// Shelved portion of the quantity: the quantity itself when
    /// positive, otherwise zero.
    pub fn shelved_part(&self) -> f64 {
        self.quantity.max(0.0)
    }

    /// Expired portion of the quantity: the quantity itself when
    /// negative, otherwise zero. Always non-positive.
    pub fn expired_part(&self) -> f64 {
        self.quantity.min(0.0)
    }
}

/// A material/customer pairing. Forecast state is scoped to one pairing;
/// pairings never share state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing {
    /// Material (product) name
    pub material_name: String,
    /// Customer the material is sold to
    pub sold_to_party: u64,
}

impl Pairing {
    /// Create a new pairing key
    pub fn new(material_name: &str, sold_to_party: u64) -> Self {
        Self {
            material_name: material_name.to_string(),
            sold_to_party,
        }
    }

    /// Whether a billing record belongs to this pairing
    pub fn matches(&self, record: &BillingRecord) -> bool {
        record.material_name == self.material_name && record.sold_to_party == self.sold_to_party
    }
}

impl std::fmt::Display for Pairing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.material_name, self.sold_to_party)
    }
}

/// Daily shelved/expired sums for one material.
///
/// One row per (date, material). `shelved_sum` is non-negative,
/// `expired_sum` non-positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMaterialMetric {
    /// Calendar day
    pub date: NaiveDate,
    /// Material (product) name
    pub material_name: String,
    /// Sum of positive transaction quantities for the day
    pub shelved_sum: f64,
    /// Sum of negative transaction quantities for the day
    pub expired_sum: f64,
}

/// Select the records belonging to one material/customer pairing.
pub fn filter_records(records: &[BillingRecord], pairing: &Pairing) -> Vec<BillingRecord> {
    records
        .iter()
        .filter(|r| pairing.matches(r))
        .cloned()
        .collect()
}

/// Split each record's quantity by sign and sum the buckets per
/// (date, material).
///
/// Output rows are ordered by date, then material name, one row per
/// distinct (date, material) seen in the input.
pub fn aggregate_daily(records: &[BillingRecord]) -> Vec<DailyMaterialMetric> {
    let mut sums: BTreeMap<(NaiveDate, String), (f64, f64)> = BTreeMap::new();

    for record in records {
        let entry = sums
            .entry((record.billing_date, record.material_name.clone()))
            .or_insert((0.0, 0.0));
        entry.0 += record.shelved_part();
        entry.1 += record.expired_part();
    }

    sums.into_iter()
        .map(
            |((date, material_name), (shelved_sum, expired_sum))| DailyMaterialMetric {
                date,
                material_name,
                shelved_sum,
                expired_sum,
            },
        )
        .collect()
}

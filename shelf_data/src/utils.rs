//! Utility functions for generating billing histories
//!
//! Used by examples and tests that need a plausible demand history
//! without a real billing export.

use crate::{BillingRecord, Pairing};
use chrono::{Duration, NaiveDate};
use rand::Rng;

/// Demand multipliers over a four-day shelf-life cycle
const CYCLE_PATTERN: [f64; 4] = [1.15, 0.95, 0.90, 1.00];

/// Generate a synthetic billing history for one pairing.
///
/// Each day produces one shelved transaction around `base_shelved`
/// (modulated by a four-day cycle and random noise of up to
/// `volatility`) and one expiry write-off worth a few percent of the
/// shelved quantity.
///
/// # Arguments
/// * `pairing` - Material/customer the records belong to
/// * `start` - First billing date
/// * `days` - Number of consecutive days to generate
/// * `base_shelved` - Baseline daily shelved quantity
/// * `volatility` - Relative noise amplitude, e.g. 0.1 for +/-10%
pub fn generate_billing_records(
    pairing: &Pairing,
    start: NaiveDate,
    days: usize,
    base_shelved: f64,
    volatility: f64,
) -> Vec<BillingRecord> {
    let mut rng = rand::thread_rng();
    let mut records = Vec::with_capacity(days * 2);

    for d in 0..days {
        let date = start + Duration::days(d as i64);
        let cycle = CYCLE_PATTERN[d % CYCLE_PATTERN.len()];
        let noise = (rng.gen::<f64>() - 0.5) * 2.0 * volatility;
        let shelved = (base_shelved * cycle * (1.0 + noise)).round().max(0.0);
        let expired = -(shelved * rng.gen_range(0.02..0.10)).round();

        records.push(BillingRecord {
            billing_date: date,
            material_name: pairing.material_name.clone(),
            sold_to_party: pairing.sold_to_party,
            quantity: shelved,
        });
        records.push(BillingRecord {
            billing_date: date,
            material_name: pairing.material_name.clone(),
            sold_to_party: pairing.sold_to_party,
            quantity: expired,
        });
    }

    records
}

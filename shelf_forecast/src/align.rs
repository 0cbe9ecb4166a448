//! Offset alignment of expired stock to its shelving date
//!
//! A write-off for expired stock is billed on the day the stock leaves
//! the shelf, which is the shelf-life window after the day it was
//! shelved. Shifting the expired column back by that window lines each
//! write-off up with the shelving it belongs to, so the forecast models
//! see cause and effect on the same row.

use crate::data::{AlignedDailyRow, AlignedDailySeries};
use crate::error::Result;
use chrono::NaiveDate;
use shelf_data::DailyMaterialMetric;
use std::collections::BTreeMap;

/// Default realignment offset: expiry is pulled four days earlier,
/// matching the product's shelf life.
pub const DEFAULT_SHIFT_OFFSET: i32 = -4;

/// Realign the expired column by `shift_offset` rows, recompute the net
/// column and collapse the material dimension into one daily series.
///
/// The shift runs over the full row sequence sorted by date (stable, so
/// same-date rows keep their input order) *before* the per-date
/// reduction. When several materials report on interleaved dates the row
/// offset therefore covers less than `|shift_offset|` calendar days —
/// the per-date row density decides how far the expiry moves. Callers
/// feeding multi-material tables should pass data with a uniform number
/// of rows per date.
///
/// The last `|shift_offset|` rows of the reduced series carry the fill
/// value instead of real expiry and are dropped. An input with no more
/// rows than that yields an empty series, which callers must treat as
/// insufficient history rather than an all-zero forecast base.
pub fn offset_and_recalculate(
    rows: &[DailyMaterialMetric],
    shift_offset: i32,
) -> Result<AlignedDailySeries> {
    let mut sorted: Vec<&DailyMaterialMetric> = rows.iter().collect();
    sorted.sort_by_key(|r| r.date);

    let n = sorted.len();
    let magnitude = shift_offset.unsigned_abs() as usize;

    // Column-wise shift with zero fill: shifted[i] = original[i - offset]
    let mut expired = vec![0.0; n];
    for (i, slot) in expired.iter_mut().enumerate() {
        let src = i as i64 - shift_offset as i64;
        if (0..n as i64).contains(&src) {
            *slot = sorted[src as usize].expired_sum;
        }
    }

    // Per-row net under the sum convention, then reduce by date
    let mut by_date: BTreeMap<NaiveDate, (f64, f64, f64)> = BTreeMap::new();
    for (i, row) in sorted.iter().enumerate() {
        let net = row.shelved_sum + expired[i];
        let entry = by_date.entry(row.date).or_insert((0.0, 0.0, 0.0));
        entry.0 += row.shelved_sum;
        entry.1 += expired[i];
        entry.2 += net;
    }

    if by_date.len() <= magnitude {
        tracing::debug!(
            rows = n,
            days = by_date.len(),
            shift_offset,
            "not enough history to realign, returning empty series"
        );
        return Ok(AlignedDailySeries::new());
    }

    let keep = by_date.len() - magnitude;
    let aligned: Vec<AlignedDailyRow> = by_date
        .into_iter()
        .take(keep)
        .map(|(date, (shelved_sum, expired_sum, net_sum))| AlignedDailyRow {
            date,
            shelved_sum,
            expired_sum,
            net_sum,
        })
        .collect();

    tracing::debug!(
        rows = n,
        aligned_days = aligned.len(),
        shift_offset,
        "expired column realigned"
    );

    AlignedDailySeries::from_rows(aligned)
}

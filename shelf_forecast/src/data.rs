//! Aligned daily series consumed by the forecast engine

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Quantity columns of an [`AlignedDailySeries`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuantityColumn {
    /// Stock placed on the shelf
    ShelvedSum,
    /// Stock removed due to expiry, stored non-positive
    ExpiredSum,
    /// Net availability
    NetSum,
}

impl QuantityColumn {
    /// Column name as used in the tabular external interface
    pub fn name(&self) -> &'static str {
        match self {
            QuantityColumn::ShelvedSum => "shelved_sum",
            QuantityColumn::ExpiredSum => "expired_sum",
            QuantityColumn::NetSum => "net_sum",
        }
    }
}

impl std::fmt::Display for QuantityColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of an aligned series: material dimension collapsed, expiry
/// realigned to its shelving date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedDailyRow {
    /// Calendar day
    pub date: NaiveDate,
    /// Organization-wide shelved quantity for the day
    pub shelved_sum: f64,
    /// Realigned expired quantity, non-positive
    pub expired_sum: f64,
    /// `shelved_sum + expired_sum`
    pub net_sum: f64,
}

/// Date-ordered daily series of shelved, expired and net sums.
///
/// Rows are strictly ascending by date with no duplicates; both
/// invariants are enforced on construction. Created fresh by
/// [`offset_and_recalculate`](crate::align::offset_and_recalculate) and
/// never mutated afterward.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedDailySeries {
    dates: Vec<NaiveDate>,
    shelved_sum: Vec<f64>,
    expired_sum: Vec<f64>,
    net_sum: Vec<f64>,
}

impl AlignedDailySeries {
    /// Create an empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from rows, validating the date ordering invariant.
    pub fn from_rows(rows: Vec<AlignedDailyRow>) -> Result<Self> {
        let mut series = Self::with_capacity(rows.len());

        for row in rows {
            if let Some(&last) = series.dates.last() {
                if row.date <= last {
                    return Err(ForecastError::DataError(format!(
                        "rows must be strictly ascending by date: {} follows {}",
                        row.date, last
                    )));
                }
            }
            series.dates.push(row.date);
            series.shelved_sum.push(row.shelved_sum);
            series.expired_sum.push(row.expired_sum);
            series.net_sum.push(row.net_sum);
        }

        Ok(series)
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            dates: Vec::with_capacity(capacity),
            shelved_sum: Vec::with_capacity(capacity),
            expired_sum: Vec::with_capacity(capacity),
            net_sum: Vec::with_capacity(capacity),
        }
    }

    /// Number of daily rows
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series has no rows
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The calendar days covered, ascending
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Last covered day, if any
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// One quantity column over all days
    pub fn column(&self, column: QuantityColumn) -> &[f64] {
        match column {
            QuantityColumn::ShelvedSum => &self.shelved_sum,
            QuantityColumn::ExpiredSum => &self.expired_sum,
            QuantityColumn::NetSum => &self.net_sum,
        }
    }

    /// Row view of the series, for display or serialization
    pub fn rows(&self) -> Vec<AlignedDailyRow> {
        (0..self.len())
            .map(|i| AlignedDailyRow {
                date: self.dates[i],
                shelved_sum: self.shelved_sum[i],
                expired_sum: self.expired_sum[i],
                net_sum: self.net_sum[i],
            })
            .collect()
    }

    /// Sub-series covering rows `start..end` (`end` defaults to the
    /// series length).
    pub fn slice(&self, start: usize, end: Option<usize>) -> Result<Self> {
        let end = end.unwrap_or(self.len());
        if start > end || end > self.len() {
            return Err(ForecastError::DataError(format!(
                "slice {}..{} out of bounds for series of length {}",
                start,
                end,
                self.len()
            )));
        }

        Ok(Self {
            dates: self.dates[start..end].to_vec(),
            shelved_sum: self.shelved_sum[start..end].to_vec(),
            expired_sum: self.expired_sum[start..end].to_vec(),
            net_sum: self.net_sum[start..end].to_vec(),
        })
    }

    /// Serialize the row view to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.rows())?)
    }
}

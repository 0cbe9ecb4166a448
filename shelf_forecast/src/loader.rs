//! Ingestion of raw billing exports
//!
//! Reads the CSV export of the sales sheet into [`BillingRecord`]s. The
//! export schema is fixed: `BillingDate`, `MaterialName`, `SoldToParty`,
//! `QuantityInBaseUnit`. Billing dates arrive either as `YYYYMMDD`
//! integers or as ISO `YYYY-MM-DD` strings depending on which system
//! produced the file; both are accepted.

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use shelf_data::BillingRecord;
use std::fs::File;
use std::path::Path;

/// Billing date column name in the export
pub const DATE_COLUMN: &str = "BillingDate";
/// Material name column name in the export
pub const MATERIAL_COLUMN: &str = "MaterialName";
/// Customer column name in the export
pub const SOLD_TO_PARTY_COLUMN: &str = "SoldToParty";
/// Signed quantity column name in the export
pub const QUANTITY_COLUMN: &str = "QuantityInBaseUnit";

/// Loader for billing exports
#[derive(Debug)]
pub struct BillingLoader;

impl BillingLoader {
    /// Load billing records from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<BillingRecord>> {
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        Self::from_dataframe(&df)
    }

    /// Convert an already-loaded DataFrame into billing records
    pub fn from_dataframe(df: &DataFrame) -> Result<Vec<BillingRecord>> {
        let dates = Self::date_column(df)?;
        let materials = Self::utf8_column(df, MATERIAL_COLUMN)?;
        let parties = Self::u64_column(df, SOLD_TO_PARTY_COLUMN)?;
        let quantities = Self::f64_column(df, QUANTITY_COLUMN)?;

        let records = dates
            .into_iter()
            .zip(materials)
            .zip(parties)
            .zip(quantities)
            .map(
                |(((billing_date, material_name), sold_to_party), quantity)| BillingRecord {
                    billing_date,
                    material_name,
                    sold_to_party,
                    quantity,
                },
            )
            .collect::<Vec<_>>();

        for record in &records {
            record
                .validate()
                .map_err(|e| ForecastError::DataError(e.to_string()))?;
        }

        tracing::debug!(records = records.len(), "billing export loaded");
        Ok(records)
    }

    fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
        df.column(name)
            .map_err(|_| ForecastError::DataError(format!("column '{}' not found in export", name)))
    }

    fn date_column(df: &DataFrame) -> Result<Vec<NaiveDate>> {
        let col = Self::column(df, DATE_COLUMN)?;

        match col.dtype() {
            DataType::Utf8 => col
                .utf8()?
                .into_iter()
                .enumerate()
                .map(|(i, raw)| {
                    let raw = raw.ok_or_else(|| Self::null_value(DATE_COLUMN, i))?;
                    Self::parse_date(raw)
                })
                .collect(),
            DataType::Int64 => col
                .i64()?
                .into_iter()
                .enumerate()
                .map(|(i, raw)| {
                    let raw = raw.ok_or_else(|| Self::null_value(DATE_COLUMN, i))?;
                    Self::date_from_numeric(raw)
                })
                .collect(),
            DataType::Date => col
                .date()?
                .into_iter()
                .enumerate()
                .map(|(i, raw)| {
                    let days = raw.ok_or_else(|| Self::null_value(DATE_COLUMN, i))?;
                    NaiveDate::from_ymd_opt(1970, 1, 1)
                        .unwrap()
                        .checked_add_days(chrono::Days::new(days as u64))
                        .ok_or_else(|| {
                            ForecastError::DataError(format!(
                                "billing date out of range: {} days past epoch",
                                days
                            ))
                        })
                })
                .collect(),
            other => Err(ForecastError::DataError(format!(
                "column '{}' has unsupported type {:?}",
                DATE_COLUMN, other
            ))),
        }
    }

    fn parse_date(raw: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y%m%d"))
            .map_err(|_| ForecastError::DataError(format!("unparseable billing date: '{}'", raw)))
    }

    fn date_from_numeric(raw: i64) -> Result<NaiveDate> {
        let (year, month, day) = (raw / 10_000, (raw / 100) % 100, raw % 100);
        NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
            .ok_or_else(|| ForecastError::DataError(format!("unparseable billing date: {}", raw)))
    }

    fn utf8_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
        let col = Self::column(df, name)?;
        match col.dtype() {
            DataType::Utf8 => col
                .utf8()?
                .into_iter()
                .enumerate()
                .map(|(i, v)| {
                    v.map(str::to_string)
                        .ok_or_else(|| Self::null_value(name, i))
                })
                .collect(),
            other => Err(ForecastError::DataError(format!(
                "column '{}' has unsupported type {:?}",
                name, other
            ))),
        }
    }

    fn u64_column(df: &DataFrame, name: &str) -> Result<Vec<u64>> {
        let col = Self::column(df, name)?;
        let raw: Vec<Option<i64>> = match col.dtype() {
            DataType::Int64 => col.i64()?.into_iter().collect(),
            DataType::Int32 => col.i32()?.into_iter().map(|v| v.map(i64::from)).collect(),
            DataType::UInt64 => {
                return col
                    .u64()?
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| v.ok_or_else(|| Self::null_value(name, i)))
                    .collect();
            }
            other => {
                return Err(ForecastError::DataError(format!(
                    "column '{}' has unsupported type {:?}",
                    name, other
                )))
            }
        };

        raw.into_iter()
            .enumerate()
            .map(|(i, v)| {
                let v = v.ok_or_else(|| Self::null_value(name, i))?;
                u64::try_from(v).map_err(|_| {
                    ForecastError::DataError(format!("negative value {} in column '{}'", v, name))
                })
            })
            .collect()
    }

    fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
        let col = Self::column(df, name)?;
        let raw: Vec<Option<f64>> = match col.dtype() {
            DataType::Float64 => col.f64()?.into_iter().collect(),
            DataType::Float32 => col.f32()?.into_iter().map(|v| v.map(f64::from)).collect(),
            DataType::Int64 => col.i64()?.into_iter().map(|v| v.map(|v| v as f64)).collect(),
            DataType::Int32 => col.i32()?.into_iter().map(|v| v.map(f64::from)).collect(),
            other => {
                return Err(ForecastError::DataError(format!(
                    "column '{}' has unsupported type {:?}",
                    name, other
                )))
            }
        };

        raw.into_iter()
            .enumerate()
            .map(|(i, v)| v.ok_or_else(|| Self::null_value(name, i)))
            .collect()
    }

    fn null_value(name: &str, row: usize) -> ForecastError {
        ForecastError::DataError(format!("null value in column '{}' at row {}", name, row))
    }
}

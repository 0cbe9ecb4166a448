use chrono::NaiveDate;
use polars::prelude::*;
use pretty_assertions::assert_eq;
use shelf_forecast::{AlignedDailyRow, AlignedDailySeries, BillingLoader, QuantityColumn};
use std::io::Write;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn row(d: u32, shelved: f64, expired: f64) -> AlignedDailyRow {
    AlignedDailyRow {
        date: day(d),
        shelved_sum: shelved,
        expired_sum: expired,
        net_sum: shelved + expired,
    }
}

#[test]
fn test_series_accessors() {
    let series =
        AlignedDailySeries::from_rows(vec![row(1, 100.0, -5.0), row(2, 80.0, -3.0)]).unwrap();

    assert_eq!(series.len(), 2);
    assert!(!series.is_empty());
    assert_eq!(series.dates(), &[day(1), day(2)]);
    assert_eq!(series.last_date(), Some(day(2)));
    assert_eq!(series.column(QuantityColumn::ShelvedSum), &[100.0, 80.0]);
    assert_eq!(series.column(QuantityColumn::ExpiredSum), &[-5.0, -3.0]);
    assert_eq!(series.column(QuantityColumn::NetSum), &[95.0, 77.0]);
    assert_eq!(series.rows(), vec![row(1, 100.0, -5.0), row(2, 80.0, -3.0)]);
}

#[test]
fn test_series_rejects_unordered_dates() {
    assert!(AlignedDailySeries::from_rows(vec![row(2, 1.0, 0.0), row(1, 1.0, 0.0)]).is_err());
    assert!(AlignedDailySeries::from_rows(vec![row(1, 1.0, 0.0), row(1, 2.0, 0.0)]).is_err());
}

#[test]
fn test_series_slice() {
    let series = AlignedDailySeries::from_rows((1..=6).map(|d| row(d, 10.0, -1.0)).collect())
        .unwrap();

    let head = series.slice(0, Some(4)).unwrap();
    assert_eq!(head.len(), 4);
    assert_eq!(head.last_date(), Some(day(4)));

    let tail = series.slice(4, None).unwrap();
    assert_eq!(tail.dates(), &[day(5), day(6)]);

    assert!(series.slice(5, Some(3)).is_err());
    assert!(series.slice(0, Some(7)).is_err());
}

#[test]
fn test_series_to_json_uses_column_names() {
    let series = AlignedDailySeries::from_rows(vec![row(1, 100.0, -5.0)]).unwrap();
    let json = series.to_json().unwrap();

    assert!(json.contains("\"shelved_sum\":100.0"));
    assert!(json.contains("\"expired_sum\":-5.0"));
    assert!(json.contains("\"net_sum\":95.0"));
    assert!(json.contains("2024-01-01"));
}

#[test]
fn test_loader_reads_numeric_dates() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "BillingDate,MaterialName,SoldToParty,QuantityInBaseUnit").unwrap();
    writeln!(file, "20240101,BREAD ROLL,210094,120").unwrap();
    writeln!(file, "20240101,BREAD ROLL,210094,-8").unwrap();
    writeln!(file, "20240102,BAGUETTE,300210,45").unwrap();

    let records = BillingLoader::from_csv(file.path()).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].billing_date, day(1));
    assert_eq!(records[0].material_name, "BREAD ROLL");
    assert_eq!(records[0].sold_to_party, 210094);
    assert_eq!(records[0].quantity, 120.0);
    assert_eq!(records[1].quantity, -8.0);
    assert_eq!(records[2].billing_date, day(2));
}

#[test]
fn test_loader_reads_iso_dates() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "BillingDate,MaterialName,SoldToParty,QuantityInBaseUnit").unwrap();
    writeln!(file, "2024-01-05,BREAD ROLL,210094,60.5").unwrap();

    let records = BillingLoader::from_csv(file.path()).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].billing_date, day(5));
    assert_eq!(records[0].quantity, 60.5);
}

#[test]
fn test_loader_reports_missing_columns() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "BillingDate,MaterialName").unwrap();
    writeln!(file, "20240101,BREAD ROLL").unwrap();

    let err = BillingLoader::from_csv(file.path()).unwrap_err();
    assert!(err.to_string().contains("SoldToParty"));
}

#[test]
fn test_loader_from_dataframe() {
    let df = DataFrame::new(vec![
        Series::new("BillingDate", &["2024-01-01", "2024-01-02"]),
        Series::new("MaterialName", &["BREAD ROLL", "BREAD ROLL"]),
        Series::new("SoldToParty", &[210094i64, 210094]),
        Series::new("QuantityInBaseUnit", &[120.0f64, -8.0]),
    ])
    .unwrap();

    let records = BillingLoader::from_dataframe(&df).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].billing_date, day(1));
    assert_eq!(records[1].quantity, -8.0);
}

#[test]
fn test_loader_rejects_negative_sold_to_party() {
    let df = DataFrame::new(vec![
        Series::new("BillingDate", &["2024-01-01"]),
        Series::new("MaterialName", &["BREAD ROLL"]),
        Series::new("SoldToParty", &[-1i64]),
        Series::new("QuantityInBaseUnit", &[120.0f64]),
    ])
    .unwrap();

    assert!(BillingLoader::from_dataframe(&df).is_err());
}

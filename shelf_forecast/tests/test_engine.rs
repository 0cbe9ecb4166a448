use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use shelf_data::Pairing;
use shelf_forecast::{
    AlignedDailyRow, AlignedDailySeries, ForecastConfig, ForecastError, ForecasterRegistry,
    QuantityColumn, ShelfForecaster,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn constant_series(days: u32, shelved: f64, expired: f64) -> AlignedDailySeries {
    let rows = (1..=days)
        .map(|d| AlignedDailyRow {
            date: day(d),
            shelved_sum: shelved,
            expired_sum: expired,
            net_sum: shelved + expired,
        })
        .collect();
    AlignedDailySeries::from_rows(rows).unwrap()
}

fn config(horizon_days: usize) -> ForecastConfig {
    ForecastConfig {
        horizon_days,
        seasonal_period: 4,
        max_expiry_ratio: 0.05,
        safety_stock: 20.0,
    }
}

#[test]
fn test_forecast_covers_exactly_the_horizon() {
    let series = constant_series(8, 100.0, -10.0);
    let forecaster = ShelfForecaster::new(config(4)).unwrap();

    let shelved = forecaster.shelved_forecast(&series).unwrap();

    assert_eq!(shelved.len(), 4);
    assert_eq!(shelved.dates(), &[day(9), day(10), day(11), day(12)]);
    assert_eq!(
        forecaster.forecasting_period(&series).unwrap(),
        shelved.dates()
    );
}

#[test]
fn test_constant_history_gives_flat_forecasts() {
    // Eight days of shelved 100 / expired -10 under a 4-day cycle
    // converge to the constants themselves: net 90 across the horizon.
    let series = constant_series(8, 100.0, -10.0);
    let forecaster = ShelfForecaster::new(config(4)).unwrap();

    let shelved = forecaster.shelved_forecast(&series).unwrap();
    let expired = forecaster.expired_forecast(&series, &shelved).unwrap();
    let net = forecaster.net_forecast(&series).unwrap();

    assert_eq!(shelved.values(), &[100.0; 4]);
    assert_eq!(expired.values(), &[-10.0; 4]);
    assert_eq!(net.values(), &[90.0; 4]);
}

#[test]
fn test_safety_stock_floors_the_shelved_forecast() {
    let series = constant_series(8, 5.0, 0.0);
    let forecaster = ShelfForecaster::new(config(4)).unwrap();

    let shelved = forecaster.shelved_forecast(&series).unwrap();

    assert_eq!(shelved.values(), &[20.0; 4]);
}

#[test]
fn test_expiry_cap_enforces_minimum_wastage_share() {
    // Raw expiry of -2 sits above the 5% policy line of a 100-unit
    // shelved day; the cap pushes it down to -5.
    let series = constant_series(8, 100.0, -2.0);
    let forecaster = ShelfForecaster::new(config(4)).unwrap();

    let shelved = forecaster.shelved_forecast(&series).unwrap();
    let expired = forecaster.expired_forecast(&series, &shelved).unwrap();

    assert_eq!(expired.values(), &[-5.0; 4]);
    for (&e, &s) in expired.values().iter().zip(shelved.values()) {
        assert!(e <= 0.0);
        assert!(e <= -0.05 * s);
    }
}

#[test]
fn test_expired_forecast_is_never_positive() {
    // An upward-trending expired column would project past zero
    // without the clip.
    let rows = (1..=8)
        .map(|d| AlignedDailyRow {
            date: day(d),
            shelved_sum: 100.0,
            expired_sum: -9.0 + d as f64,
            net_sum: 100.0 + (-9.0 + d as f64),
        })
        .collect();
    let series = AlignedDailySeries::from_rows(rows).unwrap();
    let forecaster = ShelfForecaster::new(config(4)).unwrap();

    let shelved = forecaster.shelved_forecast(&series).unwrap();
    let expired = forecaster.expired_forecast(&series, &shelved).unwrap();

    for &e in expired.values() {
        assert!(e <= 0.0, "expired forecast {} above zero", e);
    }
}

#[test]
fn test_net_forecast_is_never_negative() {
    let series = constant_series(8, 5.0, -30.0);
    let forecaster = ShelfForecaster::new(config(4)).unwrap();

    let net = forecaster.net_forecast(&series).unwrap();

    assert_eq!(net.values(), &[0.0; 4]);
}

#[test]
fn test_forecasting_is_idempotent() {
    let series = constant_series(8, 100.0, -10.0);
    let forecaster = ShelfForecaster::new(config(4)).unwrap();

    let first = forecaster.shelved_forecast(&series).unwrap();
    let second = forecaster.shelved_forecast(&series).unwrap();

    assert_eq!(first, second);
    assert_eq!(forecaster.carryover_stock(), 0.0);
}

#[test]
fn test_carryover_rolls_unsold_stock_forward() {
    let series = constant_series(8, 100.0, -10.0);
    let mut forecaster = ShelfForecaster::new(config(4)).unwrap();

    // Total shelved forecast is 400; 390 sold leaves 10 to roll over.
    let carryover = forecaster.update_carryover_stock(&series, 390.0).unwrap();
    assert_eq!(carryover, 10.0);
    assert_eq!(forecaster.carryover_stock(), 10.0);

    let shelved = forecaster.shelved_forecast(&series).unwrap();
    assert_eq!(shelved.values(), &[110.0; 4]);
}

#[test]
fn test_carryover_never_goes_negative() {
    let series = constant_series(8, 100.0, -10.0);
    let mut forecaster = ShelfForecaster::new(config(4)).unwrap();

    let carryover = forecaster.update_carryover_stock(&series, 450.0).unwrap();
    assert_eq!(carryover, 0.0);
}

#[test]
fn test_carryover_capped_by_expiry_policy() {
    let series = constant_series(8, 100.0, -10.0);
    let mut forecaster = ShelfForecaster::new(config(4)).unwrap();

    // Nothing sold: unsold stock far exceeds what the wastage policy
    // tolerates, so the carryover is capped at 400 * 0.05.
    let carryover = forecaster.update_carryover_stock(&series, 0.0).unwrap();
    assert_eq!(carryover, 20.0);
}

#[test]
fn test_insufficient_history_is_an_error() {
    let series = constant_series(7, 100.0, -10.0);
    let forecaster = ShelfForecaster::new(config(4)).unwrap();

    let err = forecaster.shelved_forecast(&series).unwrap_err();
    assert!(matches!(err, ForecastError::InsufficientHistory(_)));
}

#[test]
fn test_empty_series_is_an_error() {
    let series = AlignedDailySeries::new();
    let forecaster = ShelfForecaster::new(config(4)).unwrap();

    assert!(matches!(
        forecaster.forecasting_period(&series).unwrap_err(),
        ForecastError::EmptySeries(_)
    ));
    assert!(matches!(
        forecaster.shelved_forecast(&series).unwrap_err(),
        ForecastError::EmptySeries(_)
    ));
    assert!(matches!(
        forecaster
            .fit_column(&series, QuantityColumn::NetSum)
            .unwrap_err(),
        ForecastError::EmptySeries(_)
    ));
}

#[test]
fn test_invalid_configuration_rejected() {
    let bad = [
        ForecastConfig {
            horizon_days: 0,
            ..ForecastConfig::default()
        },
        ForecastConfig {
            seasonal_period: 1,
            ..ForecastConfig::default()
        },
        ForecastConfig {
            max_expiry_ratio: -0.1,
            ..ForecastConfig::default()
        },
        ForecastConfig {
            safety_stock: -5.0,
            ..ForecastConfig::default()
        },
    ];

    for config in bad {
        let err = ShelfForecaster::new(config).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidConfiguration(_)));
    }
}

#[test]
fn test_registry_scopes_carryover_per_pairing() {
    let series = constant_series(12, 100.0, -10.0);
    let mut registry = ForecasterRegistry::new(ForecastConfig::default()).unwrap();

    let roll = Pairing::new("BREAD ROLL", 210094);
    let baguette = Pairing::new("BAGUETTE", 210094);

    // Default horizon is 7 days: total shelved forecast 700.
    registry
        .forecaster_mut(&roll)
        .update_carryover_stock(&series, 690.0)
        .unwrap();

    assert_eq!(registry.forecaster(&roll).unwrap().carryover_stock(), 10.0);
    assert_eq!(registry.forecaster_mut(&roll).carryover_stock(), 10.0);
    assert_eq!(registry.forecaster_mut(&baguette).carryover_stock(), 0.0);
    assert_eq!(registry.len(), 2);
}

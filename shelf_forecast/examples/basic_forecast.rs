use chrono::NaiveDate;
use shelf_data::utils::generate_billing_records;
use shelf_data::{aggregate_daily, filter_records, Pairing};
use shelf_forecast::utils::forecast_accuracy;
use shelf_forecast::{
    offset_and_recalculate, ForecastConfig, QuantityColumn, ShelfForecaster, DEFAULT_SHIFT_OFFSET,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Shelf Forecast: Basic Forecasting Example");
    println!("=========================================\n");

    // Build a month of synthetic billing history for one pairing
    let pairing = Pairing::new("BREAD ROLL SANDWICH", 210094);
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let records = generate_billing_records(&pairing, start, 31, 100.0, 0.1);
    println!("Generated {} billing records for {}", records.len(), pairing);

    // Normalize: filter, aggregate per day, realign expiry
    let metrics = aggregate_daily(&filter_records(&records, &pairing));
    let series = offset_and_recalculate(&metrics, DEFAULT_SHIFT_OFFSET)?;
    println!("Aligned history covers {} days\n", series.len());

    println!("Last aligned days:");
    for row in series.rows().iter().rev().take(5).rev() {
        println!(
            "  {}  shelved {:>6.0}  expired {:>5.0}  net {:>6.0}",
            row.date, row.shelved_sum, row.expired_sum, row.net_sum
        );
    }

    // Forecast with the default business rules
    let forecaster = ShelfForecaster::new(ForecastConfig::default())?;
    let shelved = forecaster.shelved_forecast(&series)?;
    let expired = forecaster.expired_forecast(&series, &shelved)?;
    let net = forecaster.net_forecast(&series)?;

    println!("\nForecast for the next {} days:", shelved.len());
    for ((date, s), (e, n)) in shelved
        .dates()
        .iter()
        .zip(shelved.values())
        .zip(expired.values().iter().zip(net.values()))
    {
        println!(
            "  {}  shelved {:>6.0}  expired {:>5.0}  net {:>6.0}",
            date, s, e, n
        );
    }

    println!("\nNet forecast as JSON:\n{}", net.to_json()?);

    // Hold out the last week and measure accuracy on it
    let horizon = forecaster.config().horizon_days;
    if series.len() > horizon + 8 {
        let train = series.slice(0, Some(series.len() - horizon))?;
        let held_out = &series.column(QuantityColumn::ShelvedSum)[series.len() - horizon..];

        let backtest = forecaster.shelved_forecast(&train)?;
        let accuracy = forecast_accuracy(backtest.values(), held_out)?;
        println!("\nHoldout evaluation over the last {} days:", horizon);
        println!("{}", accuracy);
    }

    Ok(())
}

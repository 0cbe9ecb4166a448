use chrono::NaiveDate;
use shelf_data::utils::generate_billing_records;
use shelf_data::{aggregate_daily, Pairing};
use shelf_forecast::{
    offset_and_recalculate, ForecastConfig, ForecasterRegistry, DEFAULT_SHIFT_OFFSET,
};

/// Walk a forecaster through several forecast cycles, feeding realized
/// sales back in after each one. The carryover buffer rises when a cycle
/// undersells and drains when demand catches up.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Shelf Forecast: Carryover Cycle Example");
    println!("=======================================\n");

    let pairing = Pairing::new("BREAD ROLL SANDWICH", 210094);
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let metrics = aggregate_daily(&generate_billing_records(&pairing, start, 31, 100.0, 0.1));
    let series = offset_and_recalculate(&metrics, DEFAULT_SHIFT_OFFSET)?;

    let mut registry = ForecasterRegistry::new(ForecastConfig::default())?;

    // Sell-through rates realized in three consecutive cycles
    let sell_through = [0.97, 0.90, 1.02];

    for (cycle, &rate) in sell_through.iter().enumerate() {
        let forecaster = registry.forecaster_mut(&pairing);

        let shelved = forecaster.shelved_forecast(&series)?;
        let net = forecaster.net_forecast(&series)?;
        println!(
            "Cycle {}: shelved total {:>6.0}, net total {:>6.0}, carryover in {:>5.1}",
            cycle + 1,
            shelved.total(),
            net.total(),
            forecaster.carryover_stock()
        );

        let actual_sold = shelved.total() * rate;
        let carryover = forecaster.update_carryover_stock(&series, actual_sold)?;
        println!(
            "         sold {:>6.0} -> carryover out {:>5.1}\n",
            actual_sold, carryover
        );
    }

    Ok(())
}

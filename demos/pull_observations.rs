use asos_weather::{DateRange, Interval, LatLon, ObservationRequest, WeatherPull, WeatherPullError};
use std::env;

#[tokio::main]
async fn main() -> Result<(), WeatherPullError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    configure_polars_display();

    let pull = WeatherPull::new()?;
    let request = ObservationRequest::builder()
        .period(DateRange::new("2023-07-01", "2023-07-31")?)
        .location(LatLon::new(40.7128, -74.0060)?)
        .interval("15T".parse::<Interval>()?)
        .verbose(true)
        .build()?;

    let result = pull.observations(&request).await?;
    println!(
        "Station {} ({:.1} km away) after {} attempt(s)",
        result.station.id, result.distance_km, result.attempts
    );
    println!("{}", result.data.to_dataframe()?);

    Ok(())
}

fn configure_polars_display() {
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}

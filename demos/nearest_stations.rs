use asos_weather::{LatLon, WeatherPull, WeatherPullError};

#[tokio::main]
async fn main() -> Result<(), WeatherPullError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let pull = WeatherPull::new()?;
    let stations = pull
        .find_stations()
        .location(LatLon::new(40.7128, -74.0060)?)
        .station_limit(5)
        .call()
        .await?;

    for candidate in stations {
        println!(
            "{:<6} {:>7.1} km  {}",
            candidate.station.id,
            candidate.distance_km,
            candidate.station.name.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

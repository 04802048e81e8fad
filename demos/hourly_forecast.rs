use asos_weather::{ForecastVariable, LatLon, WeatherPull, WeatherPullError};

#[tokio::main]
async fn main() -> Result<(), WeatherPullError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let pull = WeatherPull::new()?;
    let location = LatLon::new(40.7128, -74.0060)?;

    for variable in [ForecastVariable::Temperature, ForecastVariable::WindSpeed] {
        let series = pull
            .forecast()
            .location(location)
            .variable(variable)
            .eastern_time(true)
            .call()
            .await?;
        println!("{} ({} periods, Eastern time)", variable, series.len());
        println!("{}", series.to_dataframe()?.head(Some(12)));
    }
    Ok(())
}

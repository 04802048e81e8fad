//! Main entry point: nearest-station observation pulls and hourly forecasts.

use crate::error::WeatherPullError;
use crate::forecast::fetcher::ForecastFetcher;
use crate::forecast::series::{ForecastSeries, ForecastVariable};
use crate::resample::{resample, ResampledObservations};
use crate::stations::locate_station::StationLocator;
use crate::timezone::utc_to_eastern;
use crate::types::config::PullConfig;
use crate::types::lat_lon::LatLon;
use crate::types::request::ObservationRequest;
use crate::types::station::{Station, StationCandidate};
use crate::weather_data::data_loader::{ObservationLoader, ObservationSource};
use crate::weather_data::station_fallback::{pull_with_fallback, FallbackPolicy};
use bon::bon;
use log::info;
use reqwest::Client;

/// Result of [`WeatherPull::observations`].
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationPull {
    /// The station whose data was used.
    pub station: Station,
    pub distance_km: f64,
    /// Stations queried before one qualified, the used one included.
    pub attempts: usize,
    pub data: ResampledObservations,
}

/// Client for ASOS observations and weather.gov forecasts.
///
/// Nothing is cached: every call downloads the station list and data again.
#[derive(Debug, Clone)]
pub struct WeatherPull {
    config: PullConfig,
    client: Client,
    loader: ObservationLoader,
    forecaster: ForecastFetcher,
}

#[bon]
impl WeatherPull {
    /// Creates a client for the public services with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherPullError::HttpClient`] if the HTTP client cannot be
    /// initialised.
    pub fn new() -> Result<Self, WeatherPullError> {
        Self::with_config(PullConfig::default())
    }

    /// Creates a client from a custom [`PullConfig`].
    ///
    /// ```
    /// use asos_weather::{PullConfig, WeatherPull};
    ///
    /// let pull = WeatherPull::with_config(PullConfig::builder().network("NJ_ASOS").build())?;
    /// assert_eq!(pull.config().network(), "NJ_ASOS");
    /// # Ok::<(), asos_weather::WeatherPullError>(())
    /// ```
    pub fn with_config(config: PullConfig) -> Result<Self, WeatherPullError> {
        let client = config.http_client().map_err(WeatherPullError::HttpClient)?;
        Ok(Self {
            loader: ObservationLoader::new(
                client.clone(),
                config.observation_url(),
                config.observation_timezone(),
            ),
            forecaster: ForecastFetcher::new(client.clone(), config.forecast_points_url()),
            client,
            config,
        })
    }

    pub fn config(&self) -> &PullConfig {
        &self.config
    }

    /// Downloads the configured network's station list.
    pub async fn station_locator(&self) -> Result<StationLocator, WeatherPullError> {
        let url = self.config.station_list_request_url();
        Ok(StationLocator::fetch(&self.client, &url).await?)
    }

    /// Finds the stations of the configured network closest to `location`.
    ///
    /// `station_limit` defaults to 10.
    ///
    /// ```no_run
    /// # use asos_weather::{LatLon, WeatherPull, WeatherPullError};
    /// # async fn run() -> Result<(), WeatherPullError> {
    /// let pull = WeatherPull::new()?;
    /// let stations = pull
    ///     .find_stations()
    ///     .location(LatLon::new(40.7128, -74.0060)?)
    ///     .station_limit(3)
    ///     .call()
    ///     .await?;
    /// for candidate in &stations {
    ///     println!("{} at {:.1} km", candidate.station.id, candidate.distance_km);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn find_stations(
        &self,
        location: LatLon,
        station_limit: Option<usize>,
    ) -> Result<Vec<StationCandidate>, WeatherPullError> {
        let limit = station_limit.unwrap_or(crate::types::request::DEFAULT_CANDIDATE_DEPTH);
        let locator = self.station_locator().await?;
        Ok(locator.query(location, limit))
    }

    /// Pulls observations near the requested location and resamples them.
    ///
    /// The `candidate_depth` nearest stations are tried in distance order
    /// until one has enough reports covering the start of the period.
    ///
    /// # Errors
    ///
    /// * [`WeatherPullError::NoStationsFound`] if the network lists no stations.
    /// * [`WeatherPullError::StationsExhausted`] if no candidate qualifies.
    /// * Network and parse errors from any single attempt, unretried.
    ///
    /// ```no_run
    /// # use asos_weather::{DateRange, LatLon, ObservationRequest, WeatherPull, WeatherPullError};
    /// # async fn run() -> Result<(), WeatherPullError> {
    /// let pull = WeatherPull::new()?;
    /// let request = ObservationRequest::builder()
    ///     .period(DateRange::new("2023-07-01", "2023-07-31")?)
    ///     .location(LatLon::new(40.7128, -74.0060)?)
    ///     .build()?;
    /// let result = pull.observations(&request).await?;
    /// println!("{} rows from {}", result.data.len(), result.station.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn observations(
        &self,
        request: &ObservationRequest,
    ) -> Result<ObservationPull, WeatherPullError> {
        let locator = self.station_locator().await?;
        Self::observations_from(&locator, &self.loader, request).await
    }

    /// Same as [`WeatherPull::observations`] with an explicit station list and
    /// data source.
    pub async fn observations_from<S>(
        locator: &StationLocator,
        source: &S,
        request: &ObservationRequest,
    ) -> Result<ObservationPull, WeatherPullError>
    where
        S: ObservationSource + ?Sized,
    {
        let location = request.location();
        let candidates = locator.query(location, request.candidate_depth());
        if candidates.is_empty() {
            return Err(WeatherPullError::NoStationsFound {
                lat: location.latitude(),
                lon: location.longitude(),
            });
        }

        let policy = FallbackPolicy::from(request);
        let outcome = pull_with_fallback(source, &candidates, request.period(), &policy).await?;
        let data = resample(&outcome.table, request.interval());
        info!(
            "Resampled {} reports of {} to {} rows at {}",
            outcome.table.len(),
            outcome.candidate.station.id,
            data.len(),
            request.interval()
        );

        Ok(ObservationPull {
            station: outcome.candidate.station,
            distance_km: outcome.candidate.distance_km,
            attempts: outcome.attempts,
            data,
        })
    }

    /// Downloads the hourly forecast for `location` and keeps one variable.
    ///
    /// Timestamps are UTC unless `eastern_time` is set, in which case the
    /// series goes through [`utc_to_eastern`].
    ///
    /// ```no_run
    /// # use asos_weather::{ForecastVariable, LatLon, WeatherPull, WeatherPullError};
    /// # async fn run() -> Result<(), WeatherPullError> {
    /// let pull = WeatherPull::new()?;
    /// let wind = pull
    ///     .forecast()
    ///     .location(LatLon::new(40.7128, -74.0060)?)
    ///     .variable(ForecastVariable::WindSpeed)
    ///     .eastern_time(true)
    ///     .call()
    ///     .await?;
    /// println!("{} hourly periods", wind.len());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn forecast(
        &self,
        location: LatLon,
        variable: ForecastVariable,
        eastern_time: Option<bool>,
    ) -> Result<ForecastSeries, WeatherPullError> {
        let series = self.forecaster.fetch(location, variable).await?;
        if eastern_time.unwrap_or(false) {
            Ok(utc_to_eastern(series))
        } else {
            Ok(series)
        }
    }
}

//! Nearest-station ASOS observations and weather.gov hourly forecasts.
//!
//! [`WeatherPull`] finds the stations of an IEM ASOS network closest to a
//! coordinate, walks them in distance order until one has enough reports for
//! the requested period, and resamples that station's temperature and
//! feels-like readings onto a fixed time grid. It also fetches hourly
//! temperature or wind-speed forecasts for a coordinate.
//!
//! ```no_run
//! use asos_weather::{DateRange, LatLon, ObservationRequest, WeatherPull, WeatherPullError};
//!
//! # async fn run() -> Result<(), WeatherPullError> {
//! let pull = WeatherPull::new()?;
//! let request = ObservationRequest::builder()
//!     .period(DateRange::new("2023-07-01", "2023-07-31")?)
//!     .location(LatLon::new(40.7128, -74.0060)?)
//!     .build()?;
//! let result = pull.observations(&request).await?;
//! let frame = result.data.to_dataframe()?;
//! println!("{}: {}", result.station.id, frame);
//! # Ok(())
//! # }
//! ```

mod error;
mod forecast;
mod resample;
mod stations;
mod timezone;
mod types;
mod utils;
mod weather_data;
mod weather_pull;

pub use error::WeatherPullError;
pub use weather_pull::*;

pub use types::config::*;
pub use types::date_range::{DateRange, IntoNaiveDateTime};
pub use types::interval::Interval;
pub use types::lat_lon::LatLon;
pub use types::request::{ObservationRequest, DEFAULT_CANDIDATE_DEPTH};
pub use types::station::*;

pub use stations::distance::distance_km;
pub use stations::error::LocateStationError;
pub use stations::locate_station::StationLocator;

pub use weather_data::data_loader::{ObservationLoader, ObservationSource};
pub use weather_data::error::WeatherDataError;
pub use weather_data::observation_table::{Observation, ObservationTable};
pub use weather_data::station_fallback::{
    pull_with_fallback, FallbackOutcome, FallbackPolicy, MIN_ROWS, MIN_ROWS_CHECK_RECORD,
};

pub use resample::{interpolate_onto, resample, ResampledObservations};
pub use timezone::{eastern_offset_hours, utc_to_eastern, TimeIndexed};

pub use forecast::error::ForecastError;
pub use forecast::fetcher::ForecastFetcher;
pub use forecast::series::{parse_wind_speed, ForecastPoint, ForecastSeries, ForecastVariable};

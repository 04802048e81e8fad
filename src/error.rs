use crate::forecast::error::ForecastError;
use crate::stations::error::LocateStationError;
use crate::weather_data::error::WeatherDataError;
use chrono::NaiveDateTime;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherPullError {
    #[error(transparent)]
    WeatherData(#[from] WeatherDataError),

    #[error(transparent)]
    LocateStation(#[from] LocateStationError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("Latitude {0} is outside the accepted range -180..=180")]
    InvalidLatitude(f64),

    #[error("Longitude {0} is outside the accepted range -360..=360")]
    InvalidLongitude(f64),

    #[error("Could not interpret the {field} date")]
    InvalidDate { field: &'static str },

    #[error("Start {start} is after end {end}")]
    InvalidDateRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Invalid resample interval '{0}'")]
    InvalidInterval(String),

    #[error("Candidate depth must be at least 1 and greater than skip_nearest ({skip_nearest}), got {depth}")]
    InvalidCandidateDepth { depth: usize, skip_nearest: usize },

    #[error("max_attempts must be at least 1")]
    InvalidMaxAttempts,

    #[error("No stations found near ({lat}, {lon})")]
    NoStationsFound { lat: f64, lon: f64 },

    #[error("No station among {candidates} candidates satisfied the data requirements after {attempts} attempts (last tried: {last_station:?})")]
    StationsExhausted {
        candidates: usize,
        attempts: usize,
        last_station: Option<String>,
    },
}

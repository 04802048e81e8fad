use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocateStationError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse station list CSV from {url}")]
    CsvParse {
        url: String,
        #[source]
        source: PolarsError,
    },

    #[error("Station list is missing required column '{0}'")]
    MissingColumn(String, #[source] PolarsError),

    #[error("Station list from {0} contained no usable stations")]
    EmptyStationList(String),
}

use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherDataError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    // Parsing happens on the raw response body
    #[error("Parsing error processing CSV data for station '{station}'")]
    CsvReadPolars {
        station: String,
        #[source]
        source: PolarsError,
    },

    #[error("Missing required column '{column}' for station {station}")]
    MissingColumnError {
        station: String,
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Failed Polars column operation for station {station}: {source}")]
    ColumnOperationError {
        station: String,
        source: PolarsError,
    },

    #[error("Unparseable observation timestamp '{value}' for station {station}")]
    TimestampParse {
        station: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode forecast JSON from {url}")]
    JsonDecode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Forecast payload is missing '{0}'")]
    MissingField(&'static str),

    #[error("Unexpected value for '{field}' in forecast period {period}: {value}")]
    UnexpectedValue {
        field: &'static str,
        period: usize,
        value: String,
    },

    #[error("No digits found in wind speed '{0}'")]
    WindSpeedParse(String),

    #[error("Unparseable forecast start time '{value}'")]
    TimestampParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

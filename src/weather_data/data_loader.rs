use crate::types::date_range::DateRange;
use crate::utils::{column_as_f64, column_as_strings, is_blank, read_csv_bytes};
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::observation_table::{
    Observation, ObservationTable, COL_FEEL, COL_TMPF, COL_VALID,
};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDateTime};
use log::{debug, info, warn};
use polars::prelude::DataFrame;
use reqwest::Client;

const VALID_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Anything that can produce the raw observation table of one station.
///
/// The HTTP implementation is [`ObservationLoader`]; the station fallback
/// logic only depends on this trait.
#[async_trait]
pub trait ObservationSource: Send + Sync {
    async fn fetch_observations(
        &self,
        station: &str,
        period: &DateRange,
    ) -> Result<ObservationTable, WeatherDataError>;
}

/// Downloads temperature and feels-like reports from the IEM ASOS service.
#[derive(Debug, Clone)]
pub struct ObservationLoader {
    client: Client,
    base_url: String,
    timezone: String,
}

impl ObservationLoader {
    pub fn new(client: Client, base_url: impl Into<String>, timezone: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timezone: timezone.into(),
        }
    }

    /// Builds the query for the whole calendar span of `period`, end day included.
    pub(crate) fn request_url(&self, station: &str, period: &DateRange) -> String {
        let start = period.start_date();
        // The service treats the end date as exclusive.
        let end = period.end_date().succ_opt().unwrap_or(period.end_date());
        format!(
            "{}?data={}&data={}&tz={}&format=onlycomma&missing=null\
             &year1={}&month1={}&day1={}&year2={}&month2={}&day2={}\
             &station={}&report_type=1&report_type=2",
            self.base_url,
            COL_TMPF,
            COL_FEEL,
            self.timezone.replace('/', "%2F"),
            start.year(),
            start.month(),
            start.day(),
            end.year(),
            end.month(),
            end.day(),
            station,
        )
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, WeatherDataError> {
        info!("Downloading data from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherDataError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    WeatherDataError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    WeatherDataError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let bytes = response
            .bytes()
            .await
            .map_err(|e| WeatherDataError::NetworkRequest(url.to_string(), e))?;
        Ok(bytes.to_vec())
    }

    /// Parses the service's CSV body. Non-numeric values become missing and
    /// duplicate timestamps collapse to the last row.
    pub(crate) fn parse_observation_csv(
        bytes: Vec<u8>,
        station: &str,
    ) -> Result<ObservationTable, WeatherDataError> {
        if is_blank(&bytes) {
            return Ok(ObservationTable::empty(station));
        }
        let df = read_csv_bytes(bytes).map_err(|e| WeatherDataError::CsvReadPolars {
            station: station.to_string(),
            source: e,
        })?;

        let valid = Self::column(&df, station, COL_VALID, column_as_strings)?;
        let temperature = Self::column(&df, station, COL_TMPF, column_as_f64)?;
        let feels_like = Self::column(&df, station, COL_FEEL, column_as_f64)?;

        let mut rows = Vec::with_capacity(df.height());
        for ((valid, temperature), feels_like) in valid.into_iter().zip(temperature).zip(feels_like) {
            let Some(valid) = valid else {
                warn!("Skipping observation without timestamp for station {}", station);
                continue;
            };
            let valid = NaiveDateTime::parse_from_str(valid.trim(), VALID_FORMAT).map_err(|e| {
                WeatherDataError::TimestampParse {
                    station: station.to_string(),
                    value: valid.clone(),
                    source: e,
                }
            })?;
            rows.push(Observation {
                valid,
                temperature,
                feels_like,
            });
        }

        let table = ObservationTable::from_rows(station, rows);
        debug!(
            "Parsed {} unique observations out of {} rows for station {}",
            table.len(),
            df.height(),
            station
        );
        Ok(table)
    }

    fn column<T>(
        df: &DataFrame,
        station: &str,
        name: &str,
        extract: impl Fn(&polars::prelude::Column) -> polars::prelude::PolarsResult<Vec<T>>,
    ) -> Result<Vec<T>, WeatherDataError> {
        let column = df
            .column(name)
            .map_err(|e| WeatherDataError::MissingColumnError {
                station: station.to_string(),
                column: name.to_string(),
                source: e,
            })?;
        extract(column).map_err(|e| WeatherDataError::ColumnOperationError {
            station: station.to_string(),
            source: e,
        })
    }
}

#[async_trait]
impl ObservationSource for ObservationLoader {
    async fn fetch_observations(
        &self,
        station: &str,
        period: &DateRange,
    ) -> Result<ObservationTable, WeatherDataError> {
        let url = self.request_url(station, period);
        let bytes = self.download(&url).await?;
        Self::parse_observation_csv(bytes, station)
    }
}

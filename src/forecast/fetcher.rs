use crate::forecast::error::ForecastError;
use crate::forecast::series::{parse_wind_speed, ForecastPoint, ForecastSeries, ForecastVariable};
use crate::types::lat_lon::LatLon;
use chrono::DateTime;
use log::{debug, info, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: Option<PointsProperties>,
}

#[derive(Debug, Deserialize)]
struct PointsProperties {
    #[serde(rename = "forecastHourly")]
    forecast_hourly: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: Option<ForecastProperties>,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Option<Vec<ForecastPeriod>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastPeriod {
    #[serde(rename = "startTime")]
    start_time: String,
    #[serde(default)]
    temperature: Value,
    #[serde(rename = "windSpeed", default)]
    wind_speed: Value,
}

/// Client for the National Weather Service hourly forecast.
#[derive(Debug, Clone)]
pub struct ForecastFetcher {
    client: Client,
    points_url: String,
}

impl ForecastFetcher {
    pub fn new(client: Client, points_url: impl Into<String>) -> Self {
        Self {
            client,
            points_url: points_url.into(),
        }
    }

    /// Resolves the forecast office grid for `location`, then downloads its
    /// hourly forecast and keeps one variable.
    pub async fn fetch(
        &self,
        location: LatLon,
        variable: ForecastVariable,
    ) -> Result<ForecastSeries, ForecastError> {
        let points_url = format!(
            "{}/{},{}",
            self.points_url,
            location.latitude(),
            location.longitude()
        );
        let points: PointsResponse = self.get_json(&points_url).await?;
        let hourly_url = points
            .properties
            .and_then(|p| p.forecast_hourly)
            .ok_or(ForecastError::MissingField("properties.forecastHourly"))?;

        let forecast: ForecastResponse = self.get_json(&hourly_url).await?;
        let periods = forecast
            .properties
            .and_then(|p| p.periods)
            .ok_or(ForecastError::MissingField("properties.periods"))?;
        debug!("Received {} forecast periods from {}", periods.len(), hourly_url);

        extract_series(&periods, variable)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ForecastError> {
        info!("Requesting {}", url);
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/geo+json")
            .send()
            .await
            .map_err(|e| ForecastError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    ForecastError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    ForecastError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        response
            .json::<T>()
            .await
            .map_err(|e| ForecastError::JsonDecode {
                url: url.to_string(),
                source: e,
            })
    }
}

/// Turns forecast periods into a series of one variable. Start times are
/// converted from their offset to naive UTC.
pub(crate) fn extract_series(
    periods: &[ForecastPeriod],
    variable: ForecastVariable,
) -> Result<ForecastSeries, ForecastError> {
    let mut points = Vec::with_capacity(periods.len());
    for (i, period) in periods.iter().enumerate() {
        let time = DateTime::parse_from_rfc3339(&period.start_time)
            .map_err(|e| ForecastError::TimestampParse {
                value: period.start_time.clone(),
                source: e,
            })?
            .naive_utc();
        let value = match variable {
            ForecastVariable::Temperature => temperature_value(&period.temperature, i)?,
            ForecastVariable::WindSpeed => wind_speed_value(&period.wind_speed, i)?,
        };
        points.push(ForecastPoint { time, value });
    }
    Ok(ForecastSeries::new(variable, points))
}

/// Accepts `72` as well as the quantitative `{ "value": 22.2, ... }` form.
fn temperature_value(raw: &Value, period: usize) -> Result<f64, ForecastError> {
    let number = match raw {
        Value::Object(map) => map.get("value").and_then(Value::as_f64),
        other => other.as_f64(),
    };
    number.ok_or_else(|| ForecastError::UnexpectedValue {
        field: "temperature",
        period,
        value: raw.to_string(),
    })
}

fn wind_speed_value(raw: &Value, period: usize) -> Result<f64, ForecastError> {
    match raw {
        Value::String(text) => parse_wind_speed(text)
            .map(f64::from)
            .ok_or_else(|| ForecastError::WindSpeedParse(text.clone())),
        Value::Object(map) => map.get("value").and_then(Value::as_f64).ok_or_else(|| {
            ForecastError::UnexpectedValue {
                field: "windSpeed",
                period,
                value: raw.to_string(),
            }
        }),
        other => other.as_f64().ok_or_else(|| ForecastError::UnexpectedValue {
            field: "windSpeed",
            period,
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const HOURLY: &str = r#"{
        "properties": {
            "periods": [
                {
                    "number": 1,
                    "startTime": "2023-07-01T14:00:00-04:00",
                    "temperature": 84,
                    "temperatureUnit": "F",
                    "windSpeed": "12 mph"
                },
                {
                    "number": 2,
                    "startTime": "2023-07-01T15:00:00-04:00",
                    "temperature": { "unitCode": "wmoUnit:degF", "value": 85.5 },
                    "windSpeed": "100mph"
                }
            ]
        }
    }"#;

    fn periods(json: &str) -> Vec<ForecastPeriod> {
        let response: ForecastResponse = serde_json::from_str(json).unwrap();
        response.properties.unwrap().periods.unwrap()
    }

    fn utc(h: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 7, 1)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn temperature_series_in_utc() {
        let series = extract_series(&periods(HOURLY), ForecastVariable::Temperature).unwrap();
        assert_eq!(
            series.points(),
            [
                ForecastPoint { time: utc(18), value: 84.0 },
                ForecastPoint { time: utc(19), value: 85.5 },
            ]
        );
    }

    #[test]
    fn wind_speed_series() {
        let series = extract_series(&periods(HOURLY), ForecastVariable::WindSpeed).unwrap();
        let values: Vec<f64> = series.points().iter().map(|p| p.value).collect();
        assert_eq!(values, [12.0, 100.0]);
        assert_eq!(series.variable(), ForecastVariable::WindSpeed);
    }

    #[test]
    fn wind_speed_without_digits_is_an_error() {
        let json = r#"{"properties":{"periods":[
            {"startTime":"2023-07-01T14:00:00-04:00","temperature":84,"windSpeed":"calm"}
        ]}}"#;
        let err = extract_series(&periods(json), ForecastVariable::WindSpeed).unwrap_err();
        assert!(matches!(err, ForecastError::WindSpeedParse(ref s) if s == "calm"));
    }

    #[test]
    fn null_temperature_is_an_error() {
        let json = r#"{"properties":{"periods":[
            {"startTime":"2023-07-01T14:00:00-04:00","temperature":null,"windSpeed":"5 mph"}
        ]}}"#;
        let err = extract_series(&periods(json), ForecastVariable::Temperature).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::UnexpectedValue { field: "temperature", period: 0, .. }
        ));
    }

    #[test]
    fn bad_start_time_is_an_error() {
        let json = r#"{"properties":{"periods":[
            {"startTime":"tomorrow","temperature":84,"windSpeed":"5 mph"}
        ]}}"#;
        let err = extract_series(&periods(json), ForecastVariable::Temperature).unwrap_err();
        assert!(matches!(err, ForecastError::TimestampParse { .. }));
    }

    #[test]
    fn points_response_exposes_hourly_url() {
        let json = r#"{"properties":{"forecast":"https://x/forecast","forecastHourly":"https://x/forecast/hourly"}}"#;
        let points: PointsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            points.properties.and_then(|p| p.forecast_hourly).as_deref(),
            Some("https://x/forecast/hourly")
        );
    }

    #[tokio::test]
    async fn unreachable_points_service_is_a_network_error() {
        let fetcher = ForecastFetcher::new(Client::new(), "http://127.0.0.1:9/points");
        let err = fetcher
            .fetch(LatLon::new(40.0, -74.0).unwrap(), ForecastVariable::Temperature)
            .await
            .unwrap_err();
        assert!(matches!(err, ForecastError::NetworkRequest(..)));
    }
}

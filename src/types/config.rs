//! Endpoint and network configuration for [`crate::WeatherPull`].

use bon::Builder;
use std::time::Duration;

pub const DEFAULT_NETWORK: &str = "NY_ASOS";
pub const STATION_LIST_URL: &str = "https://mesonet.agron.iastate.edu/sites/networks.php";
pub const OBSERVATION_URL: &str = "https://mesonet.agron.iastate.edu/cgi-bin/request/asos.py";
pub const FORECAST_POINTS_URL: &str = "https://api.weather.gov/points";
pub const OBSERVATION_TIMEZONE: &str = "America/New_York";
pub const DEFAULT_USER_AGENT: &str = concat!("asos_weather/", env!("CARGO_PKG_VERSION"));

/// Where data is fetched from.
///
/// Every field has a default pointing at the public IEM and weather.gov
/// services, so `PullConfig::default()` is enough for normal use. Override
/// fields through the builder, e.g. to query a different state's ASOS network:
///
/// ```
/// use asos_weather::PullConfig;
///
/// let config = PullConfig::builder().network("NJ_ASOS").build();
/// assert_eq!(config.network(), "NJ_ASOS");
/// assert!(config.station_list_request_url().contains("network=NJ_ASOS"));
/// ```
#[derive(Debug, Clone, Builder)]
pub struct PullConfig {
    /// IEM network identifier whose stations are candidates (e.g. "NY_ASOS").
    #[builder(into, default = DEFAULT_NETWORK.to_string())]
    network: String,
    #[builder(into, default = STATION_LIST_URL.to_string())]
    station_list_url: String,
    #[builder(into, default = OBSERVATION_URL.to_string())]
    observation_url: String,
    #[builder(into, default = FORECAST_POINTS_URL.to_string())]
    forecast_points_url: String,
    /// Timezone the observation service reports timestamps in.
    #[builder(into, default = OBSERVATION_TIMEZONE.to_string())]
    observation_timezone: String,
    /// weather.gov rejects requests without a User-Agent.
    #[builder(into, default = DEFAULT_USER_AGENT.to_string())]
    user_agent: String,
    /// Per-request timeout. `None` keeps the transport default.
    request_timeout: Option<Duration>,
}

impl Default for PullConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl PullConfig {
    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn observation_url(&self) -> &str {
        &self.observation_url
    }

    pub fn forecast_points_url(&self) -> &str {
        &self.forecast_points_url
    }

    pub fn observation_timezone(&self) -> &str {
        &self.observation_timezone
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    pub fn station_list_request_url(&self) -> String {
        format!(
            "{}?network={}&format=csv&nohtml=on",
            self.station_list_url, self.network
        )
    }

    pub(crate) fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent.clone());
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_services() {
        let config = PullConfig::default();
        assert_eq!(config.network(), DEFAULT_NETWORK);
        assert_eq!(
            config.station_list_request_url(),
            "https://mesonet.agron.iastate.edu/sites/networks.php?network=NY_ASOS&format=csv&nohtml=on"
        );
        assert_eq!(config.observation_timezone(), "America/New_York");
        assert!(config.user_agent().starts_with("asos_weather/"));
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn builder_overrides_individual_fields() {
        let config = PullConfig::builder()
            .observation_url("http://localhost:8080/asos.py")
            .request_timeout(Duration::from_secs(5))
            .build();
        assert_eq!(config.observation_url(), "http://localhost:8080/asos.py");
        assert_eq!(config.forecast_points_url(), FORECAST_POINTS_URL);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
    }
}

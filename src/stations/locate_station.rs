use crate::stations::distance::distance_km;
use crate::stations::error::LocateStationError;
use crate::types::lat_lon::LatLon;
use crate::types::station::{Station, StationCandidate};
use crate::utils::{column_as_f64, column_as_strings, is_blank, read_csv_bytes};
use log::{info, warn};
use ordered_float::OrderedFloat;
use polars::prelude::DataFrame;
use reqwest::Client;

const COL_ID: &str = "stid";
const COL_NAME: &str = "station_name";
const COL_LAT: &str = "lat";
const COL_LON: &str = "lon";

/// Holds the station list of one network and answers nearest-station queries.
#[derive(Debug, Clone)]
pub struct StationLocator {
    stations: Vec<Station>,
}

impl StationLocator {
    /// Wraps an already known station list. Order matters: it breaks distance ties.
    pub fn from_stations(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    /// Downloads and parses a network's station list CSV.
    pub async fn fetch(client: &Client, url: &str) -> Result<Self, LocateStationError> {
        info!("Fetching station list from {}", url);
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| LocateStationError::NetworkRequest(url.to_string(), e))?;
        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                if let Some(status) = e.status() {
                    return Err(LocateStationError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    });
                } else {
                    return Err(LocateStationError::NetworkRequest(url.to_string(), e));
                }
            }
        };
        let bytes = response
            .bytes()
            .await
            .map_err(|e| LocateStationError::NetworkRequest(url.to_string(), e))?;

        let stations = Self::parse_station_csv(bytes.to_vec(), url)?;
        info!("Parsed {} stations from {}", stations.len(), url);
        Ok(Self::from_stations(stations))
    }

    pub(crate) fn parse_station_csv(
        bytes: Vec<u8>,
        url: &str,
    ) -> Result<Vec<Station>, LocateStationError> {
        if is_blank(&bytes) {
            return Err(LocateStationError::EmptyStationList(url.to_string()));
        }
        let df = read_csv_bytes(bytes).map_err(|e| LocateStationError::CsvParse {
            url: url.to_string(),
            source: e,
        })?;

        let ids = Self::strings(&df, COL_ID, url)?;
        let lats = Self::floats(&df, COL_LAT, url)?;
        let lons = Self::floats(&df, COL_LON, url)?;
        // Names are informational only.
        let names = match df.column(COL_NAME) {
            Ok(column) => column_as_strings(column).unwrap_or_else(|_| vec![None; df.height()]),
            Err(_) => vec![None; df.height()],
        };

        let mut stations = Vec::with_capacity(df.height());
        for (row, (((id, lat), lon), name)) in ids
            .into_iter()
            .zip(lats)
            .zip(lons)
            .zip(names)
            .enumerate()
        {
            match (id, lat, lon) {
                (Some(id), Some(latitude), Some(longitude)) => stations.push(Station {
                    id,
                    name,
                    latitude,
                    longitude,
                }),
                (id, _, _) => warn!(
                    "Skipping station list row {} ({:?}) from {}: missing id or coordinates",
                    row, id, url
                ),
            }
        }

        if stations.is_empty() {
            return Err(LocateStationError::EmptyStationList(url.to_string()));
        }
        Ok(stations)
    }

    fn strings(
        df: &DataFrame,
        name: &str,
        url: &str,
    ) -> Result<Vec<Option<String>>, LocateStationError> {
        let column = df
            .column(name)
            .map_err(|e| LocateStationError::MissingColumn(name.to_string(), e))?;
        column_as_strings(column).map_err(|e| LocateStationError::CsvParse {
            url: url.to_string(),
            source: e,
        })
    }

    fn floats(df: &DataFrame, name: &str, url: &str) -> Result<Vec<Option<f64>>, LocateStationError> {
        let column = df
            .column(name)
            .map_err(|e| LocateStationError::MissingColumn(name.to_string(), e))?;
        column_as_f64(column).map_err(|e| LocateStationError::CsvParse {
            url: url.to_string(),
            source: e,
        })
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Returns up to `n_results` stations ordered by great-circle distance from
    /// `location`, closest first. Equal distances keep the station list order.
    ///
    /// A station whose distance comes out as NaN (see [`distance_km`]) is
    /// logged and sorted after every other station.
    pub fn query(&self, location: LatLon, n_results: usize) -> Vec<StationCandidate> {
        if n_results == 0 {
            return vec![];
        }
        let origin = (location.latitude(), location.longitude());

        let mut candidates: Vec<StationCandidate> = self
            .stations
            .iter()
            .map(|station| {
                let distance = distance_km(origin, (station.latitude, station.longitude));
                if distance.is_nan() {
                    warn!(
                        "Distance from {} to station {} ({}, {}) is undefined, ranking it last",
                        location, station.id, station.latitude, station.longitude
                    );
                }
                StationCandidate {
                    distance_km: distance,
                    station: station.clone(),
                }
            })
            .collect();

        // Stable sort: ties keep source order.
        candidates.sort_by_key(|c| OrderedFloat(c.distance_km));
        candidates.truncate(n_results);
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str, latitude: f64, longitude: f64) -> Station {
        Station {
            id: id.to_string(),
            name: None,
            latitude,
            longitude,
        }
    }

    fn new_york_locator() -> StationLocator {
        StationLocator::from_stations(vec![
            station("BUF", 42.9405, -78.7322),
            station("JFK", 40.6392, -73.7639),
            station("ALB", 42.7430, -73.8092),
            station("LGA", 40.7794, -73.8803),
            station("ISP", 40.7939, -73.1017),
            station("SYR", 43.1112, -76.1063),
            station("HPN", 41.0670, -73.7076),
        ])
    }

    fn validate_results(results: &[StationCandidate], origin: LatLon) {
        let mut last_dist = -1.0;
        for (i, candidate) in results.iter().enumerate() {
            let expected = distance_km(
                (origin.latitude(), origin.longitude()),
                (candidate.station.latitude, candidate.station.longitude),
            );
            assert!((candidate.distance_km - expected).abs() < 1e-9);
            assert!(
                candidate.distance_km >= last_dist,
                "Result {} ({}) distance {} < previous {}",
                i,
                candidate.station.id,
                candidate.distance_km,
                last_dist
            );
            last_dist = candidate.distance_km;
        }
    }

    #[test]
    fn returns_n_nearest_sorted() {
        let locator = new_york_locator();
        let origin = LatLon::new(40.7128, -74.0060).unwrap();
        let results = locator.query(origin, 3);
        assert_eq!(results.len(), 3);
        validate_results(&results, origin);
        let ids: Vec<_> = results.iter().map(|c| c.station.id.as_str()).collect();
        assert_eq!(ids, ["LGA", "JFK", "HPN"]);
    }

    #[test]
    fn sorted_for_many_query_points() {
        let locator = new_york_locator();
        for (lat, lon) in [(40.0, -74.0), (43.0, -76.0), (-10.0, 100.0), (42.0, 300.0)] {
            let origin = LatLon::new(lat, lon).unwrap();
            let results = locator.query(origin, 5);
            assert_eq!(results.len(), 5);
            validate_results(&results, origin);
        }
    }

    #[test]
    fn limit_larger_than_network_returns_everything() {
        let locator = new_york_locator();
        let results = locator.query(LatLon::new(40.0, -74.0).unwrap(), 50);
        assert_eq!(results.len(), locator.stations().len());
    }

    #[test]
    fn zero_results_requested() {
        let locator = new_york_locator();
        assert!(locator.query(LatLon::new(40.0, -74.0).unwrap(), 0).is_empty());
    }

    #[test]
    fn ties_keep_source_order() {
        let locator = StationLocator::from_stations(vec![
            station("B", 41.0, -74.0),
            station("A", 41.0, -74.0),
            station("C", 40.5, -74.0),
        ]);
        let results = locator.query(LatLon::new(40.0, -74.0).unwrap(), 3);
        let ids: Vec<_> = results.iter().map(|c| c.station.id.as_str()).collect();
        assert_eq!(ids, ["C", "B", "A"]);
    }

    #[test]
    fn undefined_distance_ranks_last() {
        let locator = StationLocator::from_stations(vec![
            station("NAN", f64::NAN, -74.0),
            station("FAR", 42.0, -74.0),
            station("NEAR", 40.1, -74.0),
        ]);
        let results = locator.query(LatLon::new(40.0, -74.0).unwrap(), 3);
        let ids: Vec<_> = results.iter().map(|c| c.station.id.as_str()).collect();
        assert_eq!(ids, ["NEAR", "FAR", "NAN"]);
        assert!(results[2].distance_km.is_nan());
    }

    #[test]
    fn parses_network_csv() {
        let csv = "stid,station_name,lat,lon,elev,begints,iem_network\n\
                   JFK,NEW YORK/JFK INTL,40.6392,-73.7639,3.0,1943-06-01,NY_ASOS\n\
                   BAD,BROKEN ROW,,-73.0,1.0,2000-01-01,NY_ASOS\n\
                   ALB,ALBANY INTL,42.7430,-73.8092,89.0,1938-01-01,NY_ASOS\n";
        let stations =
            StationLocator::parse_station_csv(csv.as_bytes().to_vec(), "test://stations").unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].id, "JFK");
        assert_eq!(stations[0].name.as_deref(), Some("NEW YORK/JFK INTL"));
        assert_eq!(stations[1].latitude, 42.7430);
    }

    #[test]
    fn missing_coordinate_column_is_an_error() {
        let csv = "stid,station_name,lon\nJFK,NEW YORK,-73.7639\n";
        let err = StationLocator::parse_station_csv(csv.as_bytes().to_vec(), "test://stations")
            .unwrap_err();
        assert!(matches!(err, LocateStationError::MissingColumn(ref c, _) if c == "lat"));
    }

    #[test]
    fn empty_body_is_an_error() {
        let err = StationLocator::parse_station_csv(Vec::new(), "test://stations").unwrap_err();
        assert!(matches!(err, LocateStationError::EmptyStationList(_)));
    }
}

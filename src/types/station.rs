//! Defines the data structure representing an ASOS weather station as listed by
//! the IEM network directory.

use serde::{Deserialize, Serialize};

/// A single station from a network's station list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Station {
    /// The station identifier used by the observation service (e.g., "JFK").
    pub id: String,
    /// Human-readable station name, when the list provides one.
    pub name: Option<String>,
    /// Latitude in decimal degrees (positive for North, negative for South).
    pub latitude: f64,
    /// Longitude in decimal degrees (positive for East, negative for West).
    pub longitude: f64,
}

/// A station together with its great-circle distance from a query point.
#[derive(Debug, Clone, PartialEq)]
pub struct StationCandidate {
    pub station: Station,
    pub distance_km: f64,
}

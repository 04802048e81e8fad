use haversine::{distance, Location as HaversineLocation, Units};

/// Great-circle distance in kilometres between two `(latitude, longitude)` pairs.
///
/// Inputs are not validated; callers pass coordinates in decimal degrees.
/// Latitudes beyond ±90 (which [`crate::LatLon`] accepts) have no geographic
/// meaning, and the result may be NaN for them as well as for NaN inputs.
pub fn distance_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    distance(
        HaversineLocation {
            latitude: a.0,
            longitude: a.1,
        },
        HaversineLocation {
            latitude: b.0,
            longitude: b.1,
        },
        Units::Kilometers,
    )
}

//! Validated geographical coordinates.

use crate::error::WeatherPullError;
use std::fmt;
use std::ops::RangeInclusive;

// Looser than the physical ranges. Longitudes in 0..360 are accepted too.
const LATITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;
const LONGITUDE_RANGE: RangeInclusive<f64> = -360.0..=360.0;

/// Represents a geographical coordinate using latitude and longitude.
///
/// A `LatLon` can only be created through [`LatLon::new`], which validates both
/// components, so every value in circulation is within the accepted ranges.
///
/// Note that the accepted ranges (latitude `-180..=180`, longitude `-360..=360`)
/// are looser than the geographic ones. NaN is always rejected.
///
/// # Examples
///
/// ```
/// use asos_weather::LatLon;
///
/// let albany = LatLon::new(42.6526, -73.7562)?;
/// assert_eq!(albany.latitude(), 42.6526);
/// assert_eq!(albany.longitude(), -73.7562);
///
/// assert!(LatLon::new(200.0, 0.0).is_err());
/// # Ok::<(), asos_weather::WeatherPullError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    latitude: f64,
    longitude: f64,
}

impl LatLon {
    /// Creates a validated coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherPullError::InvalidLatitude`] or
    /// [`WeatherPullError::InvalidLongitude`] for the first component that is
    /// out of range. Latitude is checked first.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, WeatherPullError> {
        if !LATITUDE_RANGE.contains(&latitude) {
            return Err(WeatherPullError::InvalidLatitude(latitude));
        }
        if !LONGITUDE_RANGE.contains(&longitude) {
            return Err(WeatherPullError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

//! Resampling step sizes.

use crate::error::WeatherPullError;
use chrono::{Duration, NaiveDateTime};
use std::fmt;
use std::str::FromStr;

/// A positive, whole-second resampling step.
///
/// Parses pandas-style frequency aliases so existing interval strings keep
/// working: `"15T"`, `"15min"`, `"1H"`, `"30S"`, `"1D"`. A missing count means 1.
///
/// ```
/// use asos_weather::Interval;
///
/// let quarter_hour: Interval = "15T".parse()?;
/// assert_eq!(quarter_hour, Interval::minutes(15)?);
/// assert_eq!(Interval::default(), quarter_hour);
/// # Ok::<(), asos_weather::WeatherPullError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    seconds: i64,
}

impl Interval {
    pub fn from_duration(step: Duration) -> Result<Self, WeatherPullError> {
        if step.subsec_nanos() != 0 {
            return Err(WeatherPullError::InvalidInterval(format!("{step}")));
        }
        Self::seconds(step.num_seconds())
    }

    /// Fails for non-positive steps and for steps too long to express as a
    /// [`Duration`].
    pub fn seconds(seconds: i64) -> Result<Self, WeatherPullError> {
        if seconds <= 0 || Duration::try_seconds(seconds).is_none() {
            return Err(WeatherPullError::InvalidInterval(format!("{seconds}s")));
        }
        Ok(Self { seconds })
    }

    pub fn minutes(minutes: i64) -> Result<Self, WeatherPullError> {
        minutes
            .checked_mul(60)
            .ok_or_else(|| WeatherPullError::InvalidInterval(format!("{minutes}min")))
            .and_then(Self::seconds)
    }

    pub fn as_seconds(&self) -> i64 {
        self.seconds
    }

    pub fn as_duration(&self) -> Duration {
        Duration::seconds(self.seconds)
    }

    /// Latest step boundary at or before `t`. Boundaries are multiples of the
    /// step counted from the Unix epoch. `None` when the boundary is out of
    /// the representable range.
    pub(crate) fn floor(&self, t: NaiveDateTime) -> Option<NaiveDateTime> {
        let utc = t.and_utc();
        let rem = utc.timestamp().rem_euclid(self.seconds);
        t.checked_sub_signed(Duration::try_seconds(rem)?)?
            .checked_sub_signed(Duration::nanoseconds(i64::from(utc.timestamp_subsec_nanos())))
    }

    /// Nearest step boundary; exact halves round up.
    pub(crate) fn round(&self, t: NaiveDateTime) -> Option<NaiveDateTime> {
        let floored = self.floor(t)?;
        let offset = t - floored;
        let step = self.as_duration();
        if offset >= step - offset {
            floored.checked_add_signed(step)
        } else {
            Some(floored)
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self { seconds: 15 * 60 }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.seconds {
            s if s % 3600 == 0 => write!(f, "{}H", s / 3600),
            s if s % 60 == 0 => write!(f, "{}min", s / 60),
            s => write!(f, "{s}S"),
        }
    }
}

impl FromStr for Interval {
    type Err = WeatherPullError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WeatherPullError::InvalidInterval(s.to_string());
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (count, unit) = trimmed.split_at(split);
        let count: i64 = if count.is_empty() {
            1
        } else {
            count.parse().map_err(|_| invalid())?
        };
        let unit_seconds = match unit {
            "S" | "s" | "sec" => 1,
            "T" | "min" | "m" => 60,
            "H" | "h" => 3600,
            "D" | "d" => 86_400,
            _ => return Err(invalid()),
        };
        count
            .checked_mul(unit_seconds)
            .ok_or_else(invalid)
            .and_then(Self::seconds)
            .map_err(|_| invalid())
    }
}

use crate::error::WeatherPullError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// Conversion into a timezone-less timestamp.
///
/// Implemented for date strings and the chrono date/time types. Values that
/// carry a timezone keep their local wall-clock time; the zone is dropped.
pub trait IntoNaiveDateTime {
    fn into_naive_datetime(self) -> Option<NaiveDateTime>;
}

impl IntoNaiveDateTime for NaiveDateTime {
    fn into_naive_datetime(self) -> Option<NaiveDateTime> {
        Some(self)
    }
}

impl IntoNaiveDateTime for NaiveDate {
    fn into_naive_datetime(self) -> Option<NaiveDateTime> {
        self.and_hms_opt(0, 0, 0)
    }
}

impl<Tz: TimeZone> IntoNaiveDateTime for DateTime<Tz> {
    fn into_naive_datetime(self) -> Option<NaiveDateTime> {
        Some(self.naive_local())
    }
}

impl IntoNaiveDateTime for &str {
    fn into_naive_datetime(self) -> Option<NaiveDateTime> {
        let trimmed = self.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return dt.into_naive_datetime();
        }
        for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
            if let Ok(naive_dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Some(naive_dt);
            }
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(IntoNaiveDateTime::into_naive_datetime)
    }
}

impl IntoNaiveDateTime for String {
    fn into_naive_datetime(self) -> Option<NaiveDateTime> {
        self.as_str().into_naive_datetime()
    }
}

impl IntoNaiveDateTime for &String {
    fn into_naive_datetime(self) -> Option<NaiveDateTime> {
        self.as_str().into_naive_datetime()
    }
}

/// The period an observation pull should cover.
///
/// Both ends are naive timestamps; the observation service interprets them in
/// its own configured timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateRange {
    /// Builds a range from anything convertible to a naive timestamp.
    ///
    /// ```
    /// use asos_weather::DateRange;
    /// use chrono::NaiveDate;
    ///
    /// let range = DateRange::new("2023-07-01", NaiveDate::from_ymd_opt(2023, 7, 14).unwrap())?;
    /// assert_eq!(range.start().date(), NaiveDate::from_ymd_opt(2023, 7, 1).unwrap());
    /// # Ok::<(), asos_weather::WeatherPullError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// [`WeatherPullError::InvalidDate`] when either end cannot be interpreted,
    /// [`WeatherPullError::InvalidDateRange`] when `start` is after `end`.
    pub fn new(
        start: impl IntoNaiveDateTime,
        end: impl IntoNaiveDateTime,
    ) -> Result<Self, WeatherPullError> {
        let start = start
            .into_naive_datetime()
            .ok_or(WeatherPullError::InvalidDate { field: "start" })?;
        let end = end
            .into_naive_datetime()
            .ok_or(WeatherPullError::InvalidDate { field: "end" })?;
        if start > end {
            return Err(WeatherPullError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }
}

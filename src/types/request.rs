use crate::error::WeatherPullError;
use crate::types::date_range::DateRange;
use crate::types::interval::Interval;
use crate::types::lat_lon::LatLon;
use bon::bon;

/// Number of nearest stations considered when none is given.
pub const DEFAULT_CANDIDATE_DEPTH: usize = 10;

/// Parameters of an observation pull.
///
/// Built with [`ObservationRequest::builder`]; `build()` validates the
/// candidate settings.
///
/// ```
/// use asos_weather::{DateRange, Interval, LatLon, ObservationRequest};
///
/// let request = ObservationRequest::builder()
///     .period(DateRange::new("2023-07-01", "2023-07-31")?)
///     .location(LatLon::new(40.7128, -74.0060)?)
///     .interval(Interval::minutes(30)?)
///     .build()?;
/// assert_eq!(request.candidate_depth(), 10);
/// assert!(ObservationRequest::builder()
///     .period(DateRange::new("2023-07-01", "2023-07-31")?)
///     .location(LatLon::new(40.7128, -74.0060)?)
///     .skip_nearest(3)
///     .candidate_depth(3)
///     .build()
///     .is_err());
/// # Ok::<(), asos_weather::WeatherPullError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRequest {
    period: DateRange,
    location: LatLon,
    skip_nearest: Option<usize>,
    candidate_depth: usize,
    interval: Interval,
    verbose: bool,
    check_record: bool,
    max_attempts: Option<usize>,
}

#[bon]
impl ObservationRequest {
    /// * `skip_nearest` - start the search at this candidate index instead of
    ///   the nearest station, for when the nearest ones are known to have gaps.
    /// * `candidate_depth` - how many nearest stations to consider (default 10).
    /// * `check_record` - accept stations with only a handful of reports.
    /// * `max_attempts` - upper bound on stations queried, at least 1;
    ///   defaults to all remaining candidates.
    #[builder]
    pub fn new(
        period: DateRange,
        location: LatLon,
        skip_nearest: Option<usize>,
        #[builder(default = DEFAULT_CANDIDATE_DEPTH)] candidate_depth: usize,
        #[builder(default)] interval: Interval,
        #[builder(default)] verbose: bool,
        #[builder(default)] check_record: bool,
        max_attempts: Option<usize>,
    ) -> Result<Self, WeatherPullError> {
        let skip = skip_nearest.unwrap_or(0);
        if candidate_depth == 0 || candidate_depth <= skip {
            return Err(WeatherPullError::InvalidCandidateDepth {
                depth: candidate_depth,
                skip_nearest: skip,
            });
        }
        if max_attempts == Some(0) {
            return Err(WeatherPullError::InvalidMaxAttempts);
        }
        Ok(Self {
            period,
            location,
            skip_nearest,
            candidate_depth,
            interval,
            verbose,
            check_record,
            max_attempts,
        })
    }

    pub fn period(&self) -> &DateRange {
        &self.period
    }

    pub fn location(&self) -> LatLon {
        self.location
    }

    pub fn skip_nearest(&self) -> Option<usize> {
        self.skip_nearest
    }

    pub fn candidate_depth(&self) -> usize {
        self.candidate_depth
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn check_record(&self) -> bool {
        self.check_record
    }

    pub fn max_attempts(&self) -> Option<usize> {
        self.max_attempts
    }
}

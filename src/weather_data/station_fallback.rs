//! Walks a distance-ordered candidate list until a station has enough data.

use crate::error::WeatherPullError;
use crate::types::date_range::DateRange;
use crate::types::request::ObservationRequest;
use crate::types::station::StationCandidate;
use crate::weather_data::data_loader::ObservationSource;
use crate::weather_data::observation_table::ObservationTable;
use chrono::NaiveDate;
use log::{log, Level};

/// Reports a station needs before it is accepted.
pub const MIN_ROWS: usize = 1000;
/// Relaxed threshold used in check-record mode.
pub const MIN_ROWS_CHECK_RECORD: usize = 10;

/// How far and how strictly the candidate list is searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackPolicy {
    pub skip_nearest: usize,
    pub min_rows: usize,
    /// `None` tries every remaining candidate.
    pub max_attempts: Option<usize>,
    pub verbose: bool,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            skip_nearest: 0,
            min_rows: MIN_ROWS,
            max_attempts: None,
            verbose: false,
        }
    }
}

impl FallbackPolicy {
    /// Level of the per-attempt log lines: `Info` when verbose, else `Debug`.
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::Info
        } else {
            Level::Debug
        }
    }
}

impl From<&ObservationRequest> for FallbackPolicy {
    fn from(request: &ObservationRequest) -> Self {
        Self {
            skip_nearest: request.skip_nearest().unwrap_or(0),
            min_rows: if request.check_record() {
                MIN_ROWS_CHECK_RECORD
            } else {
                MIN_ROWS
            },
            max_attempts: request.max_attempts(),
            verbose: request.verbose(),
        }
    }
}

/// The accepted station and its raw table.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackOutcome {
    pub candidate: StationCandidate,
    pub table: ObservationTable,
    /// Stations queried, the accepted one included.
    pub attempts: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Rejection {
    TooFewRows { rows: usize, required: usize },
    StartsLate { earliest: NaiveDate, requested: NaiveDate },
}

impl Rejection {
    fn check(table: &ObservationTable, period: &DateRange, min_rows: usize) -> Option<Self> {
        let too_few = Rejection::TooFewRows {
            rows: table.len(),
            required: min_rows,
        };
        if table.len() < min_rows {
            return Some(too_few);
        }
        let Some(earliest) = table.earliest().map(|t| t.date()) else {
            return Some(too_few);
        };
        if earliest > period.start_date() {
            return Some(Rejection::StartsLate {
                earliest,
                requested: period.start_date(),
            });
        }
        None
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::TooFewRows { rows, required } => {
                write!(f, "{} rows, {} required", rows, required)
            }
            Rejection::StartsLate {
                earliest,
                requested,
            } => write!(f, "data starts {}, after requested start {}", earliest, requested),
        }
    }
}

/// Queries `candidates` in order, starting at `policy.skip_nearest`, and
/// returns the first station whose table has at least `policy.min_rows` rows
/// and starts on or before the period's start date.
///
/// Every attempt is a fresh request. An error from the source ends the search
/// immediately.
pub async fn pull_with_fallback<S>(
    source: &S,
    candidates: &[StationCandidate],
    period: &DateRange,
    policy: &FallbackPolicy,
) -> Result<FallbackOutcome, WeatherPullError>
where
    S: ObservationSource + ?Sized,
{
    let level = policy.log_level();
    let remaining = candidates.iter().skip(policy.skip_nearest);
    let budget = policy.max_attempts.unwrap_or(usize::MAX);

    let mut attempts = 0;
    let mut last_station = None;
    for candidate in remaining.take(budget) {
        attempts += 1;
        let station = &candidate.station.id;
        let table = source.fetch_observations(station, period).await?;

        match Rejection::check(&table, period, policy.min_rows) {
            None => {
                log!(
                    level,
                    "Using station {} ({:.1} km) with {} rows after {} attempt(s)",
                    station,
                    candidate.distance_km,
                    table.len(),
                    attempts
                );
                return Ok(FallbackOutcome {
                    candidate: candidate.clone(),
                    table,
                    attempts,
                });
            }
            Some(reason) => {
                log!(
                    level,
                    "Skipping station {} ({:.1} km): {}",
                    station,
                    candidate.distance_km,
                    reason
                );
                last_station = Some(station.clone());
            }
        }
    }

    Err(WeatherPullError::StationsExhausted {
        candidates: candidates.len(),
        attempts,
        last_station,
    })
}

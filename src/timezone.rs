//! Conversion of UTC-indexed series to US Eastern local time.

use chrono::{Duration, NaiveDateTime, TimeZone};
use chrono_tz::America::New_York;
use chrono_tz::OffsetComponents;

/// A series whose rows are labelled by naive timestamps.
pub trait TimeIndexed {
    fn first_timestamp(&self) -> Option<NaiveDateTime>;

    /// Moves every timestamp by `by`.
    fn shift_index(&mut self, by: Duration);
}

/// Hours Eastern time is behind UTC at the given UTC instant: 4 during
/// daylight saving time, 5 otherwise.
pub fn eastern_offset_hours(utc: NaiveDateTime) -> i64 {
    let local = New_York.from_utc_datetime(&utc);
    if local.offset().dst_offset() != Duration::zero() {
        4
    } else {
        5
    }
}

/// Shifts a UTC-indexed series to US Eastern local time.
///
/// The offset is decided once, from the first timestamp, and applied to every
/// row. A series that crosses a DST transition is therefore off by one hour on
/// the far side of the transition. Empty series are returned unchanged.
pub fn utc_to_eastern<T: TimeIndexed>(mut series: T) -> T {
    if let Some(first) = series.first_timestamp() {
        series.shift_index(-Duration::hours(eastern_offset_hours(first)));
    }
    series
}

//! Resampling of irregular observation tables onto a fixed-step time grid.
//!
//! Gaps are filled with a piecewise cubic Hermite curve whose knot slopes come
//! from the parabola through each point and its neighbours. This keeps the
//! curvature of the reports instead of drawing straight lines between them,
//! and reproduces quadratic trends exactly.

use crate::timezone::TimeIndexed;
use crate::types::interval::Interval;
use crate::weather_data::observation_table::{ObservationTable, COL_FEEL, COL_TMPF, COL_VALID};
use chrono::{Duration, NaiveDateTime};
use polars::prelude::*;

/// Observations of one station on a uniform time grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledObservations {
    station: String,
    interval: Interval,
    index: Vec<NaiveDateTime>,
    temperature: Vec<Option<f64>>,
    feels_like: Vec<Option<f64>>,
}

impl ResampledObservations {
    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    pub fn temperature(&self) -> &[Option<f64>] {
        &self.temperature
    }

    pub fn feels_like(&self) -> &[Option<f64>] {
        &self.feels_like
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Columns `valid`, `tmpf` and `feel`.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        df!(
            COL_VALID => self.index.clone(),
            COL_TMPF => self.temperature.clone(),
            COL_FEEL => self.feels_like.clone()
        )
    }
}

impl TimeIndexed for ResampledObservations {
    fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.index.first().copied()
    }

    fn shift_index(&mut self, by: Duration) {
        for t in &mut self.index {
            *t += by;
        }
    }
}

/// Reindexes `table` onto the `interval` grid spanning its first and last
/// report and interpolates both value columns.
///
/// Values are sampled at `earliest + k * interval` up to `latest`, then each
/// sample's timestamp is rounded to the nearest multiple of the step (counted
/// from the Unix epoch). Grid points outside the span of a column's known
/// values stay `None`.
pub fn resample(table: &ObservationTable, interval: Interval) -> ResampledObservations {
    let grid = match (table.earliest(), table.latest()) {
        (Some(first), Some(last)) => uniform_grid(first, last, interval),
        _ => Vec::new(),
    };
    let times = table.timestamps();

    ResampledObservations {
        station: table.station().to_string(),
        interval,
        temperature: interpolate_onto(&times, &table.temperatures(), &grid),
        feels_like: interpolate_onto(&times, &table.feels_like(), &grid),
        index: grid
            .iter()
            .map(|&t| interval.round(t).unwrap_or(t))
            .collect(),
    }
}

/// `first`, `first + interval`, ... up to and including `last`.
pub(crate) fn uniform_grid(
    first: NaiveDateTime,
    last: NaiveDateTime,
    interval: Interval,
) -> Vec<NaiveDateTime> {
    let step = interval.as_duration();
    let mut grid = Vec::new();
    let mut t = first;
    while t <= last {
        grid.push(t);
        match t.checked_add_signed(step) {
            Some(next) => t = next,
            None => break,
        }
    }
    grid
}

/// Evaluates the series `(times, values)` at every grid timestamp.
///
/// `times` must be strictly increasing. Missing values are ignored when
/// building the curve.
pub fn interpolate_onto(
    times: &[NaiveDateTime],
    values: &[Option<f64>],
    grid: &[NaiveDateTime],
) -> Vec<Option<f64>> {
    let known: Vec<(NaiveDateTime, f64)> = times
        .iter()
        .zip(values)
        .filter_map(|(&t, value)| value.filter(|v| v.is_finite()).map(|v| (t, v)))
        .collect();
    let Some(&(origin, _)) = known.first() else {
        return vec![None; grid.len()];
    };

    let seconds_since = |t: NaiveDateTime| (t - origin).num_milliseconds() as f64 / 1000.0;
    let spline = HermiteSpline::new(
        known.iter().map(|&(t, _)| seconds_since(t)).collect(),
        known.iter().map(|&(_, v)| v).collect(),
    );
    grid.iter()
        .map(|&t| spline.evaluate(seconds_since(t)))
        .collect()
}

/// Piecewise cubic Hermite curve through a set of knots.
#[derive(Debug, Clone)]
struct HermiteSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    slopes: Vec<f64>,
}

impl HermiteSpline {
    /// `xs` strictly increasing, same length as `ys`.
    fn new(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        let slopes = Self::parabolic_slopes(&xs, &ys);
        Self { xs, ys, slopes }
    }

    /// Derivative of the parabola through each knot and its two neighbours;
    /// the ends use the parabola through the first/last three knots.
    fn parabolic_slopes(xs: &[f64], ys: &[f64]) -> Vec<f64> {
        let n = xs.len();
        match n {
            0 => return Vec::new(),
            1 => return vec![0.0],
            2 => {
                let secant = (ys[1] - ys[0]) / (xs[1] - xs[0]);
                return vec![secant, secant];
            }
            _ => {}
        }

        let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        let d: Vec<f64> = ys
            .windows(2)
            .zip(&h)
            .map(|(w, &h)| (w[1] - w[0]) / h)
            .collect();

        let mut slopes = Vec::with_capacity(n);
        slopes.push(((2.0 * h[0] + h[1]) * d[0] - h[0] * d[1]) / (h[0] + h[1]));
        for i in 1..n - 1 {
            slopes.push((h[i] * d[i - 1] + h[i - 1] * d[i]) / (h[i - 1] + h[i]));
        }
        let (a, b) = (n - 3, n - 2);
        slopes.push(((2.0 * h[b] + h[a]) * d[b] - h[b] * d[a]) / (h[a] + h[b]));
        slopes
    }

    /// `None` outside the knot span.
    fn evaluate(&self, x: f64) -> Option<f64> {
        let n = self.xs.len();
        if n == 0 || x < self.xs[0] || x > self.xs[n - 1] {
            return None;
        }
        let upper = self.xs.partition_point(|&knot| knot <= x);
        let i = upper - 1;
        if i == n - 1 {
            return Some(self.ys[i]);
        }

        let h = self.xs[i + 1] - self.xs[i];
        let t = (x - self.xs[i]) / h;
        let t2 = t * t;
        let t3 = t2 * t;
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;
        Some(
            h00 * self.ys[i]
                + h10 * h * self.slopes[i]
                + h01 * self.ys[i + 1]
                + h11 * h * self.slopes[i + 1],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather_data::observation_table::Observation;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 7, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn minutes_since_midnight(t: NaiveDateTime) -> f64 {
        (t - at(0, 0)).num_seconds() as f64 / 60.0
    }

    fn table_from(points: &[(NaiveDateTime, Option<f64>)]) -> ObservationTable {
        ObservationTable::from_rows(
            "TST",
            points.iter().map(|&(valid, t)| Observation {
                valid,
                temperature: t,
                feels_like: t.map(|t| t - 2.0),
            }),
        )
    }

    #[test]
    fn grid_is_evenly_spaced_and_inside_original_span() {
        let table = table_from(&[
            (at(0, 51), Some(70.0)),
            (at(1, 51), Some(71.0)),
            (at(2, 13), Some(71.5)),
            (at(2, 51), Some(72.0)),
            (at(5, 51), Some(75.0)),
        ]);
        for step in [5, 15, 30, 60] {
            let interval = Interval::minutes(step).unwrap();
            let grid = uniform_grid(at(0, 51), at(5, 51), interval);
            assert_eq!(grid[0], at(0, 51));
            assert!(*grid.last().unwrap() <= at(5, 51));
            assert!(*grid.last().unwrap() + interval.as_duration() > at(5, 51));

            let resampled = resample(&table, interval);
            assert_eq!(resampled.len(), grid.len());
            for pair in resampled.index().windows(2) {
                assert_eq!(pair[1] - pair[0], interval.as_duration());
            }
        }
    }

    #[test]
    fn samples_from_first_report_and_rounds_labels() {
        let table = table_from(&[(at(0, 51), Some(70.0)), (at(2, 51), Some(72.0))]);
        let resampled = resample(&table, Interval::default());
        assert_eq!(resampled.len(), 9);
        assert_eq!(resampled.index().first(), Some(&at(0, 45)));
        assert_eq!(resampled.index()[1], at(1, 0));
        assert_eq!(resampled.index().last(), Some(&at(2, 45)));

        // Values come from 00:51, 01:06, ... 02:51, not from the labels.
        let temps = resampled.temperature();
        assert_eq!(temps[0], Some(70.0));
        assert!((temps[1].unwrap() - 70.25).abs() < 1e-9);
        assert_eq!(temps[8], Some(72.0));
    }

    #[test]
    fn reproduces_quadratic_curvature() {
        // y = (m / 60)^2 on irregular report times
        let f = |t: NaiveDateTime| (minutes_since_midnight(t) / 60.0).powi(2);
        let reports = [at(0, 0), at(0, 37), at(1, 51), at(2, 5), at(3, 44), at(5, 0)];
        let table = table_from(&reports.map(|t| (t, Some(f(t)))));
        let resampled = resample(&table, Interval::default());

        for (t, value) in resampled.index().iter().zip(resampled.temperature()) {
            let expected = f(*t);
            let got = value.expect("grid point inside span");
            assert!((got - expected).abs() < 1e-9, "at {t}: {got} vs {expected}");
        }
    }

    #[test]
    fn differs_from_linear_fill() {
        let table = table_from(&[
            (at(0, 0), Some(0.0)),
            (at(1, 0), Some(1.0)),
            (at(2, 0), Some(4.0)),
        ]);
        let resampled = resample(&table, Interval::minutes(30).unwrap());
        // Linear fill would give 0.5 at 00:30.
        let half_past = resampled.temperature()[1].unwrap();
        assert!((half_past - 0.25).abs() < 1e-9, "{half_past}");
    }

    #[test]
    fn existing_grid_values_are_kept_and_nulls_filled() {
        let table = table_from(&[
            (at(0, 0), Some(60.0)),
            (at(0, 15), None),
            (at(0, 30), Some(62.0)),
            (at(0, 45), Some(63.0)),
        ]);
        let resampled = resample(&table, Interval::default());
        assert_eq!(resampled.index(), [at(0, 0), at(0, 15), at(0, 30), at(0, 45)]);
        let temps = resampled.temperature();
        assert_eq!(temps[0], Some(60.0));
        assert_eq!(temps[2], Some(62.0));
        assert_eq!(temps[3], Some(63.0));
        let filled = temps[1].unwrap();
        assert!(filled > 60.0 && filled < 62.0);
    }

    #[test]
    fn leading_and_trailing_gaps_stay_missing() {
        let table = table_from(&[
            (at(0, 0), None),
            (at(0, 30), Some(50.0)),
            (at(1, 0), Some(52.0)),
            (at(1, 30), None),
        ]);
        let resampled = resample(&table, Interval::default());
        let temps = resampled.temperature();
        assert_eq!(temps.len(), 7);
        assert_eq!(temps[0], None);
        assert_eq!(temps[1], None);
        assert_eq!(temps[2], Some(50.0));
        assert_eq!(temps[4], Some(52.0));
        assert_eq!(temps[5], None);
        assert_eq!(temps[6], None);
    }

    #[test]
    fn span_shorter_than_a_step_keeps_first_report() {
        let table = table_from(&[(at(0, 51), Some(70.0)), (at(0, 58), Some(71.0))]);
        let resampled = resample(&table, Interval::default());
        assert_eq!(resampled.index(), [at(0, 45)]);
        assert_eq!(resampled.temperature(), [Some(70.0)]);
        assert!(resample(&ObservationTable::empty("TST"), Interval::default()).is_empty());
    }

    #[test]
    fn huge_step_does_not_overflow() {
        let table = table_from(&[(at(0, 0), Some(60.0)), (at(1, 0), Some(62.0))]);
        let resampled = resample(&table, Interval::seconds(1_000_000_000_000_000).unwrap());
        assert_eq!(resampled.len(), 1);
        assert_eq!(resampled.temperature(), [Some(60.0)]);

        let last = NaiveDateTime::MAX;
        let table = table_from(&[(last - Duration::minutes(20), Some(1.0)), (last, Some(2.0))]);
        let resampled = resample(&table, Interval::default());
        assert_eq!(resampled.len(), 2);
    }

    #[test]
    fn all_missing_column_yields_all_none() {
        let grid = [at(0, 15), at(0, 30)];
        let values = interpolate_onto(&[at(0, 0), at(1, 0)], &[None, None], &grid);
        assert_eq!(values, vec![None, None]);
    }

    #[test]
    fn exports_dataframe() -> PolarsResult<()> {
        let table = table_from(&[(at(0, 0), Some(60.0)), (at(1, 0), Some(62.0))]);
        let df = resample(&table, Interval::default()).to_dataframe()?;
        assert_eq!(df.shape(), (5, 3));
        assert_eq!(df.get_column_names(), ["valid", "tmpf", "feel"]);
        Ok(())
    }
}

use asos_weather::{resample, Interval, Observation, ObservationTable};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A month of reports every 20 minutes at :11, :31, :51 with a few gaps.
fn month_of_reports() -> ObservationTable {
    let start = NaiveDate::from_ymd_opt(2023, 7, 1)
        .unwrap()
        .and_hms_opt(0, 11, 0)
        .unwrap();
    let rows = (0..31 * 72).map(|i| {
        let hour = (i / 3) as f64;
        Observation {
            valid: start + Duration::minutes(20 * i as i64),
            temperature: (i % 17 != 0).then(|| 70.0 + 10.0 * (hour / 24.0 * std::f64::consts::TAU).sin()),
            feels_like: (i % 23 != 0).then(|| 72.0 + 12.0 * (hour / 24.0 * std::f64::consts::TAU).sin()),
        }
    });
    ObservationTable::from_rows("JFK", rows)
}

fn bench_resample(c: &mut Criterion) {
    let table = month_of_reports();
    let quarter_hour = Interval::minutes(15).unwrap();
    let minute = Interval::minutes(1).unwrap();
    c.bench_function("resample_15min", |b| {
        b.iter(|| resample(black_box(&table), quarter_hour))
    });
    c.bench_function("resample_1min", |b| {
        b.iter(|| resample(black_box(&table), minute))
    });
}

criterion_group!(benches, bench_resample);
criterion_main!(benches);

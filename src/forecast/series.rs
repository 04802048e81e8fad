use crate::timezone::TimeIndexed;
use chrono::{Duration, NaiveDateTime};
use polars::prelude::*;
use std::fmt;

/// Variables the hourly forecast can be reduced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastVariable {
    /// Temperature in the unit the service reports (°F for US points).
    Temperature,
    /// Sustained wind speed in mph.
    WindSpeed,
}

impl ForecastVariable {
    pub fn column_name(&self) -> &'static str {
        match self {
            ForecastVariable::Temperature => "temperature",
            ForecastVariable::WindSpeed => "wind_speed",
        }
    }
}

impl fmt::Display for ForecastVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    /// Period start, naive UTC.
    pub time: NaiveDateTime,
    pub value: f64,
}

/// One forecast variable in period order.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    variable: ForecastVariable,
    points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn new(variable: ForecastVariable, points: Vec<ForecastPoint>) -> Self {
        Self { variable, points }
    }

    pub fn variable(&self) -> ForecastVariable {
        self.variable
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Columns `time` and the variable's column name.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let times: Vec<NaiveDateTime> = self.points.iter().map(|p| p.time).collect();
        let values: Vec<f64> = self.points.iter().map(|p| p.value).collect();
        DataFrame::new(vec![
            Column::new("time".into(), times),
            Column::new(self.variable.column_name().into(), values),
        ])
    }
}

impl TimeIndexed for ForecastSeries {
    fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.points.first().map(|p| p.time)
    }

    fn shift_index(&mut self, by: Duration) {
        for point in &mut self.points {
            point.time += by;
        }
    }
}

/// Reads the leading run of digits of a wind speed such as `"10 mph"`,
/// `"100mph"` or `"10 to 15 mph"`. Leading whitespace is ignored.
pub fn parse_wind_speed(text: &str) -> Option<u32> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

use chrono::NaiveDateTime;
use std::collections::BTreeMap;

pub const COL_VALID: &str = "valid";
pub const COL_TMPF: &str = "tmpf";
pub const COL_FEEL: &str = "feel";

/// One observation report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub valid: NaiveDateTime,
    /// Air temperature in °F.
    pub temperature: Option<f64>,
    /// Feels-like temperature in °F.
    pub feels_like: Option<f64>,
}

/// Raw observations of a single station, unique per timestamp and in ascending
/// timestamp order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObservationTable {
    station: String,
    rows: Vec<Observation>,
}

impl ObservationTable {
    /// Builds a table from rows in source order. When several rows share a
    /// timestamp the last one wins.
    pub fn from_rows(station: impl Into<String>, rows: impl IntoIterator<Item = Observation>) -> Self {
        let deduplicated: BTreeMap<NaiveDateTime, Observation> =
            rows.into_iter().map(|row| (row.valid, row)).collect();
        Self {
            station: station.into(),
            rows: deduplicated.into_values().collect(),
        }
    }

    pub fn empty(station: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            rows: Vec::new(),
        }
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn earliest(&self) -> Option<NaiveDateTime> {
        self.rows.first().map(|row| row.valid)
    }

    pub fn latest(&self) -> Option<NaiveDateTime> {
        self.rows.last().map(|row| row.valid)
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.rows.iter().map(|row| row.valid).collect()
    }

    pub fn temperatures(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|row| row.temperature).collect()
    }

    pub fn feels_like(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|row| row.feels_like).collect()
    }
}

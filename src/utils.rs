use polars::prelude::*;
use std::io::Cursor;

/// Reads a headered CSV body into a DataFrame with every column as a string.
///
/// Type coercion is left to the caller so that tokens such as `null` or `M`
/// become missing values instead of failing the whole parse.
pub(crate) fn read_csv_bytes(bytes: Vec<u8>) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
}

/// True when a response body holds nothing but whitespace.
pub(crate) fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

pub(crate) fn column_as_strings(column: &Column) -> PolarsResult<Vec<Option<String>>> {
    Ok(column
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_owned))
        .collect())
}

/// Non-numeric entries become `None`.
pub(crate) fn column_as_f64(column: &Column) -> PolarsResult<Vec<Option<f64>>> {
    let numeric = column
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(numeric.f64()?.into_iter().collect())
}

//! CSV reading operations.

use std::{fs::File, io::Cursor, path::Path};

use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReadOptions, StringChunked}};

use crate::{error::{DroughtError, DroughtResult}, types::Observation};

pub(crate) const STATE_COLUMN: &str = "State";
pub(crate) const PERCENTAGE_COLUMN: &str = "Drought_Percentage";
pub(crate) const CROP_COLUMN: &str = "Crop_Type";

/// Reads delimited observations from `path`. The file handle is closed on return.
pub(crate) fn read_observations(path: &Path, delimiter: u8) -> DroughtResult<Vec<Observation>> {
    let file = File::open(path)
        .map_err(|e| DroughtError::data_source(path, format!("[io::csv::read] failed to open: {e}")))?;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .map_parse_options(|po| po.with_separator(delimiter))
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(file)
        .finish()
        .map_err(|e| DroughtError::data_source(path, format!("[io::csv::read] failed to parse: {e}")))?;
    observations_from_dataframe(&df)
}

/// Reads delimited observations from an in-memory string.
pub(crate) fn read_observations_string(csv: &str, delimiter: u8) -> DroughtResult<Vec<Observation>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .map_parse_options(|po| po.with_separator(delimiter))
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(csv.as_bytes()))
        .finish()
        .map_err(|e| DroughtError::data_source("<string>", format!("[io::csv::read] failed to parse: {e}")))?;
    observations_from_dataframe(&df)
}

/// Converts an all-string DataFrame into observations, validating every cell.
/// Columns other than the three fixed names are ignored.
fn observations_from_dataframe(df: &DataFrame) -> DroughtResult<Vec<Observation>> {
    let states = string_column(df, STATE_COLUMN)?;
    let percentages = string_column(df, PERCENTAGE_COLUMN)?;
    let crops = string_column(df, CROP_COLUMN)?;

    states.into_iter()
        .zip(percentages.into_iter())
        .zip(crops.into_iter())
        .enumerate()
        .map(|(i, ((state, pct), crop))| {
            let record = i + 1;
            let state = required(record, STATE_COLUMN, state)?;
            let crop = required(record, CROP_COLUMN, crop)?;
            let pct = required(record, PERCENTAGE_COLUMN, pct)?;
            let drought_percentage = pct.trim().parse::<f64>()
                .map_err(|_| DroughtError::data_format(record, PERCENTAGE_COLUMN, format!("{pct:?} is not numeric")))?;
            Ok(Observation::new(state, drought_percentage, crop))
        })
        .collect()
}

/// A header column as strings. Record 0 in the error stands for the header row.
fn string_column<'a>(df: &'a DataFrame, name: &str) -> DroughtResult<&'a StringChunked> {
    df.column(name)
        .and_then(|col| col.str())
        .map_err(|_| DroughtError::data_format(0, name, "column missing from header"))
}

/// A cell that must be present and non-blank.
fn required<'a>(record: usize, column: &str, value: Option<&'a str>) -> DroughtResult<&'a str> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(DroughtError::data_format(record, column, "value is missing")),
    }
}

#[cfg(test)]
mod tests {
    use super::read_observations_string;
    use crate::error::DroughtError;

    #[test]
    fn reads_fixed_columns() {
        let csv = "State,Drought_Percentage,Crop_Type\nKerala,40,Rice\nPunjab,10.5,Wheat\n";
        let rows = read_observations_string(csv, b',').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].state, "Kerala");
        assert_eq!(rows[0].drought_percentage, 40.0);
        assert_eq!(rows[1].crop_type, "Wheat");
        assert_eq!(rows[1].drought_percentage, 10.5);
    }

    #[test]
    fn header_only_gives_no_rows() {
        let rows = read_observations_string("State,Drought_Percentage,Crop_Type\n", b',').unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn column_order_and_extras_do_not_matter() {
        let csv = "Year,Crop_Type,State,Drought_Percentage\n2020,Rice,Kerala,40\n";
        let rows = read_observations_string(csv, b',').unwrap();
        assert_eq!(rows[0].state, "Kerala");
        assert_eq!(rows[0].crop_type, "Rice");
    }

    #[test]
    fn keeps_leading_zeros_and_text_as_is() {
        let csv = "State,Drought_Percentage,Crop_Type\n007,5,Pulses\n";
        let rows = read_observations_string(csv, b',').unwrap();
        assert_eq!(rows[0].state, "007");
    }

    #[test]
    fn custom_delimiter() {
        let csv = "State;Drought_Percentage;Crop_Type\nKerala;40;Rice\n";
        let rows = read_observations_string(csv, b';').unwrap();
        assert_eq!(rows[0].drought_percentage, 40.0);
    }

    #[test]
    fn non_numeric_percentage_names_the_record() {
        let csv = "State,Drought_Percentage,Crop_Type\nKerala,40,Rice\nPunjab,high,Wheat\n";
        match read_observations_string(csv, b',').unwrap_err() {
            DroughtError::DataFormat { record, column, .. } => {
                assert_eq!(record, 2);
                assert_eq!(column, "Drought_Percentage");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_column_is_a_format_error() {
        let csv = "State,Crop_Type\nKerala,Rice\n";
        let err = read_observations_string(csv, b',').unwrap_err();
        assert!(matches!(err, DroughtError::DataFormat { record: 0, ref column, .. } if column == "Drought_Percentage"));
    }

    #[test]
    fn blank_crop_is_rejected() {
        let csv = "State,Drought_Percentage,Crop_Type\nKerala,40,\n";
        let err = read_observations_string(csv, b',').unwrap_err();
        assert!(matches!(err, DroughtError::DataFormat { record: 1, .. }));
    }
}

//! Data Processor Module
//! Handles the wide-to-long reshape (melt) and numeric cleaning of year columns.

use crate::data::RawTable;
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

/// Column name holding the year extracted from `Y<yyyy>` headers.
pub const YEAR_COLUMN: &str = "Year";
/// Default name for the melted value column.
pub const DEFAULT_VALUE_NAME: &str = "Value";

static YEAR_COLUMN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Y([0-9]{4})$").expect("year column pattern is valid"));

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("No year columns (Y followed by four digits) found")]
    NoYearColumns,
    #[error("Identifier column '{0}' not found")]
    MissingIdColumn(String),
    #[error("Identifier column '{0}' collides with an output column")]
    ReservedColumn(String),
}

/// One reshaped observation.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRecord {
    pub identifiers: Vec<(String, Option<String>)>,
    pub year: i32,
    /// `None` when the source cell was not a number.
    pub value: Option<f64>,
}

impl LongRecord {
    pub fn identifier(&self, name: &str) -> Option<&str> {
        self.identifiers
            .iter()
            .find(|(col, _)| col == name)
            .and_then(|(_, v)| v.as_deref())
    }
}

/// Long-format table: identifier columns, `Year` (i32) and a nullable f64 value column.
///
/// Rows are ordered year-column-major: every source row for the first year
/// column, then every source row for the next one.
#[derive(Debug, Clone)]
pub struct LongTable {
    df: DataFrame,
    id_columns: Vec<String>,
    value_name: String,
}

impl LongTable {
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn id_columns(&self) -> &[String] {
        &self.id_columns
    }

    pub fn value_name(&self) -> &str {
        &self.value_name
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// The row at `index`, or `None` past the end.
    pub fn record(&self, index: usize) -> Result<Option<LongRecord>, ProcessorError> {
        if index >= self.height() {
            return Ok(None);
        }
        let row = Self {
            df: self.df.slice(index as i64, 1),
            id_columns: self.id_columns.clone(),
            value_name: self.value_name.clone(),
        };
        Ok(row.records()?.into_iter().next())
    }

    /// Materialize every row as a [`LongRecord`].
    pub fn records(&self) -> Result<Vec<LongRecord>, ProcessorError> {
        let ids = self
            .id_columns
            .iter()
            .map(|name| {
                let col = self.df.column(name)?;
                Ok((name.clone(), col.as_materialized_series().str()?.clone()))
            })
            .collect::<Result<Vec<_>, ProcessorError>>()?;
        let years = self.df.column(YEAR_COLUMN)?.i32()?;
        let values = self.df.column(&self.value_name)?.f64()?;

        let records = (0..self.df.height())
            .map(|i| LongRecord {
                identifiers: ids
                    .iter()
                    .map(|(name, ca)| (name.clone(), ca.get(i).map(str::to_string)))
                    .collect(),
                year: years.get(i).unwrap_or_default(),
                value: values.get(i),
            })
            .collect();
        Ok(records)
    }
}

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Year columns of a header, paired with the year they carry.
    ///
    /// Only names that are exactly `Y` followed by four digits qualify, so
    /// FAOSTAT flag columns like `Y2000F` are left out.
    pub fn year_columns(columns: &[String]) -> Vec<(String, i32)> {
        columns
            .iter()
            .filter_map(|name| {
                let caps = YEAR_COLUMN_PATTERN.captures(name)?;
                let year = caps[1].parse::<i32>().ok()?;
                Some((name.clone(), year))
            })
            .collect()
    }

    /// Parse a cell as a number; anything else is missing.
    pub fn coerce_value(cell: Option<&str>) -> Option<f64> {
        cell.and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| !v.is_nan())
    }

    /// Melt with the default `Value` column name.
    pub fn melt(table: Option<&RawTable>, id_columns: &[&str]) -> Option<LongTable> {
        Self::melt_and_clean(table, id_columns, DEFAULT_VALUE_NAME)
    }

    /// Transform a wide table (one `Y<yyyy>` column per year) to long format.
    ///
    /// Output columns: `[id_columns..., "Year", value_name]`, one row per
    /// (input row, year column). Absent input, no year columns or unknown
    /// identifier columns all give `None`.
    pub fn melt_and_clean(
        table: Option<&RawTable>,
        id_columns: &[&str],
        value_name: &str,
    ) -> Option<LongTable> {
        let table = table?;
        match Self::stack_to_long(table, id_columns, value_name) {
            Ok(long) => {
                debug!(
                    rows = table.height(),
                    records = long.height(),
                    "melted wide table"
                );
                Some(long)
            }
            Err(ProcessorError::NoYearColumns) => {
                debug!("no year columns found, nothing to melt");
                None
            }
            Err(e) => {
                warn!(error = %e, "could not melt table");
                None
            }
        }
    }

    fn stack_to_long(
        table: &RawTable,
        id_columns: &[&str],
        value_name: &str,
    ) -> Result<LongTable, ProcessorError> {
        let df = table.dataframe();
        let year_cols = Self::year_columns(&table.columns());
        if year_cols.is_empty() {
            return Err(ProcessorError::NoYearColumns);
        }

        for &id in id_columns {
            if id == YEAR_COLUMN || id == value_name {
                return Err(ProcessorError::ReservedColumn(id.to_string()));
            }
            if df.column(id).is_err() {
                return Err(ProcessorError::MissingIdColumn(id.to_string()));
            }
        }

        let height = df.height();
        let total = height * year_cols.len();

        // Identifier values, as text, for every source row.
        let id_values = id_columns
            .iter()
            .map(|&id| {
                let text = df.column(id)?.cast(&DataType::String)?;
                let ca = text.as_materialized_series().str()?;
                Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
            })
            .collect::<Result<Vec<Vec<Option<String>>>, ProcessorError>>()?;

        let mut years: Vec<i32> = Vec::with_capacity(total);
        let mut values: Vec<Option<f64>> = Vec::with_capacity(total);

        for (col_name, year) in &year_cols {
            let text = df.column(col_name)?.cast(&DataType::String)?;
            let ca = text.as_materialized_series().str()?;
            for cell in ca.into_iter() {
                years.push(*year);
                values.push(Self::coerce_value(cell));
            }
        }

        let mut columns: Vec<Column> = id_columns
            .iter()
            .zip(id_values.iter())
            .map(|(&id, per_row)| {
                let repeated: Vec<Option<String>> = year_cols
                    .iter()
                    .flat_map(|_| per_row.iter().cloned())
                    .collect();
                Column::new(id.into(), repeated)
            })
            .collect();
        columns.push(Column::new(YEAR_COLUMN.into(), years));
        columns.push(Column::new(value_name.into(), values));

        let df = DataFrame::new(columns)?;

        Ok(LongTable {
            df,
            id_columns: id_columns.iter().map(|s| s.to_string()).collect(),
            value_name: value_name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Delimiter;

    fn raw(df: DataFrame) -> RawTable {
        RawTable::new(df, Delimiter::Comma).unwrap()
    }

    fn wide_table() -> RawTable {
        raw(df!(
            "Area" => &["Kenya", "Peru", "Chad"],
            "Item" => &["Wheat", "Maize", "Rice"],
            "Y2000" => &["1", "2", "n/a"],
            "Y2000F" => &["E", "E", "E"],
            "Y2001" => &["4", "", "6.5"],
            "Note" => &["x", "y", "z"]
        )
        .unwrap())
    }

    #[test]
    fn test_year_columns_exact_pattern() {
        let cols: Vec<String> = ["Y2013", "Year2013", "Y201", "Y20131", "Y2013F", "y2013", "Area"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(
            DataProcessor::year_columns(&cols),
            vec![("Y2013".to_string(), 2013)]
        );
    }

    #[test]
    fn test_coerce_value() {
        assert_eq!(DataProcessor::coerce_value(Some("12.5")), Some(12.5));
        assert_eq!(DataProcessor::coerce_value(Some(" 7 ")), Some(7.0));
        assert_eq!(DataProcessor::coerce_value(Some("n/a")), None);
        assert_eq!(DataProcessor::coerce_value(Some("NaN")), None);
        assert_eq!(DataProcessor::coerce_value(Some("")), None);
        assert_eq!(DataProcessor::coerce_value(None), None);
    }

    #[test]
    fn test_melt_cardinality_and_order() {
        let long = DataProcessor::melt(Some(&wide_table()), &["Area", "Item"]).unwrap();

        // 3 rows x 2 year columns; Y2000F and Note are ignored
        assert_eq!(long.height(), 6);
        assert_eq!(long.id_columns(), &["Area".to_string(), "Item".to_string()]);

        let records = long.records().unwrap();
        let years: Vec<i32> = records.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2000, 2000, 2000, 2001, 2001, 2001]);

        let areas: Vec<&str> = records.iter().filter_map(|r| r.identifier("Area")).collect();
        assert_eq!(areas, vec!["Kenya", "Peru", "Chad", "Kenya", "Peru", "Chad"]);
    }

    #[test]
    fn test_melt_marks_unparseable_values_missing() {
        let long = DataProcessor::melt(Some(&wide_table()), &["Area"]).unwrap();
        let values: Vec<Option<f64>> = long.records().unwrap().iter().map(|r| r.value).collect();

        assert_eq!(
            values,
            vec![Some(1.0), Some(2.0), None, Some(4.0), None, Some(6.5)]
        );
    }

    #[test]
    fn test_melt_custom_value_name() {
        let long =
            DataProcessor::melt_and_clean(Some(&wide_table()), &["Area"], "Production").unwrap();

        assert_eq!(long.value_name(), "Production");
        assert!(long.dataframe().column("Production").is_ok());
        assert_eq!(long.records().unwrap()[0].value, Some(1.0));
    }

    #[test]
    fn test_record_by_index() {
        let table = DataProcessor::melt(Some(&wide_table()), &["Area", "Item"]).unwrap();

        let record = table.record(4).unwrap().unwrap();
        assert_eq!(record.identifier("Area"), Some("Peru"));
        assert_eq!(record.identifier("Item"), Some("Maize"));
        assert_eq!(record.year, 2001);
        assert_eq!(record.value, None);
        assert_eq!(table.record(6).unwrap(), None);
    }

    #[test]
    fn test_melt_header_only_table() {
        let table = DataProcessor::melt(
            Some(&raw(df!(
                "Area" => Vec::<String>::new(),
                "Y2000" => Vec::<String>::new()
            )
            .unwrap())),
            &["Area"],
        )
        .unwrap();

        assert!(table.is_empty());
        assert_eq!(table.record(0).unwrap(), None);
    }

    #[test]
    fn test_melt_absent_input() {
        assert!(DataProcessor::melt(None, &["Area"]).is_none());
    }

    #[test]
    fn test_melt_without_year_columns() {
        let table = raw(df!("Area" => &["Kenya"], "Item" => &["Wheat"]).unwrap());
        assert!(DataProcessor::melt(Some(&table), &["Area"]).is_none());
    }

    #[test]
    fn test_melt_unknown_id_column() {
        assert!(DataProcessor::melt(Some(&wide_table()), &["Area", "Unit"]).is_none());
    }

    #[test]
    fn test_melt_reserved_id_column() {
        assert!(DataProcessor::melt(Some(&wide_table()), &["Value"]).is_none());
    }

    #[test]
    fn test_melt_leaves_input_untouched() {
        let table = wide_table();
        let before = table.dataframe().clone();
        let _ = DataProcessor::melt(Some(&table), &["Area"]);

        assert!(table.dataframe().equals_missing(&before));
    }
}

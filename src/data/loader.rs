//! CSV Data Loader Module
//! Handles CSV file loading with delimiter auto-detection using Polars.

use polars::prelude::*;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Parsed with {delimiter} into a single column")]
    SingleColumn { delimiter: Delimiter },
}

/// Field delimiters tried by the loader, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Semicolon,
    Tab,
}

impl Delimiter {
    pub const CANDIDATES: [Delimiter; 3] = [Delimiter::Comma, Delimiter::Semicolon, Delimiter::Tab];

    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
            Delimiter::Tab => b'\t',
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Delimiter::Comma => "comma",
            Delimiter::Semicolon => "semicolon",
            Delimiter::Tab => "tab",
        };
        f.write_str(name)
    }
}

/// An as-loaded table. Always has at least two columns.
#[derive(Debug, Clone)]
pub struct RawTable {
    df: DataFrame,
    delimiter: Delimiter,
}

impl RawTable {
    /// Wrap a DataFrame, refusing frames with fewer than two columns.
    pub fn new(df: DataFrame, delimiter: Delimiter) -> Option<Self> {
        (df.width() > 1).then_some(Self { df, delimiter })
    }

    pub fn columns(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn width(&self) -> usize {
        self.df.width()
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }
}

/// Loads delimited text files into [`RawTable`]s.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file, trying comma, semicolon and tab in that order.
    ///
    /// The first delimiter that parses cleanly into more than one column wins.
    /// Returns `None` when the file is missing or no delimiter fits; callers
    /// treat that as an ordinary "dataset not available" state.
    pub fn load_csv(path: &Path) -> Option<RawTable> {
        if !path.is_file() {
            warn!(path = %path.display(), "dataset file not found");
            return None;
        }

        let table = Delimiter::CANDIDATES.iter().find_map(|&delimiter| {
            match Self::read_with_delimiter(path, delimiter) {
                Ok(table) => Some(table),
                Err(e) => {
                    debug!(path = %path.display(), %delimiter, error = %e, "delimiter rejected");
                    None
                }
            }
        });

        match &table {
            Some(t) => info!(
                path = %path.display(),
                delimiter = %t.delimiter(),
                rows = t.height(),
                columns = t.width(),
                "loaded CSV"
            ),
            None => warn!(path = %path.display(), "no candidate delimiter produced a table"),
        }
        table
    }

    /// Parse the whole file with one delimiter. Cells are kept as text.
    fn read_with_delimiter(path: &Path, delimiter: Delimiter) -> Result<RawTable, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .map_parse_options(|opts| {
                opts.with_separator(delimiter.as_byte())
                    .with_encoding(CsvEncoding::LossyUtf8)
            })
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;

        RawTable::new(df, delimiter).ok_or(LoaderError::SingleColumn { delimiter })
    }
}

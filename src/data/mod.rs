//! Data module - CSV loading, dataset catalog and reshaping

mod datasets;
mod loader;
mod processor;

pub use datasets::DatasetKind;
pub use loader::{DataLoader, Delimiter, LoaderError, RawTable};
pub use processor::{
    DataProcessor, LongRecord, LongTable, ProcessorError, DEFAULT_VALUE_NAME, YEAR_COLUMN,
};

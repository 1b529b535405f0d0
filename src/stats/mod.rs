//! Stats module - Per-topic aggregation

mod aggregator;

pub use aggregator::{
    livestock_filter, Aggregate, AggregateError, Aggregator, SeriesKey, SeriesPoint, ITEM_COLUMN,
    LIVESTOCK_KEYWORDS,
};

//! Aggregator Module
//! Group-by aggregations over long tables: per-year totals/averages and top-N items.

use crate::data::{LongTable, YEAR_COLUMN};
use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

/// Column holding the crop / livestock item name.
pub const ITEM_COLUMN: &str = "Item";

/// Lower-case substrings that mark an item as a livestock product.
///
/// Each keyword is checked on its own; "chicken" and "poultry" overlap and
/// both stay.
pub const LIVESTOCK_KEYWORDS: [&str; 10] = [
    "cattle", "goat", "sheep", "pig", "buffalo", "chicken", "poultry", "milk", "meat", "egg",
];

const AGG_COLUMN: &str = "__aggregate";
const PRESENT_COLUMN: &str = "__present";

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{0}' not found in long table")]
    MissingColumn(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Sum,
    Mean,
}

impl Aggregate {
    fn expr(self, value: &str) -> Expr {
        match self {
            Aggregate::Sum => col(value).sum(),
            Aggregate::Mean => col(value).mean(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKey {
    Year(i32),
    Item(String),
}

impl SeriesKey {
    pub fn label(&self) -> String {
        match self {
            SeriesKey::Year(year) => year.to_string(),
            SeriesKey::Item(item) => item.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub key: SeriesKey,
    pub value: f64,
}

/// Case-insensitive keyword match on the `Item` column used by the Livestock topic.
///
/// Rows with no item evaluate to null and are dropped by `filter`.
pub fn livestock_filter() -> Expr {
    let item = col(ITEM_COLUMN).str().to_lowercase();
    LIVESTOCK_KEYWORDS.iter().fold(lit(false), |matched, keyword| {
        matched.or(item.clone().str().contains_literal(lit(*keyword)))
    })
}

/// Runs the per-topic aggregations.
///
/// Missing values never take part: groups are reduced over non-missing values
/// only, and a group with no values at all yields no point.
pub struct Aggregator;

impl Aggregator {
    /// Aggregate values per year, ascending by year.
    pub fn by_year(table: &LongTable, aggregate: Aggregate) -> Result<Vec<SeriesPoint>, AggregateError> {
        let value = table.value_name();
        let out = table
            .dataframe()
            .clone()
            .lazy()
            .group_by([col(YEAR_COLUMN)])
            .agg([
                aggregate.expr(value).alias(AGG_COLUMN),
                col(value).is_not_null().sum().alias(PRESENT_COLUMN),
            ])
            .filter(col(PRESENT_COLUMN).gt(lit(0)))
            .sort([YEAR_COLUMN], SortMultipleOptions::default())
            .collect()?;

        let years = out.column(YEAR_COLUMN)?.i32()?;
        let totals = out.column(AGG_COLUMN)?.f64()?;

        Ok(years
            .into_iter()
            .zip(totals.into_iter())
            .filter_map(|(year, total)| {
                Some(SeriesPoint {
                    key: SeriesKey::Year(year?),
                    value: total?,
                })
            })
            .collect())
    }

    /// Items with the largest summed value, descending; ties by item name.
    pub fn top_items(table: &LongTable, limit: usize) -> Result<Vec<SeriesPoint>, AggregateError> {
        let df = table.dataframe();
        Self::require_items(df)?;
        Self::top_items_in(df.clone().lazy(), table.value_name(), limit)
    }

    /// Like [`Aggregator::top_items`], restricted to livestock products.
    pub fn top_livestock(table: &LongTable, limit: usize) -> Result<Vec<SeriesPoint>, AggregateError> {
        let df = table.dataframe();
        Self::require_items(df)?;
        let livestock = df.clone().lazy().filter(livestock_filter());

        Self::top_items_in(livestock, table.value_name(), limit)
    }

    fn require_items(df: &DataFrame) -> Result<(), AggregateError> {
        df.column(ITEM_COLUMN)
            .map(|_| ())
            .map_err(|_| AggregateError::MissingColumn(ITEM_COLUMN.to_string()))
    }

    fn top_items_in(lf: LazyFrame, value: &str, limit: usize) -> Result<Vec<SeriesPoint>, AggregateError> {
        let out = lf
            .filter(col(ITEM_COLUMN).is_not_null())
            .group_by([col(ITEM_COLUMN)])
            .agg([
                col(value).sum().alias(AGG_COLUMN),
                col(value).is_not_null().sum().alias(PRESENT_COLUMN),
            ])
            .filter(col(PRESENT_COLUMN).gt(lit(0)))
            .sort(
                [AGG_COLUMN, ITEM_COLUMN],
                SortMultipleOptions::default().with_order_descending_multi([true, false]),
            )
            .limit(limit as IdxSize)
            .collect()?;

        let items = out.column(ITEM_COLUMN)?.as_materialized_series().str()?;
        let totals = out.column(AGG_COLUMN)?.f64()?;

        Ok(items
            .into_iter()
            .zip(totals.into_iter())
            .filter_map(|(item, total)| {
                Some(SeriesPoint {
                    key: SeriesKey::Item(item?.to_string()),
                    value: total?,
                })
            })
            .collect())
    }
}

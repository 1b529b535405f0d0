//! Dashboard context and per-topic controller.
//!
//! The four datasets are loaded and melted once into a [`Dashboard`]; after
//! that the dashboard is read-only and every topic selection is answered by
//! [`Dashboard::view`].

use crate::charts::ChartSpec;
use crate::config::DashboardConfig;
use crate::data::{DataLoader, DataProcessor, DatasetKind, LongTable};
use crate::stats::{Aggregate, AggregateError, Aggregator, SeriesPoint};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, error, info, info_span, warn};

/// Number of entries shown by the Crops and Livestock charts.
pub const TOP_N: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    LandUse,
    Temperature,
    Emissions,
    Crops,
    Livestock,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::LandUse,
        Topic::Temperature,
        Topic::Emissions,
        Topic::Crops,
        Topic::Livestock,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Topic::LandUse => "Land Use",
            Topic::Temperature => "Temperature",
            Topic::Emissions => "Emissions",
            Topic::Crops => "Crops",
            Topic::Livestock => "Livestock",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Topic::LandUse => "🌱 Land Use Trends",
            Topic::Temperature => "🌡️ Temperature Change on Land",
            Topic::Emissions => "💨 Emissions Over Time",
            Topic::Crops => "🌾 Top Crops by Production",
            Topic::Livestock => "🐄 Livestock Trends",
        }
    }

    pub fn unavailable_notice(self) -> &'static str {
        match self {
            Topic::LandUse => "Landuse dataset not available.",
            Topic::Temperature => "Temperature dataset not available.",
            Topic::Emissions => "Emissions dataset not available.",
            Topic::Crops => "Crops dataset not available.",
            Topic::Livestock => "Livestock dataset not available.",
        }
    }

    /// Base name used for exported files.
    pub fn file_stem(self) -> &'static str {
        match self {
            Topic::LandUse => "land_use",
            Topic::Temperature => "temperature",
            Topic::Emissions => "emissions",
            Topic::Crops => "crops",
            Topic::Livestock => "livestock",
        }
    }

    pub fn dataset(self) -> DatasetKind {
        match self {
            Topic::LandUse => DatasetKind::LandUse,
            Topic::Temperature => DatasetKind::Temperature,
            Topic::Emissions => DatasetKind::Emissions,
            Topic::Crops | Topic::Livestock => DatasetKind::CropsLivestock,
        }
    }
}

/// What the presentation layer should show for a topic.
#[derive(Debug, Clone, PartialEq)]
pub enum TopicView {
    Chart(ChartSpec),
    Unavailable(&'static str),
}

/// Load outcome of one dataset, for status display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetStatus {
    pub kind: DatasetKind,
    /// Long-format record count, `None` when the dataset is not available.
    pub records: Option<usize>,
}

/// Read-only holder of the melted datasets.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    land_use: Option<LongTable>,
    temperature: Option<LongTable>,
    emissions: Option<LongTable>,
    crops_livestock: Option<LongTable>,
}

impl Dashboard {
    pub fn from_tables(
        land_use: Option<LongTable>,
        temperature: Option<LongTable>,
        emissions: Option<LongTable>,
        crops_livestock: Option<LongTable>,
    ) -> Self {
        Self {
            land_use,
            temperature,
            emissions,
            crops_livestock,
        }
    }

    /// Load and melt every dataset named by the config.
    ///
    /// The pipelines are independent, so they run on the rayon pool.
    pub fn load(config: &DashboardConfig) -> Self {
        let loaded: Vec<(DatasetKind, Option<LongTable>)> = DatasetKind::ALL
            .par_iter()
            .map(|&kind| (kind, Self::load_dataset(config, kind)))
            .collect();

        let mut dashboard = Self::default();
        for (kind, table) in loaded {
            *dashboard.slot_mut(kind) = table;
        }
        dashboard
    }

    fn load_dataset(config: &DashboardConfig, kind: DatasetKind) -> Option<LongTable> {
        let _span = info_span!("dataset", name = kind.label()).entered();
        let path = config.dataset_path(kind);

        let raw = DataLoader::load_csv(&path);
        let long = DataProcessor::melt(raw.as_ref(), kind.id_columns());

        match &long {
            Some(table) if table.is_empty() => {
                warn!(path = %path.display(), "dataset has no rows, charts will be empty")
            }
            Some(table) => {
                info!(records = table.height(), "dataset ready");
                if let Ok(Some(first)) = table.record(0) {
                    debug!(?first, "first record");
                }
            }
            None => warn!(path = %path.display(), "dataset not available"),
        }
        long
    }

    fn slot_mut(&mut self, kind: DatasetKind) -> &mut Option<LongTable> {
        match kind {
            DatasetKind::LandUse => &mut self.land_use,
            DatasetKind::Temperature => &mut self.temperature,
            DatasetKind::Emissions => &mut self.emissions,
            DatasetKind::CropsLivestock => &mut self.crops_livestock,
        }
    }

    pub fn table(&self, kind: DatasetKind) -> Option<&LongTable> {
        match kind {
            DatasetKind::LandUse => self.land_use.as_ref(),
            DatasetKind::Temperature => self.temperature.as_ref(),
            DatasetKind::Emissions => self.emissions.as_ref(),
            DatasetKind::CropsLivestock => self.crops_livestock.as_ref(),
        }
    }

    pub fn availability(&self) -> Vec<DatasetStatus> {
        DatasetKind::ALL
            .iter()
            .map(|&kind| DatasetStatus {
                kind,
                records: self.table(kind).map(LongTable::height),
            })
            .collect()
    }

    /// Aggregate the topic's dataset into a chart, or explain why there is none.
    pub fn view(&self, topic: Topic) -> TopicView {
        let Some(table) = self.table(topic.dataset()) else {
            return TopicView::Unavailable(topic.unavailable_notice());
        };

        match Self::aggregate(topic, table) {
            Ok(points) => TopicView::Chart(ChartSpec::for_topic(topic, points)),
            Err(e) => {
                error!(topic = topic.label(), error = %e, "aggregation failed");
                TopicView::Unavailable(topic.unavailable_notice())
            }
        }
    }

    fn aggregate(topic: Topic, table: &LongTable) -> Result<Vec<SeriesPoint>, AggregateError> {
        match topic {
            Topic::LandUse | Topic::Emissions => Aggregator::by_year(table, Aggregate::Sum),
            Topic::Temperature => Aggregator::by_year(table, Aggregate::Mean),
            Topic::Crops => Aggregator::top_items(table, TOP_N),
            Topic::Livestock => Aggregator::top_livestock(table, TOP_N),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;
    use crate::data::{Delimiter, RawTable};
    use crate::stats::SeriesKey;
    use polars::prelude::*;

    fn long(df: DataFrame, ids: &[&str]) -> LongTable {
        let raw = RawTable::new(df, Delimiter::Comma).unwrap();
        DataProcessor::melt(Some(&raw), ids).unwrap()
    }

    fn crops() -> LongTable {
        long(
            df!(
                "Item" => &["Wheat", "Chicken, whole", "Goat meat"],
                "Y2000" => &["100", "5", "7"]
            )
            .unwrap(),
            &["Item"],
        )
    }

    fn temperature() -> LongTable {
        long(
            df!(
                "Months" => &["Jan", "Feb"],
                "Y2000" => &["0.5", "1.5"],
                "Y2001" => &["n/a", "2.0"]
            )
            .unwrap(),
            &["Months"],
        )
    }

    #[test]
    fn test_absent_dataset_gives_notice() {
        let dashboard = Dashboard::from_tables(None, None, None, None);

        for topic in Topic::ALL {
            assert_eq!(
                dashboard.view(topic),
                TopicView::Unavailable(topic.unavailable_notice())
            );
        }
    }

    #[test]
    fn test_other_topics_unaffected_by_absent_dataset() {
        let dashboard = Dashboard::from_tables(None, Some(temperature()), None, Some(crops()));

        assert!(matches!(dashboard.view(Topic::LandUse), TopicView::Unavailable(_)));
        assert!(matches!(dashboard.view(Topic::Temperature), TopicView::Chart(_)));
        assert!(matches!(dashboard.view(Topic::Crops), TopicView::Chart(_)));
    }

    #[test]
    fn test_temperature_is_yearly_mean_line() {
        let dashboard = Dashboard::from_tables(None, Some(temperature()), None, None);
        let TopicView::Chart(spec) = dashboard.view(Topic::Temperature) else {
            panic!("expected chart");
        };

        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.year_points(), vec![(2000, 1.0), (2001, 2.0)]);
    }

    #[test]
    fn test_livestock_uses_crops_dataset() {
        let dashboard = Dashboard::from_tables(None, None, None, Some(crops()));
        let TopicView::Chart(spec) = dashboard.view(Topic::Livestock) else {
            panic!("expected chart");
        };

        assert_eq!(spec.title, "Top 10 Livestock Products");
        assert_eq!(
            spec.points.iter().map(|p| p.key.clone()).collect::<Vec<_>>(),
            vec![
                SeriesKey::Item("Goat meat".into()),
                SeriesKey::Item("Chicken, whole".into())
            ]
        );
    }

    #[test]
    fn test_aggregation_failure_degrades_to_notice() {
        // Temperature-shaped table behind the crops slot has no Item column
        let dashboard = Dashboard::from_tables(None, None, None, Some(temperature()));

        assert_eq!(
            dashboard.view(Topic::Crops),
            TopicView::Unavailable("Crops dataset not available.")
        );
    }

    #[test]
    fn test_availability() {
        let dashboard = Dashboard::from_tables(None, Some(temperature()), None, None);
        let status = dashboard.availability();

        assert_eq!(status.len(), 4);
        assert_eq!(status[0].records, None);
        assert_eq!(status[1].kind, DatasetKind::Temperature);
        assert_eq!(status[1].records, Some(4));
    }
}

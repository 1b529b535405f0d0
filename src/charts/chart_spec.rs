//! Chart descriptions handed to the renderers.

use crate::dashboard::Topic;
use crate::stats::{SeriesKey, SeriesPoint};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ChartColor {
    pub const BLUE: ChartColor = ChartColor::rgb(31, 119, 180);
    pub const ORANGE: ChartColor = ChartColor::rgb(255, 165, 0);
    pub const GREEN: ChartColor = ChartColor::rgb(0, 128, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Everything a renderer needs to draw one topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub topic: Topic,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub kind: ChartKind,
    pub color: ChartColor,
    pub points: Vec<SeriesPoint>,
}

impl ChartSpec {
    pub fn for_topic(topic: Topic, points: Vec<SeriesPoint>) -> Self {
        let (title, x_label, y_label, kind, color) = match topic {
            Topic::LandUse => (
                "Land Use (2000–2023)",
                "Year",
                "Total Landuse",
                ChartKind::Line,
                ChartColor::BLUE,
            ),
            Topic::Temperature => (
                "Temperature Change (2000–2023)",
                "Year",
                "Avg Temperature Change (°C)",
                ChartKind::Line,
                ChartColor::ORANGE,
            ),
            Topic::Emissions => (
                "Total Emissions (2000–2022)",
                "Year",
                "Emissions",
                ChartKind::Bar,
                ChartColor::BLUE,
            ),
            Topic::Crops => (
                "Top 10 Crops",
                "Crop",
                "Production",
                ChartKind::Bar,
                ChartColor::BLUE,
            ),
            Topic::Livestock => (
                "Top 10 Livestock Products",
                "Livestock",
                "Production",
                ChartKind::Bar,
                ChartColor::GREEN,
            ),
        };

        Self {
            topic,
            title,
            x_label,
            y_label,
            kind,
            color,
            points,
        }
    }

    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.key.label()).collect()
    }

    /// `(year, value)` pairs; item-keyed points are skipped.
    pub fn year_points(&self) -> Vec<(i32, f64)> {
        self.points
            .iter()
            .filter_map(|p| match p.key {
                SeriesKey::Year(year) => Some((year, p.value)),
                SeriesKey::Item(_) => None,
            })
            .collect()
    }

    /// Value range padded for plotting, always including zero for bar charts.
    pub fn value_range(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for p in &self.points {
            min = min.min(p.value);
            max = max.max(p.value);
        }
        if min.is_infinite() {
            return (0.0, 1.0);
        }
        if self.kind == ChartKind::Bar {
            min = min.min(0.0);
            max = max.max(0.0);
        }
        let pad = if max > min { (max - min) * 0.1 } else { max.abs().max(1.0) * 0.1 };
        let low = if self.kind == ChartKind::Bar && min >= 0.0 { 0.0 } else { min - pad };
        (low, max + pad)
    }
}

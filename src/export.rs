//! Headless export: every topic rendered to PNG plus a JSON summary.

use crate::charts::{RenderError, StaticChartRenderer};
use crate::config::ExportConfig;
use crate::dashboard::{Dashboard, DatasetStatus, Topic, TopicView};
use crate::stats::SeriesPoint;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TopicOutcome {
    Rendered {
        file: String,
        title: String,
        points: Vec<SeriesPoint>,
    },
    Unavailable {
        notice: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicEntry {
    pub topic: Topic,
    #[serde(flatten)]
    pub outcome: TopicOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSummary {
    pub datasets: Vec<DatasetStatus>,
    pub topics: Vec<TopicEntry>,
}

impl TopicEntry {
    fn from_view(topic: Topic, view: &TopicView) -> Self {
        let outcome = match view {
            TopicView::Chart(spec) => TopicOutcome::Rendered {
                file: png_name(topic),
                title: spec.title.to_string(),
                points: spec.points.clone(),
            },
            TopicView::Unavailable(notice) => TopicOutcome::Unavailable {
                notice: notice.to_string(),
            },
        };
        Self { topic, outcome }
    }
}

impl ExportSummary {
    /// Summary of what an export of `dashboard` produces, without rendering.
    pub fn plan(dashboard: &Dashboard) -> Self {
        let topics = Topic::ALL
            .iter()
            .map(|&topic| TopicEntry::from_view(topic, &dashboard.view(topic)))
            .collect();

        Self {
            datasets: dashboard.availability(),
            topics,
        }
    }

    pub fn rendered_count(&self) -> usize {
        self.topics
            .iter()
            .filter(|t| matches!(t.outcome, TopicOutcome::Rendered { .. }))
            .count()
    }

    pub fn write_json(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(SUMMARY_FILE);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

fn png_name(topic: Topic) -> String {
    format!("{}.png", topic.file_stem())
}

/// Render every available topic into `out_dir` and write the summary.
///
/// Topics are rendered in [`Topic::ALL`] order. The first rendering failure
/// aborts the export: PNGs written before it stay on disk and `summary.json`
/// is not written.
pub fn export_all(
    dashboard: &Dashboard,
    out_dir: &Path,
    size: ExportConfig,
) -> Result<ExportSummary, ExportError> {
    fs::create_dir_all(out_dir).map_err(|source| ExportError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut topics = Vec::with_capacity(Topic::ALL.len());
    for topic in Topic::ALL {
        let view = dashboard.view(topic);
        match &view {
            TopicView::Chart(spec) => {
                let path = out_dir.join(png_name(topic));
                if let Err(err) = StaticChartRenderer::render_png(spec, &path, size.width, size.height) {
                    error!(
                        topic = topic.label(),
                        error = %err,
                        "rendering failed, export aborted without {SUMMARY_FILE}"
                    );
                    return Err(err.into());
                }
                info!(topic = topic.label(), path = %path.display(), "rendered chart");
            }
            TopicView::Unavailable(notice) => warn!(topic = topic.label(), notice, "topic skipped"),
        }
        topics.push(TopicEntry::from_view(topic, &view));
    }

    let summary = ExportSummary {
        datasets: dashboard.availability(),
        topics,
    };
    let path = summary.write_json(out_dir)?;
    info!(
        path = %path.display(),
        rendered = summary.rendered_count(),
        "export complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataProcessor, Delimiter, RawTable};
    use polars::prelude::*;

    fn dashboard_with_land_use() -> Dashboard {
        let raw = RawTable::new(
            df!("Area" => &["Kenya", "Peru"], "Y2000" => &["1", "2"]).unwrap(),
            Delimiter::Comma,
        )
        .unwrap();
        let land_use = DataProcessor::melt(Some(&raw), &["Area"]);
        Dashboard::from_tables(land_use, None, None, None)
    }

    #[test]
    fn test_plan_lists_every_topic() {
        let summary = ExportSummary::plan(&dashboard_with_land_use());

        assert_eq!(summary.topics.len(), 5);
        assert_eq!(summary.rendered_count(), 1);
        assert!(matches!(
            &summary.topics[0].outcome,
            TopicOutcome::Rendered { file, .. } if file == "land_use.png"
        ));
        assert_eq!(
            summary.topics[4].outcome,
            TopicOutcome::Unavailable {
                notice: "Livestock dataset not available.".into()
            }
        );
    }

    #[test]
    fn test_summary_json() {
        let dir = tempfile::tempdir().unwrap();
        let summary = ExportSummary::plan(&dashboard_with_land_use());
        let path = summary.write_json(dir.path()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["topics"][0]["topic"], "land_use");
        assert_eq!(json["topics"][0]["status"], "rendered");
        assert_eq!(json["topics"][0]["points"][0]["key"]["year"], 2000);
        assert_eq!(json["topics"][0]["points"][0]["value"], 3.0);
        assert_eq!(json["topics"][1]["status"], "unavailable");
        assert_eq!(json["datasets"][0]["records"], 2);
    }

    #[test]
    fn test_export_without_datasets() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("charts");
        let dashboard = Dashboard::from_tables(None, None, None, None);

        let summary = export_all(&dashboard, &out, ExportConfig::default()).unwrap();

        assert_eq!(summary.rendered_count(), 0);
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join(SUMMARY_FILE)).unwrap()).unwrap();
        let topics = json["topics"].as_array().unwrap();
        assert_eq!(topics.len(), 5);
        assert!(topics.iter().all(|t| t["status"] == "unavailable"));

        let pngs = fs::read_dir(&out)
            .unwrap()
            .filter(|entry| {
                entry.as_ref().unwrap().path().extension().is_some_and(|ext| ext == "png")
            })
            .count();
        assert_eq!(pngs, 0);
    }

    #[test]
    fn test_export_renders_available_topic() {
        let dir = tempfile::tempdir().unwrap();
        let summary =
            export_all(&dashboard_with_land_use(), dir.path(), ExportConfig::default()).unwrap();

        assert_eq!(summary.rendered_count(), 1);
        let png = fs::metadata(dir.path().join("land_use.png")).unwrap();
        assert!(png.len() > 0);
        assert!(!dir.path().join("crops.png").exists());
        assert!(dir.path().join(SUMMARY_FILE).exists());
    }
}

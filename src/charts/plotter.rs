//! Chart Plotter Module
//! Draws interactive topic charts using egui_plot.

use crate::charts::{ChartColor, ChartKind, ChartSpec};
use egui::Color32;
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};

const CHART_HEIGHT: f32 = 420.0;
/// Longest item label drawn under a bar before it is shortened.
const MAX_BAR_LABEL: usize = 16;

pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color32(color: ChartColor) -> Color32 {
        Color32::from_rgb(color.r, color.g, color.b)
    }

    /// Shorten a bar label to fit under its bar.
    pub fn short_label(label: &str) -> String {
        if label.chars().count() <= MAX_BAR_LABEL {
            label.to_string()
        } else {
            let head: String = label.chars().take(MAX_BAR_LABEL - 1).collect();
            format!("{head}…")
        }
    }

    pub fn draw_chart(ui: &mut egui::Ui, spec: &ChartSpec) {
        match spec.kind {
            ChartKind::Line => Self::draw_line_chart(ui, spec),
            ChartKind::Bar => Self::draw_bar_chart(ui, spec),
        }
    }

    /// Yearly series as a line with a marker on every point.
    fn draw_line_chart(ui: &mut egui::Ui, spec: &ChartSpec) {
        let color = Self::color32(spec.color);
        let points: Vec<[f64; 2]> = spec
            .year_points()
            .into_iter()
            .map(|(year, value)| [year as f64, value])
            .collect();

        Plot::new(format!("line_{}", spec.topic.file_stem()))
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(spec.x_label)
            .y_axis_label(spec.y_label)
            .x_axis_formatter(|mark, _range| {
                if mark.value.fract() == 0.0 {
                    format!("{:.0}", mark.value)
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(color)
                        .width(2.0)
                        .name(spec.y_label),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(4.0)
                        .color(color),
                );
            });
    }

    /// One bar per point, labelled by year or item on the x axis.
    fn draw_bar_chart(ui: &mut egui::Ui, spec: &ChartSpec) {
        let color = Self::color32(spec.color);
        let labels = spec.labels();
        let count = labels.len();

        let bars: Vec<Bar> = spec
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                Bar::new(i as f64, p.value)
                    .width(0.6)
                    .name(p.key.label())
                    .fill(color)
            })
            .collect();

        let axis_labels: Vec<String> = labels.iter().map(|l| Self::short_label(l)).collect();

        Plot::new(format!("bar_{}", spec.topic.file_stem()))
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(spec.x_label)
            .y_axis_label(spec.y_label)
            .include_y(0.0)
            .x_grid_spacer(move |_input| {
                (0..count)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (idx as usize) < axis_labels.len() {
                    axis_labels[idx as usize].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(color).name(spec.y_label));
            });
    }
}

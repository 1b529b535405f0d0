//! Static Chart Renderer
//! Renders a [`ChartSpec`] to a PNG file with plotters.
//!
//! Layout mirrors the interactive chart: caption on top, value axis on the
//! left, years or item names along the bottom.

use crate::charts::{ChartColor, ChartKind, ChartPlotter, ChartSpec};
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart {path}: {message}")]
    Draw { path: String, message: String },
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the chart to `path` as a `width` x `height` PNG.
    pub fn render_png(
        spec: &ChartSpec,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let draw_err = |e: &dyn std::fmt::Display| RenderError::Draw {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| draw_err(&e))?;

        match spec.kind {
            ChartKind::Line => Self::draw_line(&root, spec).map_err(|e| draw_err(&e))?,
            ChartKind::Bar => Self::draw_bars(&root, spec).map_err(|e| draw_err(&e))?,
        }

        root.present().map_err(|e| draw_err(&e))?;
        Ok(())
    }

    fn rgb(color: ChartColor) -> RGBColor {
        RGBColor(color.r, color.g, color.b)
    }

    fn draw_line<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        spec: &ChartSpec,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let points = spec.year_points();
        let first = points.iter().map(|(y, _)| *y).min().unwrap_or(2000);
        let last = points.iter().map(|(y, _)| *y).max().unwrap_or(first);
        let (y_min, y_max) = spec.value_range();
        let color = Self::rgb(spec.color);

        let mut chart = ChartBuilder::on(root)
            .caption(spec.title, (FONT, 24))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(80)
            .build_cartesian_2d(first..last.max(first + 1), y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc(spec.x_label)
            .y_desc(spec.y_label)
            .x_label_formatter(&|year| year.to_string())
            .draw()?;

        chart.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?;
        chart.draw_series(
            points
                .iter()
                .map(|&(year, value)| Circle::new((year, value), 4, color.filled())),
        )?;
        Ok(())
    }

    fn draw_bars<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        spec: &ChartSpec,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let labels: Vec<String> = spec
            .labels()
            .iter()
            .map(|l| ChartPlotter::short_label(l))
            .collect();
        let count = labels.len().max(1) as u32;
        let (y_min, y_max) = spec.value_range();
        let color = Self::rgb(spec.color);

        let mut chart = ChartBuilder::on(root)
            .caption(spec.title, (FONT, 24))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d((0..count).into_segmented(), y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(spec.x_label)
            .y_desc(spec.y_label)
            .x_labels(labels.len().max(1))
            .x_label_formatter(&|segment| match segment {
                SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(color.filled())
                .margin(8)
                .data(
                    spec.points
                        .iter()
                        .enumerate()
                        .map(|(i, p)| (i as u32, p.value)),
                ),
        )?;
        Ok(())
    }
}

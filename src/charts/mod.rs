//! Charts module - Chart descriptions and rendering

mod chart_spec;
mod plotter;
mod renderer;

pub use chart_spec::{ChartColor, ChartKind, ChartSpec};
pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};

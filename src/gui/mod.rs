//! GUI module - egui components

mod app;
mod chart_viewer;
mod nav_panel;

pub use app::{DashboardApp, APP_TITLE};
pub use chart_viewer::ChartViewer;
pub use nav_panel::{NavPanel, NavPanelAction};

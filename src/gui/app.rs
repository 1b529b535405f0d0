//! Smart Agro Assistant Main Application
//! Main window with navigation sidebar and chart viewer.

use crate::dashboard::Dashboard;
use crate::gui::{ChartViewer, NavPanel, NavPanelAction};
use egui::{RichText, SidePanel};
use tracing::debug;

pub const APP_TITLE: &str = "Smart Agro Assistant Dashboard";

/// Main application window.
pub struct DashboardApp {
    dashboard: Dashboard,
    nav_panel: NavPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, dashboard: Dashboard) -> Self {
        let nav_panel = NavPanel::new(dashboard.availability());
        let topic = nav_panel.selected;
        let chart_viewer = ChartViewer::new(topic, dashboard.view(topic));

        Self {
            dashboard,
            nav_panel,
            chart_viewer,
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Navigation
        SidePanel::left("nav_panel")
            .min_width(220.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if let NavPanelAction::TopicChanged(topic) = self.nav_panel.show(ui) {
                        debug!(topic = topic.label(), "topic selected");
                        self.chart_viewer.set_view(topic, self.dashboard.view(topic));
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(RichText::new(format!("🌾 {APP_TITLE}")).size(26.0).strong());
            ui.add_space(12.0);
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.chart_viewer.show(ui);
            });
        });
    }
}

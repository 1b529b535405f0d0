//! Navigation Panel Widget
//! Left side panel with the topic selector and dataset status.

use crate::dashboard::{DatasetStatus, Topic};
use egui::{Color32, RichText};

const LOADED_COLOR: Color32 = Color32::from_rgb(40, 167, 69);
const MISSING_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// Sidebar with one radio entry per topic.
pub struct NavPanel {
    pub selected: Topic,
    pub datasets: Vec<DatasetStatus>,
}

impl NavPanel {
    pub fn new(datasets: Vec<DatasetStatus>) -> Self {
        Self {
            selected: Topic::LandUse,
            datasets,
        }
    }

    /// Draw the panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> NavPanelAction {
        let mut action = NavPanelAction::None;

        ui.add_space(5.0);
        ui.label(RichText::new("📊 Navigation").size(20.0).strong());
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Topic Section =====
        ui.label(RichText::new("Go to:").size(14.0));
        ui.add_space(5.0);

        for topic in Topic::ALL {
            if ui
                .radio_value(&mut self.selected, topic, topic.label())
                .changed()
            {
                action = NavPanelAction::TopicChanged(topic);
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Dataset Section =====
        ui.label(RichText::new("📁 Datasets").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                for status in &self.datasets {
                    let (text, color) = match status.records {
                        Some(records) => (format!("✓ {} ({} records)", status.kind.label(), records), LOADED_COLOR),
                        None => (format!("✗ {} (not available)", status.kind.label()), MISSING_COLOR),
                    };
                    ui.label(RichText::new(text).size(12.0).color(color));
                }
            });

        action
    }
}

/// Actions triggered by the navigation panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPanelAction {
    None,
    TopicChanged(Topic),
}

//! Chart Viewer Widget
//! Central panel showing the selected topic's chart or its unavailable notice.

use crate::charts::ChartPlotter;
use crate::dashboard::{Topic, TopicView};
use egui::{Color32, RichText};

const WARNING_TEXT: Color32 = Color32::from_rgb(133, 100, 4);
const WARNING_FILL: Color32 = Color32::from_rgb(255, 243, 205);

/// Holds the view computed for the current selection.
pub struct ChartViewer {
    pub topic: Topic,
    pub view: TopicView,
}

impl ChartViewer {
    pub fn new(topic: Topic, view: TopicView) -> Self {
        Self { topic, view }
    }

    pub fn set_view(&mut self, topic: Topic, view: TopicView) {
        self.topic = topic;
        self.view = view;
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ui.label(RichText::new(self.topic.heading()).size(20.0).strong());
        ui.add_space(10.0);

        match &self.view {
            TopicView::Chart(spec) => {
                ui.label(RichText::new(spec.title).size(16.0));
                ui.add_space(6.0);
                if spec.points.is_empty() {
                    ui.label(RichText::new("No values to plot").color(Color32::GRAY));
                }
                ChartPlotter::draw_chart(ui, spec);
            }
            TopicView::Unavailable(notice) => {
                egui::Frame::none()
                    .fill(WARNING_FILL)
                    .rounding(5.0)
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        ui.label(RichText::new(format!("⚠ {notice}")).size(14.0).color(WARNING_TEXT));
                    });
            }
        }
    }
}

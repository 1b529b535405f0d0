//! Smart Agro Assistant Dashboard
//!
//! Loads FAOSTAT wide-format CSV exports, melts them to one row per
//! entity-year, and charts one aggregate per topic.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod export;
pub mod gui;
pub mod logging;
pub mod stats;

pub use config::DashboardConfig;
pub use dashboard::{Dashboard, Topic, TopicView};

//! Smart Agro Assistant Dashboard - FAOSTAT statistics viewer
//!
//! Opens the dashboard window, or renders every topic to PNG with `--export`.

use agro_dashboard::export::export_all;
use agro_dashboard::gui::{DashboardApp, APP_TITLE};
use agro_dashboard::logging::{init_logging, LogConfig, LogFormat};
use agro_dashboard::{Dashboard, DashboardConfig};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use eframe::egui;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "agro_dashboard", version, about = "FAOSTAT agricultural statistics dashboard")]
struct Cli {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the FAOSTAT CSV files (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Render every topic to PNG in this directory instead of opening a window
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    log_format: LogFormatArg,

    /// Disable ANSI colors in log output
    #[arg(long)]
    no_color: bool,
}

/// CLI log format choices.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Compact,
}

fn log_config(cli: &Cli) -> LogConfig {
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
    };
    LogConfig::from_verbosity(cli.verbose)
        .with_format(format)
        .with_ansi(!cli.no_color)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&log_config(&cli)).context("failed to initialise logging")?;

    let config = DashboardConfig::resolve(cli.config.as_deref(), cli.data_dir)?;
    info!(data_dir = %config.data_dir.display(), "loading datasets");
    let dashboard = Dashboard::load(&config);

    if let Some(out_dir) = cli.export {
        let summary = export_all(&dashboard, &out_dir, config.export)?;
        info!(rendered = summary.rendered_count(), "done");
        return Ok(());
    }

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([900.0, 600.0])
            .with_title(APP_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, dashboard)))),
    )
    .map_err(|e| anyhow!("failed to start window: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_config() {
        let cli = Cli::try_parse_from(["agro_dashboard"]).unwrap();
        let config = log_config(&cli);

        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.with_ansi);
    }

    #[test]
    fn test_log_format_flags() {
        let cli =
            Cli::try_parse_from(["agro_dashboard", "-v", "--log-format", "compact", "--no-color"])
                .unwrap();
        let config = log_config(&cli);

        assert_eq!(config.format, LogFormat::Compact);
        assert!(!config.with_ansi);
        assert_eq!(config.level, tracing::Level::DEBUG);
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        assert!(Cli::try_parse_from(["agro_dashboard", "--log-format", "json"]).is_err());
    }
}

//! Dashboard configuration.
//!
//! Every field has a default, so a config file only needs the keys it wants to
//! change. The CLI `--data-dir` flag overrides `data_dir` after loading.

use crate::data::DatasetKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// File name of each dataset, relative to `data_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetFiles {
    pub land_use: String,
    pub temperature: String,
    pub emissions: String,
    pub crops_livestock: String,
}

impl Default for DatasetFiles {
    fn default() -> Self {
        Self {
            land_use: DatasetKind::LandUse.default_file_name().to_string(),
            temperature: DatasetKind::Temperature.default_file_name().to_string(),
            emissions: DatasetKind::Emissions.default_file_name().to_string(),
            crops_livestock: DatasetKind::CropsLivestock.default_file_name().to_string(),
        }
    }
}

impl DatasetFiles {
    pub fn file_name(&self, kind: DatasetKind) -> &str {
        match kind {
            DatasetKind::LandUse => &self.land_use,
            DatasetKind::Temperature => &self.temperature,
            DatasetKind::Emissions => &self.emissions,
            DatasetKind::CropsLivestock => &self.crops_livestock,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 750.0,
        }
    }
}

/// Size of charts rendered by `--export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        // 8x5 inch figure at 100 DPI
        Self {
            width: 800,
            height: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub files: DatasetFiles,
    pub window: WindowConfig,
    pub export: ExportConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("Dataset"),
            files: DatasetFiles::default(),
            window: WindowConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Config file (or defaults) with the CLI data directory applied on top.
    pub fn resolve(path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        if let Some(dir) = data_dir {
            config.data_dir = dir;
        }
        Ok(config)
    }

    pub fn dataset_path(&self, kind: DatasetKind) -> PathBuf {
        self.data_dir.join(self.files.file_name(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(
            config.dataset_path(DatasetKind::Emissions),
            PathBuf::from("Dataset").join("Faostat Emissions Total (2000-2022).csv")
        );
        assert_eq!(config.export, ExportConfig { width: 800, height: 500 });
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = create_temp_json(r#"{"data_dir": "/srv/fao", "files": {"temperature": "temp.csv"}}"#);
        let config = DashboardConfig::load(file.path()).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/fao"));
        assert_eq!(config.files.temperature, "temp.csv");
        assert_eq!(
            config.files.land_use,
            DatasetKind::LandUse.default_file_name()
        );
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_cli_data_dir_overrides_file() {
        let file = create_temp_json(r#"{"data_dir": "/srv/fao"}"#);
        let config =
            DashboardConfig::resolve(Some(file.path()), Some(PathBuf::from("local"))).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("local"));
    }

    #[test]
    fn test_malformed_json() {
        let file = create_temp_json("{ data_dir: ");
        let result = DashboardConfig::load(file.path());

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = DashboardConfig::load(&dir.path().join("absent.json"));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}

// Dashboard settings, loaded from the embedded default.json or a user file
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DashboardSettings {
    /// Dataset shown at startup and on "restore". Relative to the working directory.
    pub default_dataset_path: PathBuf,
    /// How many companies the ranking keeps when the caller asks for 0.
    pub top_n: usize,
    pub export_file_name: String,
    /// Grouping label for rows whose company name is empty.
    pub empty_company_label: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        // Same values as assets/config/default.json
        DashboardSettings {
            default_dataset_path: PathBuf::from("data/dados.csv"),
            top_n: 12,
            export_file_name: "dados-normalizados.csv".to_string(),
            empty_company_label: "—".to_string(),
        }
    }
}

impl DashboardSettings {
    pub fn load_default() -> EngineResult<Self> {
        let config_str = include_str!("../../assets/config/default.json");
        Self::from_json(config_str)
    }

    pub fn load_from_path(path: &Path) -> EngineResult<Self> {
        let config_str = std::fs::read_to_string(path)?;
        Self::from_json(&config_str)
    }

    fn from_json(config_str: &str) -> EngineResult<Self> {
        let settings: DashboardSettings = serde_json::from_str(config_str)?;
        if settings.top_n == 0 {
            return Err(EngineError::ConfigError("top_n must be greater than 0".to_string()));
        }
        Ok(settings)
    }
}

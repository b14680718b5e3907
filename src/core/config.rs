use crate::core::report::{DEFAULT_AVERAGE_DAYS_AMOUNT, ReportSettings};
use crate::core::window::SupportedWindow;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_EXCHANGERATES_API_URL: &str = "https://api.exchangeratesapi.io";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRatesApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub exchangeratesapi: Option<ExchangeRatesApiConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            exchangeratesapi: Some(ExchangeRatesApiConfig {
                base_url: DEFAULT_EXCHANGERATES_API_URL.to_string(),
            }),
        }
    }
}

impl ProvidersConfig {
    pub fn exchangeratesapi_url(&self) -> &str {
        self.exchangeratesapi
            .as_ref()
            .map_or(DEFAULT_EXCHANGERATES_API_URL, |p| &p.base_url)
    }
}

fn default_average_days_amount() -> u32 {
    DEFAULT_AVERAGE_DAYS_AMOUNT
}

fn default_supported_starting_date() -> NaiveDate {
    ReportSettings::default().window.earliest_date
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReportConfig {
    #[serde(default = "default_average_days_amount")]
    pub average_days_amount: u32,
    #[serde(default = "default_supported_starting_date")]
    pub supported_starting_date: NaiveDate,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            average_days_amount: default_average_days_amount(),
            supported_starting_date: default_supported_starting_date(),
        }
    }
}

impl ReportConfig {
    pub fn settings(&self) -> ReportSettings {
        ReportSettings {
            average_days_amount: self.average_days_amount,
            window: SupportedWindow::new(self.supported_starting_date),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub report: ReportConfig,
    pub data_path: Option<String>,
}

impl AppConfig {
    /// Loads the config from the default location, or defaults when no file exists yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "fxreport", "fxreport")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("io", "fxreport", "fxreport")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

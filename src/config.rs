use crate::catalog::{RecordStore, VehicleRecord};
use crate::state::PresentationOptions;
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub copy: CopyConfig,

    /// Replaces the built-in sample vehicles when non-empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vehicles: Vec<VehicleRecord>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub dark_mode: bool,
    pub show_blurb: bool,
    /// Cells used by the text bar in one-shot output.
    pub bar_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            show_blurb: true,
            bar_width: 30,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CopyConfig {
    #[serde(default = "default_feedback_ms")]
    pub feedback_ms: u64,
}

pub const MAX_BAR_WIDTH: usize = 200;

fn default_feedback_ms() -> u64 {
    2000
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            feedback_ms: default_feedback_ms(),
        }
    }
}

impl Config {
    /// Load from `explicit` if given, otherwise from the first config file
    /// found in the usual places. No file at all means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_config_path(),
        };

        if let Some(path) = config_path {
            log::info!("Loading config from {}", path.display());
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Range checks serde cannot express.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=MAX_BAR_WIDTH).contains(&self.display.bar_width),
            "display.bar_width must be between 1 and {MAX_BAR_WIDTH}, got {}",
            self.display.bar_width
        );
        Ok(())
    }

    fn find_config_path() -> Option<PathBuf> {
        if let Some(xdg_config) = dirs::config_dir() {
            let xdg_path = xdg_config.join("vinlookup/config.toml");
            if xdg_path.exists() {
                return Some(xdg_path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let home_path = home.join(".vinlookup.toml");
            if home_path.exists() {
                return Some(home_path);
            }
        }

        let current_path = Path::new(".vinlookup.toml");
        if current_path.exists() {
            return Some(current_path.to_path_buf());
        }

        None
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// The record store this config describes.
    pub fn record_store(&self) -> crate::Result<RecordStore> {
        if self.vehicles.is_empty() {
            Ok(RecordStore::seeded())
        } else {
            RecordStore::new(self.vehicles.clone())
        }
    }

    pub fn presentation_options(&self) -> PresentationOptions {
        PresentationOptions {
            dark_mode: self.display.dark_mode,
            show_blurb: self.display.show_blurb,
            copy_feedback: Duration::from_millis(self.copy.feedback_ms),
        }
    }
}

use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::corpus::{Category, FormatterSettings};
use crate::error::ConfigError;
use crate::progress::{TierThresholds, DEFAULT_SPAN, DEFAULT_WINDOW};
use crate::script::Segmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub category: String,
    pub timed_secs: Option<u32>,
    pub storage: StorageBackend,
    pub history_window: usize,
    pub trend_span: usize,
    pub tiers: TierThresholds,
    pub punctuation_probability: f64,
    pub capitalize_probability: f64,
    pub segmentation: Segmentation,
}

impl Default for Config {
    fn default() -> Self {
        let formatting = FormatterSettings::default();
        Self {
            category: Category::CommonWords.id().to_string(),
            timed_secs: None,
            storage: StorageBackend::default(),
            history_window: DEFAULT_WINDOW,
            trend_span: DEFAULT_SPAN,
            tiers: TierThresholds::default(),
            punctuation_probability: formatting.punctuation_probability,
            capitalize_probability: formatting.capitalize_probability,
            segmentation: Segmentation::default(),
        }
    }
}

impl Config {
    pub fn formatter_settings(&self) -> FormatterSettings {
        FormatterSettings {
            punctuation_probability: self.punctuation_probability,
            capitalize_probability: self.capitalize_probability,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "typi") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("typi_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Config, ConfigError> {
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice::<Config>(&bytes)?)
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match self.read() {
            Ok(cfg) => cfg,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => {
                warn!("ignoring config at {}: {e}", self.path.display());
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// How inline image placeholders are matched to extracted image files
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageCorrelation {
    /// Match each drawing to the image its relationship id points at
    #[default]
    Relationship,
    /// Match the n-th drawing in reading order to the n-th image relationship
    Position,
}

/// Importer configuration for docquiz
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Directory extracted images are written to
    pub image_dir: PathBuf,
    /// Where the JSON result set is written
    pub output_path: PathBuf,
    pub correlation: ImageCorrelation,
}

impl Default for ImportConfig {
    fn default() -> Self {
        ImportConfig {
            image_dir: PathBuf::from("temp_images"),
            output_path: PathBuf::from("data").join("output.json"),
            correlation: ImageCorrelation::default(),
        }
    }
}

impl ImportConfig {
    /// Load configuration from config directory
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::get_config_path() {
            if config_path.exists() {
                let content = fs::read_to_string(&config_path)?;
                let config: ImportConfig = toml::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(ImportConfig::default())
    }

    /// Save configuration to config directory
    pub fn save(&self) -> Result<()> {
        if let Some(config_path) = Self::get_config_path() {
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }

            let content = toml::to_string_pretty(self)?;
            fs::write(&config_path, content)?;
        }

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("docquiz").join("config.toml"))
    }

    /// Initialize default config file
    pub fn init_default() -> Result<()> {
        ImportConfig::default().save()
    }
}

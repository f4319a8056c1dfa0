//! Studio configuration.
//!
//! Stored as TOML at `<OS config dir>/axiomlab/config.toml`, or under
//! `$AXIOMLAB_HOME/config/config.toml` when the override is set. Tracks
//! which provider models the two service operations address and the fixed
//! image parameters sent with every generation call.

use serde::{Deserialize, Serialize};

/// Root configuration persisted per installation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StudioConfig {
    /// Provider model ids for the two service operations.
    #[serde(default)]
    pub generation: GenerationSettings,
    /// Image parameters attached to every generation request.
    #[serde(default)]
    pub image: ImageSettings,
}

/// Which models the structured and image calls address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            text_model: default_text_model(),
            image_model: default_image_model(),
        }
    }
}

fn default_text_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_image_model() -> String {
    "gemini-3-pro-image-preview".to_string()
}

/// Fixed image parameters for generation requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSettings {
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    #[serde(default = "default_image_size")]
    pub image_size: String,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: default_aspect_ratio(),
            image_size: default_image_size(),
        }
    }
}

fn default_aspect_ratio() -> String {
    "16:9".to_string()
}

fn default_image_size() -> String {
    "1K".to_string()
}

pub const CONFIG_FILE_NAME: &str = "config.toml";

use anyhow::{Context, Result};
use directories::BaseDirs;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Returns the directory the config file lives in.
///
/// Order of precedence:
/// 1. `AXIOMLAB_HOME` environment variable (`config/` underneath it).
/// 2. OS-specific config directory via `directories::BaseDirs`.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(path) = env::var("AXIOMLAB_HOME") {
        return Ok(PathBuf::from(path).join("config"));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS config directory")?;
    Ok(base_dirs.config_dir().join("axiomlab"))
}

/// Path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from disk or returns defaults.
pub fn load_or_default() -> Result<StudioConfig> {
    let path = config_file_path()?;
    if path.exists() {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let cfg: StudioConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(cfg)
    } else {
        Ok(StudioConfig::default())
    }
}

/// Persists the configuration to disk.
pub fn save(config: &StudioConfig) -> Result<()> {
    let dir = config_dir()?;
    fs::create_dir_all(&dir)?;
    let path = config_file_path()?;
    let data = toml::to_string_pretty(config)?;
    fs::write(&path, data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_toml() {
        let config = StudioConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: StudioConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.image.aspect_ratio, "16:9");
        assert_eq!(parsed.image.image_size, "1K");
        assert_eq!(parsed.generation.text_model, config.generation.text_model);
    }

    #[test]
    fn partial_file_fills_missing_sections_with_defaults() {
        let parsed: StudioConfig =
            toml::from_str("[image]\naspect_ratio = \"4:3\"\n").unwrap();
        assert_eq!(parsed.image.aspect_ratio, "4:3");
        assert_eq!(parsed.image.image_size, "1K");
        assert!(!parsed.generation.image_model.is_empty());
    }
}

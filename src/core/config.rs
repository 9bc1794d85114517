use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::color::ColorTier;
use crate::raster::LineEncoding;
use crate::shared::constants;

/// Settings read from `cellpaint.json`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `None` means detect from the environment.
    pub tier: Option<ColorTier>,
    pub fps: u32,
    pub encoding: LineEncoding,
    pub circle_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tier: None,
            fps: constants::DEFAULT_FPS,
            encoding: LineEncoding::default(),
            circle_count: constants::DEFAULT_CIRCLE_COUNT,
        }
    }
}

impl Config {
    /// Loads `explicit` if given; otherwise the first config file found in
    /// the working directory or the user config directory, or defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        for candidate in Self::search_paths() {
            if candidate.is_file() {
                return Self::from_file(&candidate);
            }
        }

        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(constants::CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join(constants::APP_NAME).join(constants::USER_CONFIG_FILE));
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, r#"{ "tier": "extended", "fps": 12 }"#).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.tier, Some(ColorTier::Extended));
        assert_eq!(config.fps, 12);
        assert_eq!(config.encoding, LineEncoding::Braille);
        assert_eq!(config.circle_count, constants::DEFAULT_CIRCLE_COUNT);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        let config = Config {
            tier: Some(ColorTier::Console),
            fps: 24,
            encoding: LineEncoding::HalfBlock,
            circle_count: 5,
        };
        config.save(&path).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, "{ fps: }").unwrap();
        assert!(Config::load(Some(&path)).is_err());
        assert!(Config::load(Some(&dir.path().join("missing.json"))).is_err());
    }
}

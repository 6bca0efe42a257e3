use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::render::ColorChoice;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// color = "auto"
/// art_dir = "/usr/local/share/skycast/designs"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Color preference applied when the CLI flag is absent.
    pub color: ColorChoice,

    /// Extra directory to try first when resolving the art store.
    pub art_dir: Option<PathBuf>,
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_auto_color_and_no_art_dir() {
        let cfg = Config::default();
        assert_eq!(cfg.color, ColorChoice::Auto);
        assert_eq!(cfg.art_dir, None);
    }

    #[test]
    fn toml_roundtrip() {
        let cfg = Config {
            color: ColorChoice::Never,
            art_dir: Some(PathBuf::from("/opt/skycast/designs")),
        };

        let toml = toml::to_string_pretty(&cfg).expect("config must serialize");
        let parsed: Config = toml::from_str(&toml).expect("serialized config must parse");

        assert_eq!(parsed, cfg);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("").expect("empty config must parse");
        assert_eq!(parsed, Config::default());

        let parsed: Config =
            toml::from_str(r#"color = "always""#).expect("partial config must parse");
        assert_eq!(parsed.color, ColorChoice::Always);
        assert_eq!(parsed.art_dir, None);
    }

    #[test]
    fn unknown_color_value_is_a_parse_error() {
        let result: Result<Config, _> = toml::from_str(r#"color = "sometimes""#);
        assert!(result.is_err());
    }
}

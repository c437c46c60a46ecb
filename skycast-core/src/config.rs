use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "SKYCAST_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Visual Crossing API key, set via `skycast configure`.
    pub api_key: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
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

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Effective credential: the `SKYCAST_API_KEY` environment variable wins
    /// over the config file; blank values count as absent.
    pub fn resolve_api_key(&self) -> Option<String> {
        let env = std::env::var(API_KEY_ENV).ok();
        pick_api_key(env.as_deref(), self.api_key.as_deref())
    }
}

fn pick_api_key(env: Option<&str>, file: Option<&str>) -> Option<String> {
    non_blank(env).or_else(|| non_blank(file))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_key() {
        let cfg = Config::default();
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn set_api_key_is_picked_up() {
        let mut cfg = Config::default();
        cfg.set_api_key("SECRET".into());
        assert_eq!(pick_api_key(None, cfg.api_key.as_deref()), Some("SECRET".into()));
    }

    #[test]
    fn env_wins_over_file() {
        assert_eq!(
            pick_api_key(Some("FROM_ENV"), Some("FROM_FILE")),
            Some("FROM_ENV".into())
        );
    }

    #[test]
    fn blank_values_count_as_absent() {
        assert_eq!(pick_api_key(Some("  "), Some("FROM_FILE")), Some("FROM_FILE".into()));
        assert_eq!(pick_api_key(Some(""), None), None);
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let back: Config = toml::from_str(&text).expect("parse");
        assert_eq!(back.api_key.as_deref(), Some("KEY"));
    }
}

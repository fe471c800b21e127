use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_timezone() -> String {
    "UTC".to_string()
}
fn default_tick_rate_ms() -> u64 {
    1000
}
fn default_true() -> bool {
    true
}
fn default_job_log_dir() -> PathBuf {
    PathBuf::from("/var/log")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// IANA zone used to mark DST days when building a year from a calendar.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_true")]
    pub clock_24h: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            tick_rate_ms: default_tick_rate_ms(),
            clock_24h: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Daily snapshot written by the sync service; defaults to `<data_dir>/config.json`.
    #[serde(default)]
    pub daily_config: Option<PathBuf>,
    /// Year JSON (`{year, data, dstTransitions}`) read when the database has no cached year.
    #[serde(default)]
    pub year_data: Option<PathBuf>,
    /// Directory holding the scheduler's `prayer-call-<prayer>.log` files.
    #[serde(default = "default_job_log_dir")]
    pub job_log_dir: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            daily_config: None,
            year_data: None,
            job_log_dir: default_job_log_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "adhan").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("adhan.db"))
    }

    pub fn daily_config_path(&self) -> Result<PathBuf> {
        match &self.sources.daily_config {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("config.json")),
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.display.timezone, "UTC");
        assert_eq!(config.display.tick_rate_ms, 1000);
        assert!(config.sources.daily_config.is_none());
        assert!(config.sources.year_data.is_none());
        assert_eq!(config.sources.job_log_dir, PathBuf::from("/var/log"));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\ntimezone = \"Europe/Paris\"\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.display.timezone, "Europe/Paris");
        assert!(config.display.clock_24h);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.sources.daily_config = Some(dir.path().join("daily.json"));
        config.sources.year_data = Some(dir.path().join("year.json"));
        config.display.tick_rate_ms = 250;
        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.display.tick_rate_ms, 250);
        assert_eq!(loaded.sources.daily_config, config.sources.daily_config);
        assert_eq!(loaded.sources.year_data, config.sources.year_data);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display\n").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }
}

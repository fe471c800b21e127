use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::models::{DailyPrayerValue, PrayerKey};
use crate::utils::hijri::ScheduleDate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mosque {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastDevice {
    pub uuid: String,
    pub name: String,
}

/// The daily snapshot shared with the sync service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyConfig {
    #[serde(default)]
    pub mosque: Option<Mosque>,
    #[serde(default)]
    pub chromecast: Option<CastDevice>,
    #[serde(default)]
    pub adhan_files: HashMap<String, Option<String>>,
    #[serde(default)]
    pub adhan_volumes: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub prayer_times: IndexMap<String, Option<DailyPrayerValue>>,
    #[serde(default)]
    pub prayer_schedule_date: Option<ScheduleDate>,
}

impl Default for DailyConfig {
    fn default() -> Self {
        let per_prayer = || PrayerKey::DAILY.iter().map(|p| p.as_str().to_string());
        Self {
            mosque: None,
            chromecast: None,
            adhan_files: per_prayer().map(|p| (p, None)).collect(),
            adhan_volumes: per_prayer().map(|p| (p, None)).collect(),
            prayer_times: IndexMap::new(),
            prayer_schedule_date: None,
        }
    }
}

impl DailyConfig {
    pub fn has_file(&self, prayer: &str) -> bool {
        self.adhan_files
            .get(prayer)
            .is_some_and(|f| f.as_deref().is_some_and(|f| !f.is_empty()))
    }

    pub fn volume(&self, prayer: &str) -> Option<f64> {
        self.adhan_volumes.get(prayer).copied().flatten()
    }
}

/// Partial update, applied with [`DailyConfigStore::update`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyConfigUpdate {
    #[serde(default)]
    pub mosque: Option<Mosque>,
    #[serde(default)]
    pub chromecast: Option<CastDevice>,
    #[serde(default)]
    pub adhan_files: Option<HashMap<String, Option<String>>>,
    #[serde(default)]
    pub adhan_volumes: Option<HashMap<String, Option<f64>>>,
    #[serde(default)]
    pub prayer_times: Option<IndexMap<String, Option<DailyPrayerValue>>>,
    #[serde(default)]
    pub prayer_schedule_date: Option<ScheduleDate>,
}

pub struct DailyConfigStore {
    path: PathBuf,
}

impl DailyConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable snapshots load as the default config.
    pub fn load(&self) -> DailyConfig {
        if !self.path.exists() {
            return DailyConfig::default();
        }
        match self.try_load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Error loading {:?}: {:#}", self.path, e);
                DailyConfig::default()
            }
        }
    }

    fn try_load(&self) -> Result<DailyConfig> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Reading {:?}", self.path))?;
        serde_json::from_str(&content).context("Parsing daily config")
    }

    pub fn save(&self, config: &DailyConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(config).context("Serializing daily config")?;
        std::fs::write(&self.path, content).with_context(|| format!("Writing {:?}", self.path))?;
        Ok(())
    }

    /// Files and volumes merge per prayer; every other field present is replaced.
    pub fn update(&self, updates: DailyConfigUpdate) -> Result<DailyConfig> {
        let mut config = self.load();
        if let Some(mosque) = updates.mosque {
            config.mosque = Some(mosque);
        }
        if let Some(device) = updates.chromecast {
            config.chromecast = Some(device);
        }
        if let Some(files) = updates.adhan_files {
            config.adhan_files.extend(files);
        }
        if let Some(volumes) = updates.adhan_volumes {
            config.adhan_volumes.extend(volumes);
        }
        if let Some(times) = updates.prayer_times {
            config.prayer_times = times;
        }
        if let Some(date) = updates.prayer_schedule_date {
            config.prayer_schedule_date = Some(date);
        }
        self.save(&config)?;
        log::info!("Updated daily config at {:?}", self.path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "mosque": {"uuid": "abc", "name": "Grande Mosquée"},
        "chromecast": null,
        "adhan_files": {"fajr": "fajr.mp3", "dhuhr": null},
        "adhan_volumes": {"fajr": 0.4, "dhuhr": null},
        "prayer_times": {
            "fajr": {"1": "05:10", "15": "05:20"},
            "dhuhr": "12:30",
            "asr": null
        }
    }"#;

    fn store_with(content: &str) -> (tempfile::TempDir, DailyConfigStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, content).unwrap();
        let store = DailyConfigStore::new(path);
        (dir, store)
    }

    #[test]
    fn loads_snapshot_shape() {
        let (_dir, store) = store_with(SNAPSHOT);
        let config = store.load();
        assert_eq!(config.mosque.as_ref().map(|m| m.name.as_str()), Some("Grande Mosquée"));
        assert!(config.has_file("fajr"));
        assert!(!config.has_file("dhuhr"));
        assert!(!config.has_file("isha"));
        assert_eq!(config.volume("fajr"), Some(0.4));
        assert_eq!(config.volume("dhuhr"), None);
        let keys: Vec<&str> = config.prayer_times.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["fajr", "dhuhr", "asr"]);
        assert_eq!(config.prayer_times["asr"], None);
    }

    #[test]
    fn missing_or_corrupt_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = DailyConfigStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load(), DailyConfig::default());

        let (_dir, store) = store_with("{ not json");
        let config = store.load();
        assert_eq!(config.adhan_files.len(), 5);
        assert!(config.prayer_times.is_empty());
    }

    #[test]
    fn update_merges_files_and_replaces_times() {
        let (_dir, store) = store_with(SNAPSHOT);
        let update: DailyConfigUpdate = serde_json::from_str(
            r#"{"adhan_files": {"isha": "isha.mp3"}, "prayer_times": {"fajr": "05:00"}}"#,
        )
        .unwrap();
        let config = store.update(update).unwrap();
        assert!(config.has_file("fajr"));
        assert!(config.has_file("isha"));
        assert_eq!(config.prayer_times.len(), 1);

        let reloaded = store.load();
        assert_eq!(reloaded, config);
    }
}

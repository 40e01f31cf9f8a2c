//! Persisted operator preferences.
//!
//! The pages receive a [`PreferenceStore`] by injection instead of
//! reaching for ambient global state; the only preference carried
//! across sessions today is the "show all devices" flag honored by the
//! device-list fetch.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::defaults;
use crate::error::Result;

/// Get/set contract for preferences retained across sessions.
pub trait PreferenceStore {
    /// Whether device fetches should request all devices instead of
    /// only the operator's visible ones.
    fn show_all_devices(&self) -> bool;

    fn set_show_all_devices(&mut self, value: bool) -> Result<()>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreferenceData {
    #[serde(default)]
    show_all_devices: bool,
}

/// JSON-file-backed preference store. Missing or unreadable files fall
/// back to defaults; every set writes through to disk.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    data: PreferenceData,
}

impl FilePreferences {
    /// Open the store at `path`, reading existing values if present.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = Self::read(&path);
        Self { path, data }
    }

    /// Open the store at the path named by `GEOTRACK_PREFS_PATH`, or a
    /// default file in the working directory when unset.
    pub fn from_env() -> Self {
        let path = std::env::var(defaults::ENV_PREFS_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(defaults::PREFS_FILE_NAME));
        Self::open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> PreferenceData {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(data) => data,
                Err(error) => {
                    debug!(path = %path.display(), %error, "unreadable preferences, using defaults");
                    PreferenceData::default()
                }
            },
            Err(_) => PreferenceData::default(),
        }
    }

    fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferences {
    fn show_all_devices(&self) -> bool {
        self.data.show_all_devices
    }

    fn set_show_all_devices(&mut self, value: bool) -> Result<()> {
        self.data.show_all_devices = value;
        self.write()
    }
}

/// In-memory preference store for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    show_all_devices: bool,
}

impl PreferenceStore for MemoryPreferences {
    fn show_all_devices(&self) -> bool {
        self.show_all_devices
    }

    fn set_show_all_devices(&mut self, value: bool) -> Result<()> {
        self.show_all_devices = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_defaults_to_false() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferences::open(dir.path().join("prefs.json"));
        assert!(!store.show_all_devices());
    }

    #[test]
    fn test_set_writes_through_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut store = FilePreferences::open(&path);
        store.set_show_all_devices(true).unwrap();
        assert!(store.show_all_devices());

        let reloaded = FilePreferences::open(&path);
        assert!(reloaded.show_all_devices());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();

        let store = FilePreferences::open(&path);
        assert!(!store.show_all_devices());
    }

    #[test]
    fn test_parent_directories_created_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/prefs.json");

        let mut store = FilePreferences::open(&path);
        store.set_show_all_devices(true).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryPreferences::default();
        assert!(!store.show_all_devices());
        store.set_show_all_devices(true).unwrap();
        assert!(store.show_all_devices());
    }

    #[test]
    fn test_wire_field_name_matches_legacy_key() {
        let data = PreferenceData {
            show_all_devices: true,
        };
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("showAllDevices").is_some());
    }
}

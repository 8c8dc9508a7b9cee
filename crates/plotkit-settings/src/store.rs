//! Grouped key-value settings store.
//!
//! The store is the collaborator panels save to and load from: named groups
//! of string key/value pairs with `begin_group`/`end_group` navigation, plus
//! file persistence. Supports JSON and TOML file formats stored in
//! platform-specific directories.

use crate::error::{SettingsError, SettingsResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Group receiving keys set outside any `begin_group` scope.
const ROOT_GROUP: &str = "General";

/// In-memory settings store with grouped string keys.
///
/// Values are plain strings; typed interpretation is the caller's concern.
/// Group navigation nests: `begin_group` pushes a name, `end_group` pops it,
/// and nested names join with "/".
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    groups: BTreeMap<String, BTreeMap<String, String>>,
    group_stack: Vec<String>,
}

impl SettingsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a named group; subsequent reads and writes are scoped to it.
    pub fn begin_group(&mut self, name: &str) {
        self.group_stack.push(name.to_string());
    }

    /// Leave the current group.
    pub fn end_group(&mut self) {
        if self.group_stack.pop().is_none() {
            warn!("end_group called without a matching begin_group");
        }
    }

    fn current_group(&self) -> String {
        if self.group_stack.is_empty() {
            ROOT_GROUP.to_string()
        } else {
            self.group_stack.join("/")
        }
    }

    /// Set a key in the current group, overwriting any previous value.
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        let group = self.current_group();
        self.groups
            .entry(group)
            .or_default()
            .insert(key.to_string(), value.into());
    }

    /// Get a key from the current group.
    pub fn value(&self, key: &str) -> Option<String> {
        self.groups
            .get(&self.current_group())
            .and_then(|group| group.get(key))
            .cloned()
    }

    /// Whether the current group holds the given key.
    pub fn contains(&self, key: &str) -> bool {
        self.groups
            .get(&self.current_group())
            .is_some_and(|group| group.contains_key(key))
    }

    /// Load a store from file (JSON or TOML).
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let groups = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            return Err(SettingsError::UnsupportedFormat(
                path.to_string_lossy().to_string(),
            ));
        };

        debug!(path = %path.display(), "loaded settings");
        Ok(Self {
            groups,
            group_stack: Vec::new(),
        })
    }

    /// Save the store to file (JSON or TOML).
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(&self.groups)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(&self.groups)?
        } else {
            return Err(SettingsError::UnsupportedFormat(
                path.to_string_lossy().to_string(),
            ));
        };

        std::fs::write(path, content)?;
        debug!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// Default settings file location for the application.
    pub fn default_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("could not determine user config directory".to_string())
        })?;
        Ok(base.join("plotkit").join("settings.toml"))
    }

    /// Create the configuration directory for [`default_path`](Self::default_path).
    pub fn ensure_config_dir() -> SettingsResult<()> {
        let path = Self::default_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_returns_none() {
        let store = SettingsStore::new();
        assert_eq!(store.value("Delimiter"), None);
        assert!(!store.contains("Delimiter"));
    }

    #[test]
    fn groups_scope_keys() {
        let mut store = SettingsStore::new();
        store.set_value("theme", "dark");
        store.begin_group("ASCII");
        store.set_value("Delimiter", ",");
        store.end_group();

        assert_eq!(store.value("theme"), Some("dark".to_string()));
        assert_eq!(store.value("Delimiter"), None);

        store.begin_group("ASCII");
        assert_eq!(store.value("Delimiter"), Some(",".to_string()));
        assert_eq!(store.value("theme"), None);
        store.end_group();
    }

    #[test]
    fn nested_groups_join_with_slash() {
        let mut store = SettingsStore::new();
        store.begin_group("Reader");
        store.begin_group("ASCII");
        store.set_value("Delimiter", " ");
        store.end_group();
        store.end_group();

        store.begin_group("Reader/ASCII");
        assert_eq!(store.value("Delimiter"), Some(" ".to_string()));
        store.end_group();
    }

    #[test]
    fn root_keys_land_in_general_group() {
        let mut store = SettingsStore::new();
        store.set_value("language", "en");

        store.begin_group("General");
        assert_eq!(store.value("language"), Some("en".to_string()));
        store.end_group();
    }

    #[test]
    fn unbalanced_end_group_is_harmless() {
        let mut store = SettingsStore::new();
        store.end_group();
        store.set_value("key", "value");
        assert_eq!(store.value("key"), Some("value".to_string()));
    }

    #[test]
    fn toml_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let mut store = SettingsStore::new();
        store.begin_group("ASCII");
        store.set_value("NumOfChannels", "auto");
        store.set_value("Delimiter", " ");
        store.end_group();
        store.save_to_file(&path).unwrap();

        let mut loaded = SettingsStore::load_from_file(&path).unwrap();
        loaded.begin_group("ASCII");
        assert_eq!(loaded.value("NumOfChannels"), Some("auto".to_string()));
        assert_eq!(loaded.value("Delimiter"), Some(" ".to_string()));
        loaded.end_group();
    }

    #[test]
    fn json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut store = SettingsStore::new();
        store.set_value("theme", "dark");
        store.save_to_file(&path).unwrap();

        let loaded = SettingsStore::load_from_file(&path).unwrap();
        assert_eq!(loaded.value("theme"), Some("dark".to_string()));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ini");

        let store = SettingsStore::new();
        assert!(matches!(
            store.save_to_file(&path),
            Err(SettingsError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(matches!(
            SettingsStore::load_from_file(&path),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "not [ valid").unwrap();

        assert!(matches!(
            SettingsStore::load_from_file(&path),
            Err(SettingsError::TomlParse(_))
        ));
    }

    #[test]
    fn default_path_points_into_config_dir() {
        if dirs::config_dir().is_none() {
            return;
        }
        let path = SettingsStore::default_path().unwrap();
        assert!(path.ends_with("plotkit/settings.toml"));
    }
}

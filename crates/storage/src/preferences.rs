//! Durable key-value storage for user interface preferences.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const APP_DIR_NAME: &str = "relatehub";
const PREFERENCES_FILE_NAME: &str = "preferences.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub dark_mode: bool,
}

#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the per-user configuration directory, when the platform
    /// exposes one.
    pub fn in_user_config_dir() -> Option<Self> {
        default_preferences_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `None` when nothing has been stored yet.
    pub fn load(&self) -> Result<Option<Preferences>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to read preferences '{}'", self.path.display())
                })
            }
        };

        let preferences = serde_json::from_str(&raw).with_context(|| {
            format!("failed to parse preferences '{}'", self.path.display())
        })?;
        Ok(Some(preferences))
    }

    pub fn save(&self, preferences: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!(
                    "failed to create preferences directory '{}'",
                    parent.display()
                )
            })?;
        }

        let serialized =
            serde_json::to_string_pretty(preferences).context("failed to encode preferences")?;
        fs::write(&self.path, serialized).with_context(|| {
            format!("failed to write preferences '{}'", self.path.display())
        })?;
        tracing::debug!(path = %self.path.display(), "flushed preferences");
        Ok(())
    }
}

pub fn default_preferences_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(PREFERENCES_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_no_stored_preference() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PreferenceStore::new(dir.path().join("preferences.json"));
        assert_eq!(store.load().expect("load"), None);
    }

    #[test]
    fn save_creates_parent_directories_and_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PreferenceStore::new(dir.path().join("nested").join("prefs.json"));

        store
            .save(&Preferences { dark_mode: true })
            .expect("save");

        assert!(store.path().exists());
        assert_eq!(
            store.load().expect("load"),
            Some(Preferences { dark_mode: true })
        );
    }

    #[test]
    fn unknown_keys_and_missing_fields_fall_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"accent":"teal"}"#).expect("write");

        let store = PreferenceStore::new(&path);
        assert_eq!(store.load().expect("load"), Some(Preferences::default()));
    }

    #[test]
    fn corrupt_file_reports_path_in_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").expect("write");

        let err = PreferenceStore::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("failed to parse preferences"));
    }
}

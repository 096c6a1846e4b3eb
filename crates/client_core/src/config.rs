use std::{fs, path::PathBuf, time::Duration};

use serde::Deserialize;
use storage::PreferenceStore;

pub const SETTINGS_FILE: &str = "relatehub.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub fixture_latency_ms: u64,
    pub preferences_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            fixture_latency_ms: 800,
            preferences_path: None,
            log_filter: "info".into(),
        }
    }
}

impl ClientSettings {
    pub fn fixture_latency(&self) -> Duration {
        Duration::from_millis(self.fixture_latency_ms)
    }

    /// Explicit path if configured, otherwise the per-user config directory.
    pub fn preference_store(&self) -> Option<PreferenceStore> {
        match &self.preferences_path {
            Some(path) => Some(PreferenceStore::new(path)),
            None => PreferenceStore::in_user_config_dir(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    fixture_latency_ms: Option<u64>,
    preferences_path: Option<PathBuf>,
    log_filter: Option<String>,
}

/// Defaults, then `relatehub.toml` in the working directory, then the
/// process environment.
pub fn load_settings() -> ClientSettings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    resolve_settings(file.as_deref(), |key| std::env::var(key).ok())
}

pub fn resolve_settings(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Some(raw) = file {
        match toml::from_str::<SettingsFile>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.fixture_latency_ms {
                    settings.fixture_latency_ms = v;
                }
                if let Some(v) = file_cfg.preferences_path {
                    settings.preferences_path = Some(v);
                }
                if let Some(v) = file_cfg.log_filter {
                    settings.log_filter = v;
                }
            }
            Err(err) => tracing::warn!("ignoring malformed {SETTINGS_FILE}: {err}"),
        }
    }

    for key in ["RELATEHUB_FIXTURE_LATENCY_MS", "APP__FIXTURE_LATENCY_MS"] {
        if let Some(v) = env(key) {
            match v.trim().parse::<u64>() {
                Ok(parsed) => settings.fixture_latency_ms = parsed,
                Err(err) => tracing::warn!("ignoring {key}={v:?}: {err}"),
            }
        }
    }

    for key in ["RELATEHUB_PREFERENCES_PATH", "APP__PREFERENCES_PATH"] {
        if let Some(v) = env(key).filter(|v| !v.trim().is_empty()) {
            settings.preferences_path = Some(PathBuf::from(v));
        }
    }

    if let Some(v) = env("RUST_LOG").filter(|v| !v.trim().is_empty()) {
        settings.log_filter = v;
    }

    settings
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_file_or_env() {
        let settings = resolve_settings(None, env_from(&[]));
        assert_eq!(settings, ClientSettings::default());
        assert_eq!(settings.fixture_latency(), Duration::from_millis(800));
    }

    #[test]
    fn file_values_override_defaults() {
        let raw = r#"
            fixture_latency_ms = 0
            preferences_path = "/tmp/relatehub/prefs.json"
            log_filter = "client_core=debug"
        "#;
        let settings = resolve_settings(Some(raw), env_from(&[]));
        assert_eq!(settings.fixture_latency_ms, 0);
        assert_eq!(
            settings.preferences_path,
            Some(PathBuf::from("/tmp/relatehub/prefs.json"))
        );
        assert_eq!(settings.log_filter, "client_core=debug");
    }

    #[test]
    fn env_overrides_file_and_app_prefix_wins() {
        let raw = "fixture_latency_ms = 50";
        let settings = resolve_settings(
            Some(raw),
            env_from(&[
                ("RELATEHUB_FIXTURE_LATENCY_MS", "100"),
                ("APP__FIXTURE_LATENCY_MS", "200"),
                ("RUST_LOG", "warn"),
            ]),
        );
        assert_eq!(settings.fixture_latency_ms, 200);
        assert_eq!(settings.log_filter, "warn");
    }

    #[test]
    fn malformed_inputs_are_ignored() {
        let settings = resolve_settings(
            Some("fixture_latency_ms = \"soon\""),
            env_from(&[("RELATEHUB_FIXTURE_LATENCY_MS", "later")]),
        );
        assert_eq!(settings.fixture_latency_ms, 800);
    }

    #[test]
    fn explicit_preferences_path_builds_store() {
        let settings = ClientSettings {
            preferences_path: Some(PathBuf::from("prefs.json")),
            ..ClientSettings::default()
        };
        let store = settings.preference_store().expect("store");
        assert_eq!(store.path(), std::path::Path::new("prefs.json"));
    }
}

//! Core runtime configuration.
//!
//! # Responsibility
//! - Resolve database path, storage key and log level from the environment.
//! - Fall back to deterministic defaults when variables are unset or blank.

use crate::logging::{default_log_level, normalize_level};
use log::warn;
use std::path::PathBuf;

/// Storage key holding the note array when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "notes";
/// Database file name used under the temp dir when no path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "quicknote.sqlite3";

pub const DB_PATH_ENV: &str = "QUICKNOTE_DB_PATH";
pub const STORAGE_KEY_ENV: &str = "QUICKNOTE_STORAGE_KEY";
pub const LOG_LEVEL_ENV: &str = "QUICKNOTE_LOG_LEVEL";

/// Resolved core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file backing durable storage.
    pub db_path: PathBuf,
    /// Key holding the JSON note array.
    pub storage_key: String,
    /// Normalized log level (`trace|debug|info|warn|error`).
    pub log_level: &'static str,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: default_log_level(),
        }
    }
}

impl CoreConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// Each setting falls back on its own: an unknown log level keeps the
    /// default level but never discards the database path or storage key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = non_blank(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(key) = non_blank(STORAGE_KEY_ENV) {
            config.storage_key = key;
        }
        if let Some(level) = non_blank(LOG_LEVEL_ENV) {
            match normalize_level(&level) {
                Ok(level) => config.log_level = level,
                Err(err) => warn!(
                    "event=config_resolve module=config status=fallback field=log_level default={} error={err}",
                    config.log_level
                ),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::{
        default_log_level, CoreConfig, DB_PATH_ENV, DEFAULT_STORAGE_KEY, LOG_LEVEL_ENV,
        STORAGE_KEY_ENV,
    };
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        let config = CoreConfig::from_lookup(|_| None);
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn variables_override_defaults_and_blank_values_are_ignored() {
        let config = CoreConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, " /var/lib/quicknote/db.sqlite3 "),
            (STORAGE_KEY_ENV, "   "),
            (LOG_LEVEL_ENV, "WARNING"),
        ]));

        assert_eq!(
            config.db_path,
            PathBuf::from("/var/lib/quicknote/db.sqlite3")
        );
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn unknown_log_level_keeps_other_settings() {
        let config = CoreConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, "/data/notes.sqlite3"),
            (STORAGE_KEY_ENV, "work-notes"),
            (LOG_LEVEL_ENV, "verbose"),
        ]));

        assert_eq!(config.db_path, PathBuf::from("/data/notes.sqlite3"));
        assert_eq!(config.storage_key, "work-notes");
        assert_eq!(config.log_level, default_log_level());
    }
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use quillpad_search::{SearchHistory, SearchMode, SearchOptions};

const PREFERENCES_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read search preferences {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse search preferences {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize search preferences {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write search preferences {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to prepare directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Search flags and pattern history that survive restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPreferences {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default)]
    pub whole_word: bool,
    #[serde(default)]
    pub regex: bool,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    #[serde(default)]
    pub history: Vec<String>,
}

fn default_version() -> u32 {
    PREFERENCES_VERSION
}

fn default_history_capacity() -> usize {
    20
}

impl Default for SearchPreferences {
    fn default() -> Self {
        Self {
            version: PREFERENCES_VERSION,
            case_sensitive: false,
            whole_word: false,
            regex: false,
            history_capacity: default_history_capacity(),
            history: Vec::new(),
        }
    }
}

impl SearchPreferences {
    pub fn sanitize(&mut self) {
        if self.version == 0 {
            self.version = PREFERENCES_VERSION;
        }
        self.history_capacity = self.history_capacity.clamp(1, 100);
        self.history.retain(|entry| !entry.is_empty());
        self.history.truncate(self.history_capacity);
        // Whole-word and regex are mutually exclusive in the UI; regex
        // wins when a hand-edited file sets both.
        if self.regex {
            self.whole_word = false;
        }
    }

    /// Loads preferences from `path`; a missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        };
        let mut preferences: Self =
            serde_json::from_str(&raw).map_err(|err| SettingsError::Parse {
                path: path.to_path_buf(),
                source: err,
            })?;
        preferences.sanitize();
        Ok(preferences)
    }

    /// Saves preferences, writing to a temporary file and renaming to
    /// avoid partial writes.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| SettingsError::CreateDir {
                    path: parent.to_path_buf(),
                    source: err,
                })?;
            }
        }
        let payload = serde_json::to_string_pretty(self).map_err(|err| {
            SettingsError::Serialize {
                path: path.to_path_buf(),
                source: err,
            }
        })?;
        let tmp_path = path.with_extension("tmp_quillpad");
        fs::write(&tmp_path, payload).map_err(|err| SettingsError::Write {
            path: tmp_path.clone(),
            source: err,
        })?;
        fs::rename(&tmp_path, path).map_err(|err| SettingsError::Write {
            path: path.to_path_buf(),
            source: err,
        })?;
        Ok(())
    }

    /// Builds matcher options for `pattern` from the stored flags.
    pub fn to_options(&self, pattern: impl Into<String>) -> SearchOptions {
        let mut options = SearchOptions::new(pattern);
        options.case_sensitive = self.case_sensitive;
        options.whole_word = self.whole_word;
        if self.regex {
            options.mode = SearchMode::Regex;
        }
        options
    }

    /// Restores the shared history store from the persisted entries.
    pub fn to_history(&self) -> SearchHistory {
        SearchHistory::with_entries(self.history_capacity, self.history.clone())
    }

    /// Captures the history store for the next save.
    pub fn set_history(&mut self, history: &SearchHistory) {
        self.history_capacity = history.capacity();
        self.history = history.iter().map(str::to_owned).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let preferences: SearchPreferences = serde_json::from_str("{}").unwrap();
        assert_eq!(preferences.version, PREFERENCES_VERSION);
        assert!(!preferences.case_sensitive);
        assert_eq!(preferences.history_capacity, 20);
        assert!(preferences.history.is_empty());
    }

    #[test]
    fn sanitize_clamps_capacity_and_resolves_flag_conflicts() {
        let mut preferences = SearchPreferences {
            history_capacity: 0,
            whole_word: true,
            regex: true,
            history: vec!["keep".into(), String::new()],
            ..SearchPreferences::default()
        };
        preferences.sanitize();
        assert_eq!(preferences.history_capacity, 1);
        assert!(!preferences.whole_word);
        assert!(preferences.regex);
        assert_eq!(preferences.history, vec!["keep".to_owned()]);
    }

    #[test]
    fn options_carry_the_stored_flags() {
        let preferences = SearchPreferences {
            case_sensitive: true,
            regex: true,
            ..SearchPreferences::default()
        };
        let options = preferences.to_options("nee.le");
        assert!(options.case_sensitive);
        assert_eq!(options.mode, SearchMode::Regex);
    }

    #[test]
    fn history_round_trips_through_the_store() {
        let mut preferences = SearchPreferences::default();
        let mut history = preferences.to_history();
        history.record("first");
        history.record("second");
        preferences.set_history(&history);
        assert_eq!(preferences.history, vec!["second", "first"]);

        let restored = preferences.to_history();
        let collected: Vec<_> = restored.iter().collect();
        assert_eq!(collected, vec!["second", "first"]);
    }
}

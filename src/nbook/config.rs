//! # Configuration
//!
//! Settings live in `config.json` inside the configuration directory:
//!
//! 1. `$NBOOK_HOME` when set (handy for tests and portable installs).
//! 2. Otherwise the OS-appropriate config dir from the `directories` crate.
//!
//! A missing file means defaults. Unknown keys in the file are ignored and
//! missing keys take their default, so older files keep loading.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `file-ext` | `.nbk` | Extension offered for notebook files |
//! | `text-ext` | `.txt` | Extension offered for text exports |
//! | `help-url` | `https://e.sfu-kras.ru` | Page opened by the help command |
//! | `search-url` | `https://yandex.ru/search/` | Web-search endpoint |
//! | `lottery-odds` | `0.4` | Chance of winning the lottery |
//! | `use-editor` | `true` | Interactive shell edits notes in `$EDITOR` |

use crate::error::{NbookError, Result};
use crate::links::{DEFAULT_HELP_URL, DEFAULT_SEARCH_URL};
use crate::lottery::DEFAULT_WIN_ODDS;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
pub const HOME_ENV: &str = "NBOOK_HOME";

pub const KEYS: [&str; 6] = [
    "file-ext",
    "text-ext",
    "help-url",
    "search-url",
    "lottery-odds",
    "use-editor",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NbookConfig {
    pub file_ext: String,
    pub text_ext: String,
    pub help_url: String,
    pub search_url: String,
    pub lottery_odds: f64,
    pub use_editor: bool,
}

impl Default for NbookConfig {
    fn default() -> Self {
        Self {
            file_ext: ".nbk".to_string(),
            text_ext: ".txt".to_string(),
            help_url: DEFAULT_HELP_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            lottery_odds: DEFAULT_WIN_ODDS,
            use_editor: true,
        }
    }
}

/// Resolves the directory holding `config.json`.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(home) = env::var(HOME_ENV) {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    ProjectDirs::from("", "", "nbook")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| NbookError::Config("Unable to locate a home directory".to_string()))
}

fn normalize_ext(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}

impl NbookConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            log::debug!("no config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "file-ext" => Some(self.file_ext.clone()),
            "text-ext" => Some(self.text_ext.clone()),
            "help-url" => Some(self.help_url.clone()),
            "search-url" => Some(self.search_url.clone()),
            "lottery-odds" => Some(self.lottery_odds.to_string()),
            "use-editor" => Some(self.use_editor.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "file-ext" => self.file_ext = normalize_ext(value),
            "text-ext" => self.text_ext = normalize_ext(value),
            "help-url" => {
                crate::links::help_url(value)?;
                self.help_url = value.to_string();
            }
            "search-url" => {
                crate::links::search_url(value, "")?;
                self.search_url = value.to_string();
            }
            "lottery-odds" => {
                let odds: f64 = value.parse().map_err(|_| {
                    NbookError::Config(format!("lottery-odds must be a number, got '{}'", value))
                })?;
                if !(0.0..=1.0).contains(&odds) {
                    return Err(NbookError::Config(
                        "lottery-odds must be between 0 and 1".to_string(),
                    ));
                }
                self.lottery_odds = odds;
            }
            "use-editor" => {
                self.use_editor = match value {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => {
                        return Err(NbookError::Config(format!(
                            "use-editor must be true or false, got '{}'",
                            value
                        )))
                    }
                }
            }
            _ => return Err(NbookError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }

    /// All keys with their current values, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|k| self.get(k).map(|v| (*k, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = NbookConfig::default();
        assert_eq!(config.file_ext, ".nbk");
        assert_eq!(config.text_ext, ".txt");
        assert_eq!(config.lottery_odds, 0.4);
        assert!(config.use_editor);
    }

    #[test]
    fn test_set_ext_without_dot() {
        let mut config = NbookConfig::default();
        config.set("file-ext", "notes").unwrap();
        config.set("text-ext", ".md").unwrap();
        assert_eq!(config.file_ext, ".notes");
        assert_eq!(config.text_ext, ".md");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = NbookConfig::default();
        assert!(config.set("lottery-odds", "2").is_err());
        assert!(config.set("lottery-odds", "lots").is_err());
        assert!(config.set("use-editor", "maybe").is_err());
        assert!(config.set("search-url", "nope").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, NbookConfig::default());
    }

    #[test]
    fn test_get_unknown_key() {
        assert_eq!(NbookConfig::default().get("colour"), None);
    }

    #[test]
    fn test_entries_cover_every_key() {
        let entries = NbookConfig::default().entries();
        let keys: Vec<_> = entries.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, KEYS.to_vec());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = NbookConfig::load(dir.path().join("absent")).unwrap();
        assert_eq!(config, NbookConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();

        let mut config = NbookConfig::default();
        config.set("use-editor", "off").unwrap();
        config.set("lottery-odds", "0.75").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = NbookConfig::load(dir.path()).unwrap();
        assert!(!loaded.use_editor);
        assert_eq!(loaded.lottery_odds, 0.75);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"file_ext": ".book"}"#).unwrap();

        let loaded = NbookConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.file_ext, ".book");
        assert_eq!(loaded.search_url, DEFAULT_SEARCH_URL);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{not json").unwrap();
        assert!(matches!(
            NbookConfig::load(dir.path()),
            Err(NbookError::Serialization(_))
        ));
    }
}

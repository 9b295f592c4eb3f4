use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::error::ConfigError;
use crate::sentences::{Sentence, SentenceBank, DEFAULT_SENTENCES};
use crate::session::{GameConfig, DEFAULT_TIME_LIMIT_SECS};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub time_limit_secs: i64,
    pub sentences: Vec<Sentence>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_limit_secs: i64::from(DEFAULT_TIME_LIMIT_SECS),
            sentences: DEFAULT_SENTENCES.iter().copied().map(Sentence::from).collect(),
        }
    }
}

impl Config {
    /// Check the startup preconditions and build the pieces a session needs.
    pub fn validate(&self) -> Result<(GameConfig, SentenceBank), ConfigError> {
        let game = GameConfig::new(self.time_limit_secs)?;
        let bank = SentenceBank::new(self.sentences.clone())?;
        Ok((game, bank))
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "ignoring malformed config: {err}");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            time_limit_secs: 60,
            sentences: vec!["one two".into(), "three".into()],
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn malformed_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, b"{ not json").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, br#"{ "time_limit_secs": 45 }"#).unwrap();
        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.time_limit_secs, 45);
        assert_eq!(cfg.sentences.len(), 5);
    }

    #[test]
    fn sentences_serialize_as_plain_strings() {
        let cfg = Config {
            time_limit_secs: 10,
            sentences: vec!["hi".into()],
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(json, r#"{"time_limit_secs":10,"sentences":["hi"]}"#);
    }

    #[test]
    fn validate_reports_startup_errors() {
        let empty_pool = Config {
            sentences: vec![],
            ..Config::default()
        };
        assert_eq!(
            empty_pool.validate().unwrap_err(),
            ConfigError::EmptySentencePool
        );

        let zero_time = Config {
            time_limit_secs: 0,
            ..Config::default()
        };
        assert_eq!(
            zero_time.validate().unwrap_err(),
            ConfigError::NonPositiveTimeLimit(0)
        );

        let (game, bank) = Config::default().validate().unwrap();
        assert_eq!(game.time_limit_secs(), 30);
        assert_eq!(bank.len(), 5);
    }
}

use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::extract::ReadingStrategy;
use crate::source::ReadMode;

pub const DEFAULT_POS_TABLE: &str = "data/language/target-language-tags/en/parts_of_speech.json";
pub const DEFAULT_TERM_BANK_SIZE: usize = 25_000;
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100_000;
pub const DICT_DIR: &str = "dict";

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("missing required setting `{0}`")]
    Missing(&'static str),
}

/// Run settings read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub source_iso: String,
    pub target_iso: String,
    pub kaikki_file: PathBuf,
    pub temp_folder: PathBuf,
    pub pos_table: PathBuf,
    pub read_mode: ReadMode,
    pub term_bank_size: usize,
    pub progress_interval: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup, using the same keys as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let positive = |key: &str, default: usize| {
            lookup(key)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(default)
        };

        let source_iso = required("source_iso")?;
        let target_iso = required("target_iso")?;
        let kaikki_file = PathBuf::from(required("kaikki_file")?);
        let temp_folder = PathBuf::from(required("temp_folder")?);
        let pos_table = lookup("pos_table")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_POS_TABLE));
        let read_mode = lookup("kaikki_read_mode")
            .as_deref()
            .and_then(ReadMode::parse)
            .unwrap_or(ReadMode::Buffered);

        Ok(Self {
            source_iso,
            target_iso,
            kaikki_file,
            temp_folder,
            pos_table,
            read_mode,
            term_bank_size: positive("term_bank_size", DEFAULT_TERM_BANK_SIZE),
            progress_interval: positive("progress_interval", DEFAULT_PROGRESS_INTERVAL),
        })
    }

    /// Directory holding `index.json` and the term banks.
    pub fn dict_dir(&self) -> PathBuf {
        self.temp_folder.join(DICT_DIR)
    }

    pub fn reading_strategy(&self) -> ReadingStrategy {
        ReadingStrategy::for_language(&self.source_iso)
    }
}

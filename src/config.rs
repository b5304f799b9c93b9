use crate::app_dirs::AppDirs;
use crate::error::{Result, WordedError};
use crate::word_bank::{BuiltinList, Dataset};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_WORD_COUNT: usize = 10;
pub const DEFAULT_TICK_RATE: u32 = 60;
pub const DEFAULT_WORD_MAX: usize = 40;

/// Persisted defaults, overridden per run by the command line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub word_count: usize,
    pub tick_rate: u32,
    pub word_max: usize,
    pub builtin: BuiltinList,
    /// Takes precedence over `builtin` when set
    pub dataset: Option<PathBuf>,
    pub results_csv: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_count: DEFAULT_WORD_COUNT,
            tick_rate: DEFAULT_TICK_RATE,
            word_max: DEFAULT_WORD_MAX,
            builtin: BuiltinList::English,
            dataset: None,
            results_csv: None,
        }
    }
}

impl Config {
    pub fn dataset(&self) -> Dataset {
        match &self.dataset {
            Some(path) => Dataset::File(path.clone()),
            None => Dataset::Builtin(self.builtin),
        }
    }
}

/// Source of the persisted defaults
pub trait ConfigStore {
    fn load(&self) -> Config;
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
            Err(e) => {
                log::warn!(
                    "ignoring unreadable config '{}': {e}",
                    self.path.display()
                );
                Config::default()
            }
        }
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub seed: u64,
    pub word_count: usize,
    pub tick_rate: u32,
    pub word_max: usize,
    pub dataset: Dataset,
    pub results_csv: Option<PathBuf>,
}

impl RunConfig {
    pub fn from_config(cfg: &Config, seed: u64) -> Self {
        Self {
            seed,
            word_count: cfg.word_count,
            tick_rate: cfg.tick_rate,
            word_max: cfg.word_max,
            dataset: cfg.dataset(),
            results_csv: cfg.results_csv.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.word_count == 0 {
            return Err(WordedError::Config("word count must be positive".into()));
        }
        if self.tick_rate == 0 {
            return Err(WordedError::Config("tick rate must be positive".into()));
        }
        if self.word_max < 2 {
            return Err(WordedError::Config(format!(
                "max word length must be at least 2, got {}",
                self.word_max
            )));
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.tick_rate.max(1)))
    }
}

/// Seed derived from the wall clock, for runs without an explicit seed.
pub fn time_seed() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

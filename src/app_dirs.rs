use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        match ProjectDirs::from("", "", "worded") {
            Some(dirs) => dirs.config_dir().join("config.json"),
            None => PathBuf::from("worded_config.json"),
        }
    }

    /// Where `--save` appends results when no CSV path is given
    pub fn results_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("worded");
            Some(state_dir.join("results.csv"))
        } else {
            ProjectDirs::from("", "", "worded")
                .map(|dirs| dirs.data_local_dir().join("results.csv"))
        }
    }
}

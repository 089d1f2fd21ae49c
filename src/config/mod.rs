use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{app_data_dir, ensure_dir},
    errors::{EntryError, Result},
    storage::json_backend::{
        tmp_path, write_atomic, DEFAULT_CATEGORIES_FILE, DEFAULT_COLORS_FILE,
    },
};

const CONFIG_FILE: &str = "config.json";

/// User-tunable settings for storage location and logging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory holding the category files. Defaults to [`app_data_dir`].
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_categories_file")]
    pub categories_file: String,
    #[serde(default = "Config::default_colors_file")]
    pub colors_file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            categories_file: Self::default_categories_file(),
            colors_file: Self::default_colors_file(),
            log_filter: None,
        }
    }
}

impl Config {
    pub fn default_categories_file() -> String {
        DEFAULT_CATEGORIES_FILE.into()
    }

    pub fn default_colors_file() -> String {
        DEFAULT_COLORS_FILE.into()
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(app_data_dir)
    }
}

/// Loads and persists [`Config`] as pretty JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| {
                EntryError::Config(format!("{}: {}", self.path.display(), err))
            })
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

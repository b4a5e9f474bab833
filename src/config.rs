use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn default_per_page() -> usize {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Resource file opened when none is given on the command line
    #[serde(default)]
    pub resource_path: String,
    /// Page size for resources that do not set `perPage`
    #[serde(default = "default_per_page")]
    pub per_page: usize,
    /// Directory for log files; empty means `<config dir>/logs`
    #[serde(default)]
    pub log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resource_path: String::new(),
            per_page: default_per_page(),
            log_dir: String::new(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".schema-table"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the user config.
    ///
    /// `Ok(None)` when there is no config file yet. An unreadable or
    /// malformed file is an error; the caller decides how to report it.
    pub fn load() -> anyhow::Result<Option<Config>> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Option<Config>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Malformed config {}", path.display()))?;
        Ok(Some(config))
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Where logs go
    pub fn log_dir(&self) -> PathBuf {
        if !self.log_dir.is_empty() {
            return PathBuf::from(&self.log_dir);
        }
        Self::config_dir()
            .map(|dir| dir.join("logs"))
            .unwrap_or_else(|| env::temp_dir().join("schema-table"))
    }

    /// Resource to open: the command-line argument wins over the config
    pub fn resource_path(&self, arg: Option<String>) -> Option<PathBuf> {
        arg.or_else(|| (!self.resource_path.is_empty()).then(|| self.resource_path.clone()))
            .map(PathBuf::from)
    }
}

// src/infrastructure/config.rs
use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BATCH_DELAY_SECONDS, DEFAULT_BATCH_SIZE,
    DEFAULT_BROWSER_PATH, DEFAULT_CHECK_DIR, DEFAULT_EXCLUDED_EXTENSIONS,
    DEFAULT_FIRST_BATCH_ARGS, DEFAULT_NEXT_BATCH_ARGS, DEFAULT_SOURCE_FILE,
};
use crate::domain::{DomainError, Settings};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// TOML configuration for a run
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// File holding one URL per line
    pub source_path: PathBuf,
    /// Directory of already-downloaded files
    pub check_dir: PathBuf,
    pub batch_size: usize,
    pub delay_seconds: u64,
    pub browser_path: PathBuf,
    pub excluded_extensions: Vec<String>,
    pub first_batch_args: Vec<String>,
    pub next_batch_args: Vec<String>,
}

fn home_relative(path: &str) -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(path))
        .unwrap_or_else(|| PathBuf::from(path))
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_path: home_relative(DEFAULT_SOURCE_FILE),
            check_dir: home_relative(DEFAULT_CHECK_DIR),
            batch_size: DEFAULT_BATCH_SIZE,
            delay_seconds: DEFAULT_BATCH_DELAY_SECONDS,
            browser_path: PathBuf::from(DEFAULT_BROWSER_PATH),
            excluded_extensions: to_strings(DEFAULT_EXCLUDED_EXTENSIONS),
            first_batch_args: to_strings(DEFAULT_FIRST_BATCH_ARGS),
            next_batch_args: to_strings(DEFAULT_NEXT_BATCH_ARGS),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            DomainError::InvalidConfig(format!("{}: {}", path.display(), e.message()))
        })?;

        Ok(config)
    }

    /// Write as TOML; the inverse of `load`, used to produce config fixtures
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Resolve the config for this run.
    ///
    /// An explicit path must exist. Otherwise the per-user file is used when
    /// present, and built-in defaults when not.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(?path, "Loading config from explicit path");
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => {
                debug!(?path, "Loading user config");
                Self::load(&path)
            }
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check invariants and normalise into the settings the pipeline runs on.
    pub fn validate(self) -> Result<Settings, DomainError> {
        let batch_size = NonZeroUsize::new(self.batch_size).ok_or_else(|| {
            DomainError::InvalidConfig("batch_size must be at least 1".to_string())
        })?;

        let excluded_extensions = self
            .excluded_extensions
            .iter()
            .map(|ext| normalize_extension(ext))
            .filter(|ext| ext.len() > 1)
            .collect();

        Ok(Settings {
            backup_path: backup_path_for(&self.source_path),
            source_path: self.source_path,
            check_dir: self.check_dir,
            batch_size,
            batch_delay: Duration::from_secs(self.delay_seconds),
            browser_path: self.browser_path,
            excluded_extensions,
            first_batch_args: self.first_batch_args,
            next_batch_args: self.next_batch_args,
        })
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// `urls.txt` → `urls.txt.bak`, in the same directory
pub fn backup_path_for(source: &Path) -> PathBuf {
    let mut name = source
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(crate::constants::BACKUP_SUFFIX);
    source.with_file_name(name)
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

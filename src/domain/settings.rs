// src/domain/settings.rs
use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

/// Validated configuration the pipeline runs on
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub source_path: PathBuf,
    pub backup_path: PathBuf,
    pub check_dir: PathBuf,
    pub batch_size: NonZeroUsize,
    pub batch_delay: Duration,
    pub browser_path: PathBuf,
    /// Lowercase, each with a leading dot
    pub excluded_extensions: BTreeSet<String>,
    pub first_batch_args: Vec<String>,
    pub next_batch_args: Vec<String>,
}

// src/infrastructure/url_file.rs
use crate::application::UrlStore;
use crate::domain::{DomainError, Settings};
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use walkdir::WalkDir;

/// `UrlStore` backed by plain text files
#[derive(Debug, Clone)]
pub struct FsUrlStore {
    source_path: PathBuf,
    backup_path: PathBuf,
    check_dir: PathBuf,
}

impl FsUrlStore {
    pub fn new(
        source_path: impl AsRef<Path>,
        backup_path: impl AsRef<Path>,
        check_dir: impl AsRef<Path>,
    ) -> Self {
        Self {
            source_path: source_path.as_ref().to_path_buf(),
            backup_path: backup_path.as_ref().to_path_buf(),
            check_dir: check_dir.as_ref().to_path_buf(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.source_path, &settings.backup_path, &settings.check_dir)
    }
}

impl UrlStore for FsUrlStore {
    #[instrument(level = "debug", skip(self), fields(path = %self.source_path.display()))]
    fn read_lines(&self) -> Result<Vec<String>, DomainError> {
        let content = fs::read_to_string(&self.source_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DomainError::MissingFile(self.source_path.clone()),
            _ => DomainError::ReadFailure {
                path: self.source_path.clone(),
                source: e,
            },
        })?;
        let lines: Vec<String> = content.lines().map(str::to_string).collect();
        debug!(lines = lines.len(), "Read URL file");
        Ok(lines)
    }

    #[instrument(level = "debug", skip(self), fields(dir = %self.check_dir.display()))]
    fn existing_filenames(&self) -> Result<HashSet<String>, DomainError> {
        let mut names = HashSet::new();
        for entry in WalkDir::new(&self.check_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| DomainError::CheckDir {
                path: self.check_dir.clone(),
                reason: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.insert(name.to_string());
            }
        }
        debug!(files = names.len(), "Listed check directory");
        Ok(names)
    }

    #[instrument(level = "debug", skip(self))]
    fn backup(&self) -> Result<PathBuf, DomainError> {
        fs::copy(&self.source_path, &self.backup_path).map_err(|source| {
            DomainError::BackupFailure {
                from: self.source_path.clone(),
                to: self.backup_path.clone(),
                source,
            }
        })?;
        Ok(self.backup_path.clone())
    }

    #[instrument(level = "debug", skip(self))]
    fn truncate(&self) -> Result<(), DomainError> {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.source_path)
            .map_err(|source| DomainError::Truncate {
                path: self.source_path.clone(),
                source,
            })?;
        Ok(())
    }
}

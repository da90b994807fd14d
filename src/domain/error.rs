// src/domain/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Exit status for a run that completed, or had nothing to open.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit status for any fatal error.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status after SIGINT/SIGTERM (128 + SIGINT).
pub const EXIT_INTERRUPTED: u8 = 130;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("URL file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("Failed to read URL file {}: {source}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Browser binary not found or not executable: {}", .0.display())]
    BrowserNotFound(PathBuf),
    #[error("Failed to launch browser for batch {batch}: {source}")]
    LaunchFailure {
        batch: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to back up {} to {}: {source}", .from.display(), .to.display())]
    BackupFailure {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot read check directory {}: {reason}", .path.display())]
    CheckDir { path: PathBuf, reason: String },
    #[error("Failed while waiting for browser: {0}")]
    Wait(#[source] std::io::Error),
    #[error("Failed to clear URL file {}: {source}", .path.display())]
    Truncate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Interrupted")]
    Interrupted,
}

impl DomainError {
    pub fn exit_code(&self) -> u8 {
        match self {
            DomainError::Interrupted => EXIT_INTERRUPTED,
            _ => EXIT_FAILURE,
        }
    }
}

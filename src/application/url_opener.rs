// src/application/url_opener.rs
use crate::application::{BatchLauncher, BrowserLauncher, CompletionHandler, UrlFilter};
use crate::domain::{partition, DomainError, Settings};
use crate::util::cancel::{self, CancelToken};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// Flat-file side of a run: the URL list, its backup and the check directory
pub trait UrlStore {
    /// Raw lines of the URL file
    fn read_lines(&self) -> Result<Vec<String>, DomainError>;

    /// Names of regular files in the check directory
    fn existing_filenames(&self) -> Result<HashSet<String>, DomainError>;

    /// Copy the URL file byte for byte to its backup path
    fn backup(&self) -> Result<PathBuf, DomainError>;

    /// Empty the URL file without removing it
    fn truncate(&self) -> Result<(), DomainError>;
}

/// Why a run finished without opening anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// No non-blank lines
    NoUrls,
    /// Every URL was a duplicate, excluded, or already downloaded
    AllFiltered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    NothingToOpen(EmptyReason),
    Completed {
        opened: usize,
        batches: usize,
        backup: PathBuf,
    },
}

/// The whole pipeline: read, filter, back up, launch, wait, clear
pub struct UrlOpener<S: UrlStore, L: BrowserLauncher> {
    store: S,
    launcher: L,
    settings: Settings,
    cancel: CancelToken,
}

impl<S: UrlStore, L: BrowserLauncher> UrlOpener<S, L> {
    pub fn new(store: S, launcher: L, settings: Settings, cancel: CancelToken) -> Self {
        Self {
            store,
            launcher,
            settings,
            cancel,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    #[instrument(level = "debug", skip(self), fields(source = %self.settings.source_path.display()))]
    pub fn run(&mut self) -> Result<RunOutcome, DomainError> {
        let lines = self.store.read_lines()?;

        let filter = UrlFilter::new(&self.settings.excluded_extensions);
        let unique = filter.unique_entries(&lines);
        if unique.is_empty() {
            info!("No URLs in file");
            return Ok(RunOutcome::NothingToOpen(EmptyReason::NoUrls));
        }

        let allowed = filter.without_excluded_extensions(unique);
        if allowed.is_empty() {
            info!("No URLs to open after filtering");
            return Ok(RunOutcome::NothingToOpen(EmptyReason::AllFiltered));
        }

        let existing = filter.comparable_existing(&self.store.existing_filenames()?);
        let entries = filter.without_existing(allowed, &existing);
        if entries.is_empty() {
            info!("No URLs to open after filtering");
            return Ok(RunOutcome::NothingToOpen(EmptyReason::AllFiltered));
        }
        debug!(count = entries.len(), "URLs to open");

        self.launcher.verify()?;
        self.cancel.check()?;

        let backup = self.store.backup()?;
        info!(backup = %backup.display(), "Backed up URL file");

        let batches = partition(&entries, self.settings.batch_size);
        let mut processes = BatchLauncher::new(
            &mut self.launcher,
            &self.settings.first_batch_args,
            &self.settings.next_batch_args,
            self.settings.batch_delay,
            &self.cancel,
        )
        .launch_all(&batches)?;

        info!("All batches launched, waiting for the browser to close");
        CompletionHandler::new(&self.cancel, cancel::poll_interval()).wait_all(&mut processes)?;

        self.cancel.check()?;
        self.store.truncate()?;
        info!(opened = entries.len(), batches = batches.len(), "Cleared URL file");

        Ok(RunOutcome::Completed {
            opened: entries.len(),
            batches: batches.len(),
            backup,
        })
    }
}

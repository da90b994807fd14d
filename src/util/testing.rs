// src/util/testing.rs

use anyhow::Result;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{BrowserExit, BrowserLauncher, BrowserProcess, UrlStore};
use crate::domain::DomainError;
use crate::util::cancel::CancelToken;

/// Side effect observed by the mocks, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Read,
    ListedExisting,
    Verified,
    BackedUp,
    /// 1-based launch count
    Launched(usize),
    /// Exit of the process from the given launch
    Exited(usize),
    Truncated,
}

/// Event log shared between mocks so tests can assert cross-mock ordering
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Event>>>);

impl Journal {
    pub fn record(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }
}

/// In-memory `UrlStore`
///
/// # Examples
///
/// ```
/// use batchopen::application::UrlStore;
/// use batchopen::util::testing::MockUrlStore;
///
/// let store = MockUrlStore::builder()
///     .with_lines(vec!["https://example.com/a.jpg".to_string()])
///     .with_existing(&["b.jpg"])
///     .build();
///
/// assert_eq!(store.read_lines().unwrap().len(), 1);
/// store.truncate().unwrap();
/// assert!(store.truncated());
/// ```
pub struct MockUrlStore {
    lines: Option<Vec<String>>,
    existing: HashSet<String>,
    backup_fails: bool,
    backed_up: Cell<bool>,
    truncated: Cell<bool>,
    journal: Journal,
}

impl MockUrlStore {
    pub fn builder() -> MockUrlStoreBuilder {
        MockUrlStoreBuilder::new()
    }

    pub fn backed_up(&self) -> bool {
        self.backed_up.get()
    }

    pub fn truncated(&self) -> bool {
        self.truncated.get()
    }
}

impl UrlStore for MockUrlStore {
    fn read_lines(&self) -> Result<Vec<String>, DomainError> {
        self.journal.record(Event::Read);
        self.lines
            .clone()
            .ok_or_else(|| DomainError::MissingFile(PathBuf::from("mock/urls.txt")))
    }

    fn existing_filenames(&self) -> Result<HashSet<String>, DomainError> {
        self.journal.record(Event::ListedExisting);
        Ok(self.existing.clone())
    }

    fn backup(&self) -> Result<PathBuf, DomainError> {
        if self.backup_fails {
            return Err(DomainError::BackupFailure {
                from: PathBuf::from("mock/urls.txt"),
                to: PathBuf::from("mock/urls.txt.bak"),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            });
        }
        self.journal.record(Event::BackedUp);
        self.backed_up.set(true);
        Ok(PathBuf::from("/tmp/urls.txt.bak"))
    }

    fn truncate(&self) -> Result<(), DomainError> {
        self.journal.record(Event::Truncated);
        self.truncated.set(true);
        Ok(())
    }
}

/// Builder for MockUrlStore
pub struct MockUrlStoreBuilder {
    lines: Option<Vec<String>>,
    existing: HashSet<String>,
    backup_fails: bool,
    journal: Journal,
}

impl MockUrlStoreBuilder {
    pub fn new() -> Self {
        Self {
            lines: Some(Vec::new()),
            existing: HashSet::new(),
            backup_fails: false,
            journal: Journal::default(),
        }
    }

    /// Contents of the URL file, one entry per line
    pub fn with_lines(mut self, lines: Vec<String>) -> Self {
        self.lines = Some(lines);
        self
    }

    /// Make read_lines fail with MissingFile
    pub fn with_missing_file(mut self) -> Self {
        self.lines = None;
        self
    }

    /// File names present in the check directory
    pub fn with_existing(mut self, names: &[&str]) -> Self {
        self.existing.extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn with_backup_failure(mut self) -> Self {
        self.backup_fails = true;
        self
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    pub fn build(self) -> MockUrlStore {
        MockUrlStore {
            lines: self.lines,
            existing: self.existing,
            backup_fails: self.backup_fails,
            backed_up: Cell::new(false),
            truncated: Cell::new(false),
            journal: self.journal,
        }
    }
}

impl Default for MockUrlStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Browser process that exits after a fixed number of polls
pub struct MockProcess {
    id: u32,
    polls_before_exit: Option<usize>,
    code: Option<i32>,
    polls: usize,
    journal: Option<Journal>,
}

impl MockProcess {
    pub fn new(id: u32, polls_before_exit: usize, code: Option<i32>) -> Self {
        Self {
            id,
            polls_before_exit: Some(polls_before_exit),
            code,
            polls: 0,
            journal: None,
        }
    }

    pub fn never_exiting(id: u32) -> Self {
        Self {
            id,
            polls_before_exit: None,
            code: None,
            polls: 0,
            journal: None,
        }
    }

    /// Number of try_wait calls so far
    pub fn polls(&self) -> usize {
        self.polls
    }
}

impl BrowserProcess for MockProcess {
    fn id(&self) -> u32 {
        self.id
    }

    fn try_wait(&mut self) -> std::io::Result<Option<BrowserExit>> {
        self.polls += 1;
        match self.polls_before_exit {
            Some(limit) if self.polls > limit => {
                if let Some(journal) = &self.journal {
                    journal.record(Event::Exited(self.id as usize));
                }
                Ok(Some(BrowserExit { code: self.code }))
            }
            _ => Ok(None),
        }
    }
}

/// `BrowserLauncher` that records argument lists instead of spawning
pub struct MockLauncher {
    browser_missing: bool,
    fail_at: Option<usize>,
    cancel_after: Option<(usize, CancelToken)>,
    never_exit: bool,
    exit_code: Option<i32>,
    launches: Vec<Vec<String>>,
    journal: Journal,
}

impl MockLauncher {
    pub fn builder() -> MockLauncherBuilder {
        MockLauncherBuilder::new()
    }

    /// Argument lists of successful launches, in order
    pub fn launches(&self) -> Vec<Vec<String>> {
        self.launches.clone()
    }
}

impl BrowserLauncher for MockLauncher {
    type Process = MockProcess;

    fn verify(&self) -> Result<(), DomainError> {
        if self.browser_missing {
            return Err(DomainError::BrowserNotFound(PathBuf::from("mock/browser")));
        }
        self.journal.record(Event::Verified);
        Ok(())
    }

    fn launch(&mut self, args: &[String]) -> std::io::Result<MockProcess> {
        let number = self.launches.len() + 1;
        if self.fail_at == Some(number) {
            return Err(std::io::Error::from(std::io::ErrorKind::NotFound));
        }
        self.launches.push(args.to_vec());
        self.journal.record(Event::Launched(number));

        if let Some((after, token)) = &self.cancel_after {
            if *after == number {
                token.cancel();
            }
        }

        let mut process = if self.never_exit {
            MockProcess::never_exiting(number as u32)
        } else {
            MockProcess::new(number as u32, 0, self.exit_code)
        };
        process.journal = Some(self.journal.clone());
        Ok(process)
    }
}

/// Builder for MockLauncher
pub struct MockLauncherBuilder {
    browser_missing: bool,
    fail_at: Option<usize>,
    cancel_after: Option<(usize, CancelToken)>,
    never_exit: bool,
    exit_code: Option<i32>,
    journal: Journal,
}

impl MockLauncherBuilder {
    pub fn new() -> Self {
        Self {
            browser_missing: false,
            fail_at: None,
            cancel_after: None,
            never_exit: false,
            exit_code: Some(0),
            journal: Journal::default(),
        }
    }

    /// Make verify fail with BrowserNotFound
    pub fn with_missing_browser(mut self) -> Self {
        self.browser_missing = true;
        self
    }

    /// Fail the launch of the given 1-based batch
    pub fn with_launch_failure_at(mut self, batch: usize) -> Self {
        self.fail_at = Some(batch);
        self
    }

    /// Raise `token` right after the given 1-based launch, as a signal would
    pub fn with_cancel_after_launch(mut self, batch: usize, token: CancelToken) -> Self {
        self.cancel_after = Some((batch, token));
        self
    }

    pub fn with_processes_never_exiting(mut self) -> Self {
        self.never_exit = true;
        self
    }

    pub fn with_exit_code(mut self, code: Option<i32>) -> Self {
        self.exit_code = code;
        self
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    pub fn build(self) -> MockLauncher {
        MockLauncher {
            browser_missing: self.browser_missing,
            fail_at: self.fail_at,
            cancel_after: self.cancel_after,
            never_exit: self.never_exit,
            exit_code: self.exit_code,
            launches: Vec::new(),
            journal: self.journal,
        }
    }
}

impl Default for MockLauncherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

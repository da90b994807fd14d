// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod util;

use anyhow::{Context, Result};
use application::{RunOutcome, UrlOpener};
use domain::Settings;
use infrastructure::{Config, FsUrlStore, ProcessLauncher, SignalGuard};
use tracing::debug;
use util::cancel::CancelToken;

use crate::cli::args::Args;

pub fn run(args: Args) -> Result<RunOutcome> {
    debug!(?args, "Starting batchopen with arguments");

    let config = Config::resolve(args.config.as_deref())?;
    let settings = config.validate()?;
    debug!(?settings, "Resolved settings");

    let cancel = CancelToken::new();
    let _signals =
        SignalGuard::install(cancel.clone()).context("Failed to install signal handlers")?;

    Ok(open_urls(settings, cancel)?)
}

/// Run the pipeline against the real filesystem and browser binary.
///
/// `cancel` is polled during the batch delay and while waiting for the browser.
pub fn open_urls(settings: Settings, cancel: CancelToken) -> Result<RunOutcome, domain::DomainError> {
    let store = FsUrlStore::from_settings(&settings);
    let launcher = ProcessLauncher::new(&settings.browser_path);
    UrlOpener::new(store, launcher, settings, cancel).run()
}

// src/application/batch_launcher.rs
use crate::domain::{Batch, DomainError};
use crate::util::cancel::CancelToken;
use std::time::Duration;
use tracing::{debug, info};

/// How a browser process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserExit {
    /// `None` when the process was killed by a signal
    pub code: Option<i32>,
}

impl BrowserExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// A running browser invocation
pub trait BrowserProcess {
    fn id(&self) -> u32;

    /// Non-blocking exit check
    fn try_wait(&mut self) -> std::io::Result<Option<BrowserExit>>;
}

/// Starts browser processes
pub trait BrowserLauncher {
    type Process: BrowserProcess;

    /// Fail with `BrowserNotFound` if the binary cannot be run at all
    fn verify(&self) -> Result<(), DomainError>;

    /// Spawn the browser with `args` without waiting for it
    fn launch(&mut self, args: &[String]) -> std::io::Result<Self::Process>;
}

/// Launches batches one after another, pausing in between
pub struct BatchLauncher<'a, L: BrowserLauncher> {
    launcher: &'a mut L,
    first_batch_args: &'a [String],
    next_batch_args: &'a [String],
    delay: Duration,
    cancel: &'a CancelToken,
}

impl<'a, L: BrowserLauncher> BatchLauncher<'a, L> {
    pub fn new(
        launcher: &'a mut L,
        first_batch_args: &'a [String],
        next_batch_args: &'a [String],
        delay: Duration,
        cancel: &'a CancelToken,
    ) -> Self {
        Self {
            launcher,
            first_batch_args,
            next_batch_args,
            delay,
            cancel,
        }
    }

    /// Launch every batch in order and return the spawned processes.
    ///
    /// Stops at the first spawn failure or cancellation; processes already
    /// started are left running.
    pub fn launch_all(&mut self, batches: &[Batch]) -> Result<Vec<L::Process>, DomainError> {
        let mut processes = Vec::with_capacity(batches.len());

        for (index, batch) in batches.iter().enumerate() {
            self.cancel.check()?;

            let args = self.command_args(batch);
            let process = self
                .launcher
                .launch(&args)
                .map_err(|source| DomainError::LaunchFailure {
                    batch: batch.number,
                    source,
                })?;
            info!(
                batch = batch.number,
                of = batches.len(),
                urls = batch.len(),
                pid = process.id(),
                "Launched browser batch"
            );
            processes.push(process);

            if index + 1 < batches.len() {
                debug!(delay_secs = self.delay.as_secs(), "Waiting before next batch");
                self.cancel.sleep(self.delay)?;
            }
        }

        Ok(processes)
    }

    fn command_args(&self, batch: &Batch) -> Vec<String> {
        let leading = if batch.number == 1 {
            self.first_batch_args
        } else {
            self.next_batch_args
        };
        leading
            .iter()
            .cloned()
            .chain(batch.urls().map(str::to_string))
            .collect()
    }
}

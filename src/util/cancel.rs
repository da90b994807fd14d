// src/util/cancel.rs
use crate::constants::CANCEL_POLL_INTERVAL_MS;
use crate::domain::DomainError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared flag raised when the user asks the run to stop.
///
/// Cloning shares the flag; the signal thread holds one clone and the
/// pipeline polls another.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// `Err(Interrupted)` once cancelled
    pub fn check(&self) -> Result<(), DomainError> {
        if self.is_cancelled() {
            Err(DomainError::Interrupted)
        } else {
            Ok(())
        }
    }

    /// Sleep for `duration`, waking early with `Err(Interrupted)` on cancellation.
    ///
    /// A duration too large to represent as a deadline sleeps until cancelled.
    pub fn sleep(&self, duration: Duration) -> Result<(), DomainError> {
        let deadline = Instant::now().checked_add(duration);
        loop {
            self.check()?;
            let step = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Ok(());
                    }
                    poll_interval().min(deadline - now)
                }
                None => poll_interval(),
            };
            std::thread::sleep(step);
        }
    }
}

pub fn poll_interval() -> Duration {
    Duration::from_millis(CANCEL_POLL_INTERVAL_MS)
}

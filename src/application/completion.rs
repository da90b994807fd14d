// src/application/completion.rs
use crate::application::{BrowserExit, BrowserProcess};
use crate::domain::DomainError;
use crate::util::cancel::CancelToken;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Blocks until every launched browser process has exited
pub struct CompletionHandler<'a> {
    cancel: &'a CancelToken,
    poll_interval: Duration,
}

impl<'a> CompletionHandler<'a> {
    pub fn new(cancel: &'a CancelToken, poll_interval: Duration) -> Self {
        Self {
            cancel,
            poll_interval,
        }
    }

    /// Wait for the processes in launch order.
    ///
    /// Returns `Interrupted` as soon as cancellation is observed; processes
    /// still running are not touched.
    pub fn wait_all<P: BrowserProcess>(&self, processes: &mut [P]) -> Result<Vec<BrowserExit>, DomainError> {
        let mut exits = Vec::with_capacity(processes.len());
        for process in processes.iter_mut() {
            let exit = self.wait_one(process)?;
            if exit.success() {
                debug!(pid = process.id(), "Browser process exited");
            } else {
                warn!(pid = process.id(), code = ?exit.code, "Browser process exited abnormally");
            }
            exits.push(exit);
        }
        info!(processes = exits.len(), "Browser closed");
        Ok(exits)
    }

    fn wait_one<P: BrowserProcess>(&self, process: &mut P) -> Result<BrowserExit, DomainError> {
        loop {
            self.cancel.check()?;
            if let Some(exit) = process.try_wait().map_err(DomainError::Wait)? {
                return Ok(exit);
            }
            std::thread::sleep(self.poll_interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::MockProcess;

    #[test]
    fn given_processes_that_exit_when_waiting_then_returns_exit_per_process() {
        let cancel = CancelToken::new();
        let handler = CompletionHandler::new(&cancel, Duration::from_millis(1));
        let mut processes = vec![MockProcess::new(1, 3, Some(0)), MockProcess::new(2, 0, Some(4))];

        let exits = handler.wait_all(&mut processes).expect("wait should succeed");

        assert_eq!(exits, vec![BrowserExit { code: Some(0) }, BrowserExit { code: Some(4) }]);
        assert_eq!(processes[0].polls(), 4);
    }

    #[test]
    fn given_cancelled_token_when_waiting_then_returns_interrupted() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let handler = CompletionHandler::new(&cancel, Duration::from_millis(1));
        let mut processes = vec![MockProcess::never_exiting(7)];

        let result = handler.wait_all(&mut processes);

        assert!(matches!(result, Err(DomainError::Interrupted)));
    }

    #[test]
    fn given_cancel_while_process_running_when_waiting_then_stops_polling() {
        let cancel = CancelToken::new();
        let remote = cancel.clone();
        let handler = CompletionHandler::new(&cancel, Duration::from_millis(5));
        let mut processes = vec![MockProcess::never_exiting(7)];
        let canceller = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(30));
            remote.cancel();
        });

        let result = handler.wait_all(&mut processes);
        canceller.join().unwrap();

        assert!(matches!(result, Err(DomainError::Interrupted)));
    }

    #[test]
    fn given_no_processes_when_waiting_then_returns_empty() {
        let cancel = CancelToken::new();
        let handler = CompletionHandler::new(&cancel, Duration::from_millis(1));
        let mut processes: Vec<MockProcess> = Vec::new();

        assert!(handler.wait_all(&mut processes).unwrap().is_empty());
    }
}

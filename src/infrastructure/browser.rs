// src/infrastructure/browser.rs
use crate::application::{BrowserExit, BrowserLauncher, BrowserProcess};
use crate::domain::DomainError;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use tracing::{debug, instrument};

/// Launches the real browser binary as a child process
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    browser_path: PathBuf,
}

impl ProcessLauncher {
    pub fn new(browser_path: impl AsRef<Path>) -> Self {
        Self {
            browser_path: browser_path.as_ref().to_path_buf(),
        }
    }

    /// Absolute location of the binary, searching `PATH` for bare names
    pub fn resolve(&self) -> Option<PathBuf> {
        let is_bare_name = self.browser_path.components().count() == 1;
        if is_bare_name && !self.browser_path.exists() {
            let search = std::env::var_os("PATH")?;
            return std::env::split_paths(&search)
                .map(|dir| dir.join(&self.browser_path))
                .find(|candidate| is_executable(candidate));
        }
        is_executable(&self.browser_path).then(|| self.browser_path.clone())
    }
}

impl BrowserLauncher for ProcessLauncher {
    type Process = Child;

    #[instrument(level = "debug", skip(self), fields(browser = %self.browser_path.display()))]
    fn verify(&self) -> Result<(), DomainError> {
        let resolved = self
            .resolve()
            .ok_or_else(|| DomainError::BrowserNotFound(self.browser_path.clone()))?;
        debug!(?resolved, "Browser binary found");
        Ok(())
    }

    fn launch(&mut self, args: &[String]) -> std::io::Result<Child> {
        debug!(browser = %self.browser_path.display(), ?args, "Spawning browser");
        Command::new(&self.browser_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
    }
}

impl BrowserProcess for Child {
    fn id(&self) -> u32 {
        Child::id(self)
    }

    fn try_wait(&mut self) -> std::io::Result<Option<BrowserExit>> {
        Ok(Child::try_wait(self)?.map(|status| BrowserExit {
            code: status.code(),
        }))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

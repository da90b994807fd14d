use anyhow::{Context, Result};
use batchopen::domain::Settings;
use batchopen::infrastructure::Config;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

/// Temporary URL file, check directory and browser log for one test
#[allow(dead_code)]
pub struct TestWorkspace {
    _temp_dir: TempDir,
    pub root: PathBuf,
    pub source_path: PathBuf,
    pub backup_path: PathBuf,
    pub check_dir: PathBuf,
    pub browser_log: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let root = temp_dir.path().to_path_buf();
        let check_dir = root.join("downloads");
        std::fs::create_dir_all(&check_dir).context("Failed to create check directory")?;

        Ok(Self {
            source_path: root.join("urls.txt"),
            backup_path: root.join("urls.txt.bak"),
            browser_log: root.join("browser.log"),
            check_dir,
            root,
            _temp_dir: temp_dir,
        })
    }

    pub fn write_urls(&self, content: &str) -> Result<()> {
        std::fs::write(&self.source_path, content).context("Failed to write URL file")
    }

    pub fn add_existing(&self, name: &str) -> Result<()> {
        std::fs::write(self.check_dir.join(name), b"downloaded").context("Failed to add file")
    }

    pub fn source_content(&self) -> String {
        std::fs::read_to_string(&self.source_path).unwrap_or_default()
    }

    /// Settings that use `/bin/sh` as the browser; every invocation appends
    /// its role (`first`/`next`) and its URLs to `browser_log`.
    pub fn shell_settings(&self, batch_size: usize, delay: Duration) -> Settings {
        let mut settings = self
            .shell_config(batch_size, 0)
            .validate()
            .expect("test config should be valid");
        settings.batch_delay = delay;
        settings
    }

    pub fn shell_config(&self, batch_size: usize, delay_seconds: u64) -> Config {
        let script = format!(
            "printf '%s\\n' \"$0\" \"$@\" >> '{}'",
            self.browser_log.display()
        );
        Config {
            source_path: self.source_path.clone(),
            check_dir: self.check_dir.clone(),
            batch_size,
            delay_seconds,
            browser_path: PathBuf::from("/bin/sh"),
            excluded_extensions: vec![".webp".to_string(), ".tiff".to_string(), ".bmp".to_string()],
            first_batch_args: vec!["-c".to_string(), script.clone(), "first".to_string()],
            next_batch_args: vec!["-c".to_string(), script, "next".to_string()],
        }
    }

    /// Write `config` as TOML into the workspace and return its path
    pub fn write_config(&self, config: &Config) -> Result<PathBuf> {
        let path = self.root.join("config.toml");
        config.save(&path)?;
        Ok(path)
    }

    /// Browser invocations from the log, each as `[role, url...]`
    pub fn browser_invocations(&self) -> Vec<Vec<String>> {
        let content = std::fs::read_to_string(&self.browser_log).unwrap_or_default();
        let mut invocations: Vec<Vec<String>> = Vec::new();
        for line in content.lines() {
            if line == "first" || line == "next" {
                invocations.push(vec![line.to_string()]);
            } else if let Some(current) = invocations.last_mut() {
                current.push(line.to_string());
            }
        }
        invocations
    }
}

/// `count` distinct image URLs
#[allow(dead_code)]
pub fn image_urls(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("https://img.example.com/gallery/{i:03}.jpg"))
        .collect()
}

// src/constants.rs
//
// Defaults used when no config file overrides them.

/// URL list, relative to the home directory.
pub const DEFAULT_SOURCE_FILE: &str = "dir/urls.txt";

/// Directory whose files mark URLs as already downloaded, relative to the home directory.
pub const DEFAULT_CHECK_DIR: &str = "dir";

/// URLs handed to the browser per invocation.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Pause between two batch launches.
///
/// Opening dozens of tabs at once makes the browser stall on window creation.
pub const DEFAULT_BATCH_DELAY_SECONDS: u64 = 60;

pub const DEFAULT_BROWSER_PATH: &str = "/usr/bin/floorp";

pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[".webp", ".tiff", ".bmp"];

/// Arguments placed before the URLs of the first batch.
pub const DEFAULT_FIRST_BATCH_ARGS: &[&str] = &["--new-instance"];

/// Arguments placed before the URLs of every later batch.
pub const DEFAULT_NEXT_BATCH_ARGS: &[&str] = &["--new-tab"];

/// Appended to the source file name to form the backup's file name.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Config file name inside `<config_dir>/batchopen/`.
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const APP_DIR_NAME: &str = "batchopen";

/// Granularity at which sleeps and process waits re-check for cancellation.
///
/// Used in: `util/cancel.rs`, `application/url_opener.rs`
pub const CANCEL_POLL_INTERVAL_MS: u64 = 100;

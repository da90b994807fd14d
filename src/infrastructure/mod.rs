// src/infrastructure/mod.rs
pub mod browser;
pub mod config;
pub mod signal;
pub mod url_file;

pub use browser::ProcessLauncher;
pub use config::Config;
pub use signal::SignalGuard;
pub use url_file::FsUrlStore;

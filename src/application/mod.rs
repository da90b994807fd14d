// src/application/mod.rs
pub mod batch_launcher;
pub mod completion;
pub mod url_filter;
pub mod url_opener;

pub use batch_launcher::{BatchLauncher, BrowserExit, BrowserLauncher, BrowserProcess};
pub use completion::CompletionHandler;
pub use url_filter::UrlFilter;
pub use url_opener::{EmptyReason, RunOutcome, UrlOpener, UrlStore};

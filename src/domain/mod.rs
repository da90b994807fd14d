// src/domain/mod.rs
pub mod batch;
pub mod error;
pub mod settings;
pub mod url_entry;

pub use batch::{partition, Batch};
pub use error::DomainError;
pub use settings::Settings;
pub use url_entry::UrlEntry;

// src/domain/batch.rs
use crate::domain::UrlEntry;
use std::num::NonZeroUsize;

/// A group of URLs handed to one browser invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// 1-based position in launch order
    pub number: usize,
    pub entries: Vec<UrlEntry>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(UrlEntry::as_str)
    }
}

/// Split `entries` into consecutive batches of `size`; only the last may be shorter.
pub fn partition(entries: &[UrlEntry], size: NonZeroUsize) -> Vec<Batch> {
    entries
        .chunks(size.get())
        .enumerate()
        .map(|(index, chunk)| Batch {
            number: index + 1,
            entries: chunk.to_vec(),
        })
        .collect()
}

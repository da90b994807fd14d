// src/application/url_filter.rs
use crate::domain::UrlEntry;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, trace};

/// Turns raw file lines into the ordered set of URLs worth opening
pub struct UrlFilter<'a> {
    excluded_extensions: &'a BTreeSet<String>,
}

impl<'a> UrlFilter<'a> {
    /// `excluded_extensions` must be lowercase with a leading dot.
    pub fn new(excluded_extensions: &'a BTreeSet<String>) -> Self {
        Self {
            excluded_extensions,
        }
    }

    /// Run every stage: trim, dedupe, drop excluded extensions, drop
    /// URLs whose basename is already among `existing_files`.
    pub fn apply<S: AsRef<str>>(&self, lines: &[S], existing_files: &HashSet<String>) -> Vec<UrlEntry> {
        let unique = self.unique_entries(lines);
        let allowed = self.without_excluded_extensions(unique);
        let existing = self.comparable_existing(existing_files);
        self.without_existing(allowed, &existing)
    }

    /// Trim lines, drop blanks and repeats. First occurrence keeps its position.
    pub fn unique_entries<S: AsRef<str>>(&self, lines: &[S]) -> Vec<UrlEntry> {
        let mut seen = HashSet::new();
        let entries: Vec<UrlEntry> = lines
            .iter()
            .filter_map(|line| UrlEntry::from_line(line.as_ref()))
            .filter(|entry| seen.insert(entry.clone()))
            .collect();
        debug!(lines = lines.len(), unique = entries.len(), "Deduplicated URL lines");
        entries
    }

    pub fn without_excluded_extensions(&self, entries: Vec<UrlEntry>) -> Vec<UrlEntry> {
        entries
            .into_iter()
            .filter(|entry| match entry.extension() {
                Some(ext) if self.excluded_extensions.contains(&ext) => {
                    trace!(url = %entry, %ext, "Skipping excluded extension");
                    false
                }
                _ => true,
            })
            .collect()
    }

    /// Existing file names minus those carrying an excluded extension
    pub fn comparable_existing(&self, existing_files: &HashSet<String>) -> HashSet<String> {
        existing_files
            .iter()
            .filter(|name| !self.is_excluded_name(name))
            .cloned()
            .collect()
    }

    pub fn without_existing(&self, entries: Vec<UrlEntry>, existing: &HashSet<String>) -> Vec<UrlEntry> {
        entries
            .into_iter()
            .filter(|entry| {
                let name = entry.lookup_name();
                if existing.contains(&name) {
                    trace!(url = %entry, %name, "Skipping already downloaded");
                    false
                } else {
                    true
                }
            })
            .collect()
    }

    fn is_excluded_name(&self, name: &str) -> bool {
        match name.rfind('.') {
            Some(dot) if dot > 0 => self
                .excluded_extensions
                .contains(&name[dot..].to_lowercase()),
            _ => false,
        }
    }
}

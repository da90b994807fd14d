// src/domain/url_entry.rs
use std::fmt;
use url::Url;

/// One trimmed, non-empty line of the URL file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlEntry(String);

impl UrlEntry {
    /// Trim `line`, returning `None` for blank lines.
    pub fn from_line(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final segment of the URL path, percent-decoded.
    ///
    /// Entries without a scheme (`host.com/dir/file.jpg`) are treated as
    /// `host/path`. Returns `None` when there is no path or the path ends in `/`.
    pub fn basename(&self) -> Option<String> {
        let path = path_component(&self.0)?;
        let segment = path.rsplit('/').next().filter(|s| !s.is_empty())?;
        let decoded = urlencoding::decode(segment)
            .map(|cow| cow.into_owned())
            .unwrap_or_else(|_| segment.to_string());
        Some(decoded)
    }

    /// Lowercased suffix of the basename including the dot, e.g. `.webp`.
    pub fn extension(&self) -> Option<String> {
        let name = self.basename()?;
        let dot = name.rfind('.')?;
        // `.hidden` has no extension, neither does `name.`
        if dot == 0 || dot + 1 == name.len() {
            return None;
        }
        Some(name[dot..].to_lowercase())
    }

    /// Name compared against files in the check directory.
    ///
    /// Falls back to the raw entry when no basename can be derived.
    pub fn lookup_name(&self) -> String {
        self.basename().unwrap_or_else(|| self.0.clone())
    }
}

impl fmt::Display for UrlEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UrlEntry {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn path_component(raw: &str) -> Option<String> {
    match Url::parse(raw) {
        // `host:port/path` parses as scheme `host` with an opaque path
        Ok(url) if url.cannot_be_a_base() => path_from_first_slash(url.path()),
        Ok(url) => Some(url.path().to_string()),
        Err(_) => {
            let end = raw.find(['?', '#']).unwrap_or(raw.len());
            path_from_first_slash(&raw[..end])
        }
    }
}

fn path_from_first_slash(text: &str) -> Option<String> {
    text.find('/').map(|start| text[start..].to_string())
}

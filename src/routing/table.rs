//! Lookup table construction.
//!
//! # Responsibilities
//! - Accept a ready-made path → URL mapping as-is
//! - Decode YAML/JSON redirect documents into ordered records
//! - Fold records into the table (later duplicates overwrite earlier ones)
//!
//! # Design Decisions
//! - Paths and targets are stored verbatim: no normalization, no URL checks
//! - Decode failures are returned to the caller, never panicked on
//! - The table is only mutable while it is being built; it is frozen once
//!   wrapped in an `Arc` and handed to the server

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A single path → target record, as it appears in a redirect document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RedirectEntry {
    /// Request path to match exactly (e.g. `/some-path`).
    pub path: String,

    /// Redirect destination. Documents call this field `url`.
    #[serde(rename = "url", alias = "target")]
    pub target: String,
}

impl RedirectEntry {
    pub fn new(path: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            target: target.into(),
        }
    }
}

/// Error returned when a redirect document cannot be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid YAML redirect document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON redirect document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encoding of a redirect document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Infer the format from a file extension (`.yaml`, `.yml`, `.json`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Decode raw document bytes into the ordered record sequence.
    pub fn decode(self, document: &[u8]) -> Result<Vec<RedirectEntry>, DecodeError> {
        if document.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        // A null document (`~`, `null`) is an empty sequence
        let entries: Option<Vec<RedirectEntry>> = match self {
            Self::Yaml => serde_yaml::from_slice(document)?,
            Self::Json => serde_json::from_slice(document)?,
        };
        Ok(entries.unwrap_or_default())
    }
}

/// Immutable mapping from request path to redirect target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTable {
    entries: HashMap<String, String>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing mapping as the table, unchanged.
    pub fn from_map(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Build a table from a YAML document.
    ///
    /// ```yaml
    /// - path: /some-path
    ///   url: https://www.some-url.com/demo
    /// ```
    pub fn from_yaml(document: &[u8]) -> Result<Self, DecodeError> {
        Self::from_document(document, DocumentFormat::Yaml)
    }

    /// Build a table from a JSON array of `{"path": .., "url": ..}` objects.
    pub fn from_json(document: &[u8]) -> Result<Self, DecodeError> {
        Self::from_document(document, DocumentFormat::Json)
    }

    pub fn from_document(document: &[u8], format: DocumentFormat) -> Result<Self, DecodeError> {
        Ok(format.decode(document)?.into_iter().collect())
    }

    /// Set the target for `path`, replacing any previous target.
    pub fn insert(&mut self, path: impl Into<String>, target: impl Into<String>) {
        self.entries.insert(path.into(), target.into());
    }

    /// Fold records into the table in order. Last write wins.
    pub fn extend_from<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = RedirectEntry>,
    {
        for RedirectEntry { path, target } in records {
            self.entries.insert(path, target);
        }
    }

    /// Exact-match lookup.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, t)| (p.as_str(), t.as_str()))
    }

    /// Entries sorted by path, for stable display.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by_key(|(path, _)| *path);
        entries
    }
}

impl From<HashMap<String, String>> for LookupTable {
    fn from(entries: HashMap<String, String>) -> Self {
        Self::from_map(entries)
    }
}

impl FromIterator<RedirectEntry> for LookupTable {
    fn from_iter<I: IntoIterator<Item = RedirectEntry>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend_from(iter);
        table
    }
}

//! Redirect lookup and dispatch.
//!
//! # Responsibilities
//! - Hold the lookup table shared by all requests
//! - Resolve a request path to a target or an explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) exact-match lookup via HashMap
//! - Explicit `Unmatched` rather than an empty target, so callers pick
//!   exactly one response path

use std::sync::Arc;

use crate::routing::table::LookupTable;

/// Outcome of resolving a path against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The path is a key; redirect to this target.
    Matched(&'a str),
    /// No entry; the fallback handles the request.
    Unmatched,
}

/// Dispatcher over a frozen lookup table.
#[derive(Debug, Clone, Default)]
pub struct Router {
    table: Arc<LookupTable>,
}

impl Router {
    pub fn new(table: impl Into<Arc<LookupTable>>) -> Self {
        Self {
            table: table.into(),
        }
    }

    /// Resolve `path` by exact string comparison.
    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        match self.table.get(path) {
            Some(target) => Resolution::Matched(target),
            None => Resolution::Unmatched,
        }
    }

    pub fn table(&self) -> &LookupTable {
        &self.table
    }
}

//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Table construction (at startup):
//!     path → URL map            ─┐
//!     YAML/JSON document bytes  ─┴→ table.rs (decode, fold, last wins)
//!     → Freeze as Arc<LookupTable>
//!
//! Incoming request path
//!     → router.rs (exact lookup)
//!     → Return: Matched(target) or Unmatched
//! ```
//!
//! # Design Decisions
//! - Table built once at startup, immutable at runtime
//! - Exact string matching, no prefix or case folding
//! - Deterministic: same input always resolves the same way

pub mod router;
pub mod table;

pub use router::{Resolution, Router};
pub use table::{DecodeError, DocumentFormat, LookupTable, RedirectEntry};

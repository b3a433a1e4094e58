//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (add / propagate request ID)
//!     → redirect.rs (document table, then inline table)
//!         → Matched:   response.rs (301 + Location)
//!         → Unmatched: response.rs (configured fallback)
//!     → Send to client
//! ```

pub mod redirect;
pub mod request;
pub mod response;
pub mod server;

pub use redirect::{RedirectLayer, RedirectService};
pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use response::{permanent_redirect, Fallback};
pub use server::HttpServer;

//! Path-to-URL redirect service.
//!
//! Requests whose path is a key of a lookup table are answered with a
//! `301 Moved Permanently`; every other request goes to a fallback handler.
//! Tables are built once at startup, either from a path → URL map or from a
//! YAML/JSON document of `{path, url}` records.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::ServerConfig;
pub use http::{HttpServer, RedirectLayer, RedirectService};
pub use lifecycle::Shutdown;
pub use routing::{DecodeError, LookupTable, RedirectEntry};

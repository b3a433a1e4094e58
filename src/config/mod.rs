//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!
//! [redirects].file (YAML/JSON)
//!     → loader.rs (read relative to config dir)
//!     → routing::table (decode & fold)
//!     → LookupTable
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_redirects, load_redirects_file, parse_config, ConfigError};
pub use schema::ServerConfig;
pub use schema::{FallbackConfig, ListenerConfig, ObservabilityConfig, RedirectsConfig};
pub use validation::ValidationError;

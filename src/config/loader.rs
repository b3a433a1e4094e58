//! Configuration and redirect document loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::{RedirectsConfig, ServerConfig};
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::{DecodeError, DocumentFormat, LookupTable};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Redirect document {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("Cannot infer redirect document format of {} (use .yaml, .yml or .json)", .0.display())]
    UnknownFormat(PathBuf),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ServerConfig, ConfigError> {
    let config: ServerConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Load the redirect document named by `redirects`, if any.
///
/// Relative file paths are resolved against `base_dir` (normally the
/// directory of the config file). Returns an empty table when no file is
/// configured.
pub fn load_redirects(
    redirects: &RedirectsConfig,
    base_dir: &Path,
) -> Result<LookupTable, ConfigError> {
    let Some(file) = &redirects.file else {
        return Ok(LookupTable::new());
    };

    let path = base_dir.join(file);
    let format = match redirects.format {
        Some(format) => format,
        None => DocumentFormat::from_path(&path)
            .ok_or_else(|| ConfigError::UnknownFormat(path.clone()))?,
    };

    let document = fs::read(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;

    LookupTable::from_document(&document, format)
        .map_err(|source| ConfigError::Decode { path, source })
}

/// Load a redirect document given directly, e.g. on the command line.
///
/// The format always comes from the file's extension; a `[redirects].format`
/// in the config applies only to `[redirects].file`.
pub fn load_redirects_file(file: &Path) -> Result<LookupTable, ConfigError> {
    let redirects = RedirectsConfig {
        file: Some(file.to_path_buf()),
        format: None,
    };
    load_redirects(&redirects, Path::new(""))
}

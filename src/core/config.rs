//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.timetabler/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! Everything is resolved once at process start into a [`ResolvedConfig`] and
//! handed to the service adapter at construction. Nothing reads the
//! environment after that.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TimetablerConfig {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    pub response_shape: Option<ResponseShape>,
    pub request_timeout_secs: Option<u64>,
}

/// Shape of the `/get-module-timetables` response body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseShape {
    /// JSON object keyed by module code.
    #[default]
    Keyed,
    /// JSON array, one record per submitted code, in submission order.
    Positional,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const BASE_URL_ENV: &str = "TIMETABLER_BASE_URL";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub response_shape: ResponseShape,
    pub request_timeout: Duration,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve_with_env(&TimetablerConfig::default(), None, None)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.timetabler/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".timetabler").join("config.toml"))
}

/// Load config from `~/.timetabler/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TimetablerConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TimetablerConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(TimetablerConfig::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<TimetablerConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(TimetablerConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: TimetablerConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Timetabler Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# base_url = "http://localhost:5000"   # Or set TIMETABLER_BASE_URL / --base-url
# response_shape = "keyed"             # "keyed" (object by module code) or "positional" (array)
# request_timeout_secs = 30
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TimetablerConfig, cli_base_url: Option<&str>) -> ResolvedConfig {
    resolve_with_env(config, cli_base_url, std::env::var(BASE_URL_ENV).ok())
}

/// Same as [`resolve`], with the environment value passed in explicitly.
pub fn resolve_with_env(
    config: &TimetablerConfig,
    cli_base_url: Option<&str>,
    env_base_url: Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or(env_base_url)
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    ResolvedConfig {
        base_url: normalize_base_url(&base_url),
        response_shape: config.server.response_shape.unwrap_or_default(),
        request_timeout: Duration::from_secs(
            config
                .server
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ),
    }
}

/// Trims whitespace and trailing slashes so endpoints can be appended with `/`.
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&TimetablerConfig::default(), None, None);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.response_shape, ResponseShape::Keyed);
        assert_eq!(
            resolved.request_timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_override_hierarchy() {
        let config = TimetablerConfig {
            server: ServerConfig {
                base_url: Some("http://from-file:1".to_string()),
                ..Default::default()
            },
        };

        let resolved = resolve_with_env(&config, None, None);
        assert_eq!(resolved.base_url, "http://from-file:1");

        let resolved = resolve_with_env(&config, None, Some("http://from-env:2".to_string()));
        assert_eq!(resolved.base_url, "http://from-env:2");

        let resolved = resolve_with_env(
            &config,
            Some("http://from-cli:3"),
            Some("http://from-env:2".to_string()),
        );
        assert_eq!(resolved.base_url, "http://from-cli:3");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(normalize_base_url(" http://host:5000/ "), "http://host:5000");
        assert_eq!(normalize_base_url("http://host//"), "http://host");
    }

    #[test]
    fn test_toml_parses_all_fields() {
        let toml_str = r#"
[server]
base_url = "https://timetable.example.ac.uk/api"
response_shape = "positional"
request_timeout_secs = 5
"#;
        let config: TimetablerConfig = toml::from_str(toml_str).unwrap();
        let resolved = resolve_with_env(&config, None, None);
        assert_eq!(resolved.base_url, "https://timetable.example.ac.uk/api");
        assert_eq!(resolved.response_shape, ResponseShape::Positional);
        assert_eq!(resolved.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config: TimetablerConfig = toml::from_str("").unwrap();
        assert!(config.server.base_url.is_none());
        assert!(config.server.response_shape.is_none());
    }

    #[test]
    fn test_unknown_response_shape_is_parse_error() {
        let result: Result<TimetablerConfig, _> =
            toml::from_str("[server]\nresponse_shape = \"tree\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_generates_default() {
        let dir = std::env::temp_dir().join(format!("timetabler-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_file(&path);

        let config = load_config_from(&path).unwrap();
        assert!(config.server.base_url.is_none());
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("# [server]"));

        // The generated file is all comments and parses back to defaults.
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.server.base_url.is_none());
        let _ = fs::remove_dir_all(&dir);
    }
}

//! Configuration file loading with precedence handling.

use crate::model::{SortDirection, SortKey};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not plain absence).
    #[error("failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown fields.
    #[error("invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/reel/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Base URL of the media catalog API.
    #[serde(default)]
    pub server_url: Option<String>,

    /// Fixed page size requested from the catalog.
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Sort key for search results.
    #[serde(default)]
    pub sort: Option<SortKey>,

    /// Sort direction for search results.
    #[serde(default)]
    pub sort_direction: Option<SortDirection>,

    /// Quiet interval before a search edit commits, in milliseconds.
    #[serde(default)]
    pub debounce_ms: Option<u64>,

    /// Idle window before the controls overlay hides, in milliseconds.
    #[serde(default)]
    pub overlay_timeout_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Path to the address file persisting the last query.
    #[serde(default)]
    pub address_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Base URL of the media catalog API. The only setting without a
    /// default; `main` rejects startup when every source leaves it unset.
    pub server_url: Option<String>,
    /// Fixed page size requested from the catalog.
    pub page_size: u32,
    /// Sort key for search results.
    pub sort: SortKey,
    /// Sort direction for search results.
    pub sort_direction: SortDirection,
    /// Quiet interval before a search edit commits, in milliseconds.
    pub debounce_ms: u64,
    /// Idle window before the controls overlay hides, in milliseconds.
    pub overlay_timeout_ms: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Path to the address file persisting the last query.
    pub address_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            page_size: 40,
            sort: SortKey::Date,
            sort_direction: SortDirection::Desc,
            debounce_ms: 500,
            overlay_timeout_ms: 2000,
            log_file_path: default_state_path("reel.log"),
            address_file_path: default_state_path("last_query"),
        }
    }
}

/// Resolve a path under the platform state directory.
///
/// Returns `~/.local/state/reel/<name>` on Unix-like systems, or the
/// platform equivalent. Falls back to the current directory when no state
/// directory can be determined.
fn default_state_path(name: &str) -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("reel").join(name)
    } else {
        PathBuf::from(name)
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (not an error - use
/// defaults). Returns `Err` if the file exists but cannot be read or
/// parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/reel/config.toml` on Unix, the platform equivalent
/// elsewhere. Returns `None` if no config directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("reel").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `REEL_CONFIG` environment variable
/// 3. Default path `~/.config/reel/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("REEL_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use
/// the default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        server_url: config.server_url.or(defaults.server_url),
        page_size: config.page_size.unwrap_or(defaults.page_size),
        sort: config.sort.unwrap_or(defaults.sort),
        sort_direction: config.sort_direction.unwrap_or(defaults.sort_direction),
        debounce_ms: config.debounce_ms.unwrap_or(defaults.debounce_ms),
        overlay_timeout_ms: config
            .overlay_timeout_ms
            .unwrap_or(defaults.overlay_timeout_ms),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        address_file_path: config
            .address_file_path
            .unwrap_or(defaults.address_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `REEL_SERVER_URL`: override the catalog base URL
/// - `REEL_PAGE_SIZE`: override the page size (ignored when unparseable)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(url) = std::env::var("REEL_SERVER_URL") {
        config.server_url = Some(url);
    }

    if let Ok(raw) = std::env::var("REEL_PAGE_SIZE") {
        if let Ok(page_size) = raw.parse::<u32>() {
            config.page_size = page_size;
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for arguments that were explicitly set.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    server_override: Option<String>,
    sort_override: Option<SortKey>,
) -> ResolvedConfig {
    if let Some(server) = server_override {
        config.server_url = Some(server);
    }

    if let Some(sort) = sort_override {
        config.sort = sort;
    }

    config
}

// ===== Tests =====

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

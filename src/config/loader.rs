//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

use crate::state::OutOfRangePolicy;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; missing ones fall back to defaults.
/// Corresponds to `~/.config/tabstate/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Starting page size.
    #[serde(default)]
    pub rows_per_page: Option<usize>,

    /// Correction when a filter leaves the page out of range.
    #[serde(default)]
    pub out_of_range: Option<OutOfRangePolicy>,

    /// Reject searches on fields that are not searchable.
    #[serde(default)]
    pub strict_fields: Option<bool>,

    /// Default searchable fields when none are given on the command line.
    #[serde(default)]
    pub search_fields: Option<Vec<String>>,

    /// Field holding each row's stable identity.
    #[serde(default)]
    pub key_field: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Starting page size. Validated when the controller is built.
    pub rows_per_page: usize,
    /// Out-of-range page correction.
    pub out_of_range: OutOfRangePolicy,
    /// Strict search field checking.
    pub strict_fields: bool,
    /// Searchable fields.
    pub search_fields: Vec<String>,
    /// Identity field, positional keys when `None`.
    pub key_field: Option<String>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            rows_per_page: 20,
            out_of_range: OutOfRangePolicy::ResetToFirst,
            strict_fields: false,
            search_fields: Vec::new(),
            key_field: None,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/tabstate/tabstate.log` on Unix-like systems,
/// or the platform state directory elsewhere. Falls back to the current
/// directory when no state directory exists.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("tabstate").join("tabstate.log")
    } else {
        PathBuf::from("tabstate.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

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
/// Returns `~/.config/tabstate/config.toml` on Unix, the platform config
/// directory elsewhere, `None` if it cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tabstate").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `TABSTATE_CONFIG` environment variable
/// 3. Default path `~/.config/tabstate/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("TABSTATE_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        rows_per_page: config.rows_per_page.unwrap_or(defaults.rows_per_page),
        out_of_range: config.out_of_range.unwrap_or(defaults.out_of_range),
        strict_fields: config.strict_fields.unwrap_or(defaults.strict_fields),
        search_fields: config.search_fields.unwrap_or(defaults.search_fields),
        key_field: config.key_field.or(defaults.key_field),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `TABSTATE_ROWS_PER_PAGE`: override page size (ignored with a warning
///   when not a number)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var("TABSTATE_ROWS_PER_PAGE") {
        match raw.trim().parse::<usize>() {
            Ok(rows) => config.rows_per_page = rows,
            Err(_) => warn!(value = %raw, "Ignoring non-numeric TABSTATE_ROWS_PER_PAGE"),
        }
    }

    config
}

/// Overrides taken from command-line flags. `None` leaves the value as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--rows-per-page`
    pub rows_per_page: Option<usize>,
    /// `--field` (non-empty replaces the configured list)
    pub search_fields: Vec<String>,
    /// `--key`
    pub key_field: Option<String>,
    /// `--strict`
    pub strict_fields: Option<bool>,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(rows) = cli.rows_per_page {
        config.rows_per_page = rows;
    }

    if !cli.search_fields.is_empty() {
        config.search_fields = cli.search_fields;
    }

    if let Some(key) = cli.key_field {
        config.key_field = Some(key);
    }

    if let Some(strict) = cli.strict_fields {
        config.strict_fields = strict;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

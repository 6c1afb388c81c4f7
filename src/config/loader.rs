//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
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
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/flarecat/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Flare cache TSV file.
    #[serde(default)]
    pub cache_path: Option<PathBuf>,

    /// Query settings (`KEY="value"`) file.
    #[serde(default)]
    pub settings_path: Option<PathBuf>,

    /// Interpreter or executable that runs the flare query.
    #[serde(default)]
    pub query_program: Option<String>,

    /// Script passed as the first argument to `query_program`.
    #[serde(default)]
    pub query_script: Option<PathBuf>,

    /// Working directory for the query process.
    #[serde(default)]
    pub query_dir: Option<PathBuf>,

    /// Ticks a notice stays on screen.
    #[serde(default)]
    pub notice_ticks: Option<u64>,

    /// Animation tick length in milliseconds.
    #[serde(default)]
    pub tick_millis: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Flare cache TSV file.
    pub cache_path: PathBuf,
    /// Query settings file.
    pub settings_path: PathBuf,
    /// Query program.
    pub query_program: String,
    /// Query script, if the program needs one.
    pub query_script: Option<PathBuf>,
    /// Query working directory; inherits ours when unset.
    pub query_dir: Option<PathBuf>,
    /// Ticks a notice stays on screen.
    pub notice_ticks: u64,
    /// Animation tick length in milliseconds.
    pub tick_millis: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl ResolvedConfig {
    /// Tick length as a [`Duration`], never shorter than 10ms.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(10))
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            cache_path: PathBuf::from("flare_cache.tsv"),
            settings_path: PathBuf::from(".vars.env"),
            query_program: "python".to_string(),
            query_script: Some(PathBuf::from("query.py")),
            query_dir: None,
            notice_ticks: 20,
            tick_millis: 80,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/flarecat/flarecat.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("flarecat").join("flarecat.log")
    } else {
        PathBuf::from("flarecat.log")
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
/// Returns `~/.config/flarecat/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("flarecat").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `FLARECAT_CONFIG` environment variable
/// 3. Default path `~/.config/flarecat/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
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

    if let Ok(env_path) = std::env::var("FLARECAT_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `FLARECAT_CACHE`: Override cache path
/// - `FLARECAT_SETTINGS`: Override settings path
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(cache) = std::env::var("FLARECAT_CACHE") {
        config.cache_path = PathBuf::from(cache);
    }

    if let Ok(settings) = std::env::var("FLARECAT_SETTINGS") {
        config.settings_path = PathBuf::from(settings);
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        cache_path: config.cache_path.unwrap_or(defaults.cache_path),
        settings_path: config.settings_path.unwrap_or(defaults.settings_path),
        query_program: config.query_program.unwrap_or(defaults.query_program),
        query_script: config.query_script.or(defaults.query_script),
        query_dir: config.query_dir.or(defaults.query_dir),
        notice_ticks: config.notice_ticks.unwrap_or(defaults.notice_ticks),
        tick_millis: config.tick_millis.unwrap_or(defaults.tick_millis),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// CLI values that override every other source when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// From `--cache`.
    pub cache_path: Option<PathBuf>,
    /// From `--settings`.
    pub settings_path: Option<PathBuf>,
    /// From `--query-dir`.
    pub query_dir: Option<PathBuf>,
    /// From `--log-file`.
    pub log_file_path: Option<PathBuf>,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(cache) = cli.cache_path {
        config.cache_path = cache;
    }

    if let Some(settings) = cli.settings_path {
        config.settings_path = settings;
    }

    if let Some(dir) = cli.query_dir {
        config.query_dir = Some(dir);
    }

    if let Some(log) = cli.log_file_path {
        config.log_file_path = log;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

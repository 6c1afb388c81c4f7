//! Configuration module.
//!
//! Application config (TOML, with precedence), key bindings, and the query
//! settings file shared with the external scripts.

pub mod keybindings;
pub mod loader;
pub mod settings;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, CliOverrides, ConfigError,
    ConfigFile, ResolvedConfig,
};
pub use settings::{QuerySettings, SettingsError, SettingsStore};

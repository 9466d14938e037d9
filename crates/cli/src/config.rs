//! Configuration file support for skillport.
//!
//! Loads settings from `~/.skillport/config.toml` with the following precedence:
//! CLI arguments > Environment variables > Config file
//!
//! ## Configuration File Format
//!
//! ```toml
//! # ~/.skillport/config.toml
//!
//! [convert]
//! # Default target dialect when --to is omitted
//! target = "copilot"
//!
//! # Directory converted files are written under
//! output = "./converted"
//!
//! # Overwrite existing files
//! force = false
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration structure.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Convert command configuration.
    #[serde(default)]
    pub convert: ConvertConfig,
}

/// Configuration for the convert command.
#[derive(Debug, Default, Deserialize)]
pub struct ConvertConfig {
    /// Default target dialect.
    pub target: Option<String>,
    /// Default output directory.
    pub output: Option<String>,
    /// Overwrite existing files by default.
    pub force: Option<bool>,
}

/// Returns the path to the config file (~/.skillport/config.toml).
fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".skillport").join("config.toml"))
}

fn load_config_from(path: &Path) -> Result<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    tracing::debug!(
        target: "skillport::config",
        path = %path.display(),
        "Loaded configuration file"
    );

    Ok(Some(config))
}

/// Loads the configuration file if it exists.
///
/// Returns `Ok(None)` if the file doesn't exist.
/// Returns `Err` if the file exists but fails to parse.
pub fn load_config() -> Result<Option<Config>> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Ok(None),
    }
}

/// Applies configuration file settings to environment variables.
///
/// Only sets environment variables that are not already set, preserving
/// the precedence: CLI > ENV > config file. Must run before clap parses
/// arguments.
pub fn apply_config_to_env() {
    match load_config() {
        Ok(Some(config)) => apply_convert_config_to_env(&config.convert),
        Ok(None) => {}
        Err(err) => tracing::warn!(
            target: "skillport::config",
            error = %format!("{err:#}"),
            "Ignoring unreadable configuration file"
        ),
    }
}

/// Applies convert configuration to environment variables.
fn apply_convert_config_to_env(convert: &ConvertConfig) {
    // Helper to set env var only if not already set
    fn set_if_absent(key: &str, value: &str) {
        if std::env::var(key).is_err() {
            std::env::set_var(key, value);
            tracing::trace!(
                target: "skillport::config",
                key,
                "Set environment variable from config file"
            );
        }
    }

    if let Some(ref target) = convert.target {
        set_if_absent("SKILLPORT_TARGET", target);
    }

    if let Some(ref output) = convert.output {
        set_if_absent("SKILLPORT_OUTPUT", output);
    }

    if let Some(force) = convert.force {
        set_if_absent("SKILLPORT_FORCE", if force { "true" } else { "false" });
    }
}

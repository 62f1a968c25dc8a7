// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Terminal host configuration loaded from TOML and the environment.
// Author: Lukas Bower

//! Terminal host configuration loaded from TOML and the environment.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use slicedterm_core::DEFAULT_OVERLAY_MS;
use thiserror::Error;

/// Default location of the optional configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "configs/slicedterm.toml";
/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "SLICEDTERM_CONFIG";
/// Environment override for the overlay duration.
pub const OVERLAY_ENV: &str = "SLICEDTERM_OVERLAY_MS";
/// Environment override for the cursor blink interval.
pub const BLINK_ENV: &str = "SLICEDTERM_BLINK_MS";

/// Default cursor blink interval.
pub const DEFAULT_BLINK_MS: u64 = 530;

/// Errors produced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid configuration TOML.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },
    /// A value is out of range or malformed.
    #[error("invalid {key} value '{value}'")]
    InvalidValue {
        /// Setting name.
        key: &'static str,
        /// Offending value.
        value: String,
    },
}

/// When to emit ANSI colour.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Colour when stdout is a terminal.
    #[default]
    Auto,
    /// Always colour.
    Always,
    /// Never colour.
    Never,
}

/// Host settings.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TerminalConfig {
    /// Symbol printed between the path and the input.
    pub prompt_symbol: String,
    /// How long the `matrix` overlay stays up.
    pub overlay_ms: u64,
    /// Cursor blink interval.
    pub blink_ms: u64,
    /// Print the banner and welcome text at start-up.
    pub banner: bool,
    /// Colour policy.
    pub color: ColorMode,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            prompt_symbol: "$".to_owned(),
            overlay_ms: DEFAULT_OVERLAY_MS,
            blink_ms: DEFAULT_BLINK_MS,
            banner: true,
            color: ColorMode::Auto,
        }
    }
}

impl TerminalConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(path: &Path, text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(path, &text)
    }

    /// Resolve the file to load, then apply environment overrides.
    ///
    /// Order: explicit path, `SLICEDTERM_CONFIG`, then the default path when
    /// it exists. Without any file the built-in defaults are used.
    pub fn resolve(cli_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match resolve_config_path(cli_path) {
            Some(path) => {
                debug!("loading configuration from {}", path.display());
                Self::load(&path)?
            }
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Apply numeric environment overrides.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(overlay_ms) = env_number(OVERLAY_ENV)? {
            self.overlay_ms = overlay_ms;
        }
        if let Some(blink_ms) = env_number(BLINK_ENV)? {
            self.blink_ms = blink_ms;
        }
        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.overlay_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "overlay_ms",
                value: self.overlay_ms.to_string(),
            });
        }
        if self.blink_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "blink_ms",
                value: self.blink_ms.to_string(),
            });
        }
        if self.prompt_symbol.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "prompt_symbol",
                value: self.prompt_symbol.clone(),
            });
        }
        Ok(())
    }
}

fn resolve_config_path(cli_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_path {
        return Some(path.to_path_buf());
    }
    if let Ok(value) = env::var(CONFIG_ENV) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    let default = PathBuf::from(DEFAULT_CONFIG_PATH);
    default.is_file().then_some(default)
}

fn env_number(key: &'static str) -> Result<Option<u64>, ConfigError> {
    match env::var(key) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<u64>()
                .map(Some)
                .map_err(|_| ConfigError::InvalidValue {
                    key,
                    value: trimmed.to_owned(),
                })
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(raw)) => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string_lossy().into_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = TerminalConfig::from_toml(Path::new("inline"), "").unwrap();
        assert_eq!(config, TerminalConfig::default());
        assert_eq!(config.overlay_ms, 5_000);
    }

    #[test]
    fn partial_files_keep_other_defaults() {
        let config =
            TerminalConfig::from_toml(Path::new("inline"), "overlay_ms = 1200\ncolor = \"never\"\n")
                .unwrap();
        assert_eq!(config.overlay_ms, 1_200);
        assert_eq!(config.color, ColorMode::Never);
        assert_eq!(config.blink_ms, DEFAULT_BLINK_MS);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = TerminalConfig::from_toml(Path::new("inline"), "colour = \"never\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn zero_durations_are_rejected() {
        let err = TerminalConfig::from_toml(Path::new("inline"), "blink_ms = 0").unwrap_err();
        assert!(err.to_string().contains("blink_ms"));
    }
}

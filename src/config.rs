// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Sources, lowest precedence first: built-in defaults, a TOML file, then
//! `CAMPUS_COMPASS_*` environment variables. CLI flags are applied by the
//! caller on top of the result.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "CAMPUS_COMPASS";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Walkway CSV file
    pub edges_path: PathBuf,
    /// Class catalog CSV file
    pub classes_path: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            edges_path: PathBuf::from("data/edges.csv"),
            classes_path: PathBuf::from("data/classes.csv"),
            log_level: "warn".to_string(),
        }
    }
}

/// Per-user config file location, if the platform has one
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "hyperpolymath", "campus-compass")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load configuration.
///
/// An explicit `path` must exist; the per-user file is optional.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let defaults = Config::default();
    let mut builder = config::Config::builder()
        .set_default("edges_path", defaults.edges_path.to_string_lossy().into_owned())?
        .set_default("classes_path", defaults.classes_path.to_string_lossy().into_owned())?
        .set_default("log_level", defaults.log_level)?;

    match path {
        Some(p) => {
            builder = builder.add_source(config::File::from(p).required(true));
        }
        None => {
            if let Some(p) = default_config_file() {
                builder = builder.add_source(config::File::from(p).required(false));
            }
        }
    }

    builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Invalid configuration")
}

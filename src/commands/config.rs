// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

use crate::config::Config;
use anyhow::{Context, Result};

/// Print the effective configuration as TOML
pub fn run(config: &Config) -> Result<()> {
    tracing::debug!("Showing effective configuration");
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    print!("{rendered}");
    Ok(())
}

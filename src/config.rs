// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Finplan", "finplan"));

pub const CONFIG_ENV: &str = "FINPLAN_CONFIG";
pub const PPF_RATE_ENV: &str = "FINPLAN_PPF_RATE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Annual rate (percent) used when a command is not given `--rate`.
    pub default_rate_percent: f64,
    /// Notified PPF rate (percent).
    pub ppf_rate_percent: f64,
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_rate_percent: 12.0,
            // calculator::PPF_ANNUAL_RATE, as a percent.
            ppf_rate_percent: 7.6,
            currency_symbol: "₹".to_string(),
        }
    }
}

impl Settings {
    pub fn ppf_rate(&self) -> f64 {
        self.ppf_rate_percent / 100.0
    }

    fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("default_rate_percent", self.default_rate_percent),
            ("ppf_rate_percent", self.ppf_rate_percent),
        ] {
            if !v.is_finite() || v <= -100.0 {
                return Err(anyhow!("Setting {} has invalid value {}", name, v));
            }
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    if let Ok(p) = std::env::var(CONFIG_ENV) {
        if !p.trim().is_empty() {
            return Ok(PathBuf::from(p));
        }
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("settings.json"))
}

/// Reads settings from `path`, falling back to defaults when the file is absent.
pub fn load_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        log::warn!("no settings at {}, using defaults", path.display());
        return Ok(Settings::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Read settings at {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Parse settings at {}", path.display()))?;
    settings.validate()?;
    Ok(settings)
}

/// Settings from the configured path with environment overrides applied.
pub fn load() -> Result<Settings> {
    let path = config_path()?;
    let mut settings = load_from(&path)?;
    if let Ok(v) = std::env::var(PPF_RATE_ENV) {
        settings.ppf_rate_percent = crate::utils::parse_amount(&v)
            .with_context(|| format!("{} must be a percentage", PPF_RATE_ENV))?;
        settings.validate()?;
    }
    log::debug!("settings: {:?}", settings);
    Ok(settings)
}

pub fn write_defaults(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(anyhow!(
            "Settings already exist at {} (use --force to overwrite)",
            path.display()
        ));
    }
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context("Failed to create config dir")?;
    }
    let body = serde_json::to_string_pretty(&Settings::default())?;
    fs::write(path, body).with_context(|| format!("Write settings to {}", path.display()))?;
    Ok(())
}

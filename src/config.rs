// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Cashplan", "cashplan"));

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server_url: Option<String>,
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    let config_dir = proj.config_dir();
    fs::create_dir_all(config_dir).context("Failed to create config dir")?;
    Ok(config_dir.join("config.json"))
}

pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Read config at {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Parse config at {}", path.display()))
}

pub fn save_to(path: &Path, cfg: &Config) -> Result<()> {
    let raw = serde_json::to_string_pretty(cfg)?;
    fs::write(path, raw).with_context(|| format!("Write config at {}", path.display()))?;
    Ok(())
}

pub fn load() -> Result<Config> {
    load_from(&config_path()?)
}

pub fn save(cfg: &Config) -> Result<()> {
    save_to(&config_path()?, cfg)
}

/// Server URL resolution: explicit flag, then CASHPLAN_SERVER, then the
/// config file, then the default.
pub fn resolve_server_url(flag: Option<&str>) -> Result<String> {
    if let Some(url) = flag {
        return Ok(url.to_string());
    }
    if let Ok(url) = std::env::var("CASHPLAN_SERVER") {
        if !url.is_empty() {
            return Ok(url);
        }
    }
    if let Some(url) = load()?.server_url {
        return Ok(url);
    }
    Ok(DEFAULT_SERVER_URL.to_string())
}

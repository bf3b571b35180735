use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classifier::AccountRangeTable;
use crate::error::{RevError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// JSON account range table used instead of the built-in one.
    #[serde(default)]
    pub ranges_file: Option<String>,
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

fn default_export_dir() -> String {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("gdnrev")
        .join("exports")
        .to_string_lossy()
        .to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ranges_file: None,
            export_dir: default_export_dir(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("gdnrev")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn load_from(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

fn save_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| RevError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

pub fn load_settings() -> Settings {
    load_from(&settings_path())
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_to(&settings_path(), settings)
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

/// Resolve the range table: explicit path, then settings, then built-in.
pub fn resolve_range_table(explicit: Option<&str>, settings: &Settings) -> Result<AccountRangeTable> {
    match explicit.or(settings.ranges_file.as_deref()) {
        Some(path) => {
            let path = PathBuf::from(shellexpand_path(path));
            tracing::debug!(path = %path.display(), "loading account ranges");
            AccountRangeTable::load(&path).map_err(|e| match e {
                RevError::Io(io) => RevError::InvalidRanges(format!("{}: {io}", path.display())),
                other => other,
            })
        }
        None => Ok(AccountRangeTable::builtin()),
    }
}

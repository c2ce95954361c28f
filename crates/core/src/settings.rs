use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::logging::{log, LogCategory, LogLevel};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Where the launch page reads its identifier from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierSource {
    /// `/sonic2`
    Path,
    /// `/play.html?rom=sonic2`
    Query,
}

/// How the launch page turns an identifier into a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupStrategy {
    /// Fetch both collections once and resolve against the snapshot
    Catalog,
    /// Ask for the single ROM, then the single tag
    Direct,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchSettings {
    pub source: IdentifierSource,
    pub query_param: String,
    pub strategy: LookupStrategy,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            source: IdentifierSource::Path,
            query_param: "rom".to_string(),
            strategy: LookupStrategy::Catalog,
        }
    }
}

/// Values handed to the EmulatorJS loader through its globals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmulatorSettings {
    /// CSS selector of the player mount point
    pub player: String,
    pub core: String,
    /// Base URL of the loader's data directory (ends with '/')
    pub data_path: String,
    pub language: String,
    pub color: String,
    pub start_on_loaded: bool,
    pub fullscreen_on_loaded: bool,
    /// Wait before inserting the loader script; 0 inserts it immediately
    pub injection_delay_ms: u64,
    /// Per-button visibility overrides (`EJS_Buttons`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<BTreeMap<String, bool>>,
}

impl Default for EmulatorSettings {
    fn default() -> Self {
        Self {
            player: "#game".to_string(),
            core: "segaMD".to_string(),
            data_path: "https://cdn.emulatorjs.org/stable/data/".to_string(),
            language: "pt-BR".to_string(),
            color: "#fff".to_string(),
            start_on_loaded: true,
            fullscreen_on_loaded: true,
            injection_delay_ms: 5000,
            buttons: None,
        }
    }
}

impl EmulatorSettings {
    pub fn injection_delay(&self) -> Duration {
        Duration::from_millis(self.injection_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base: String,
    pub timeout_secs: Option<u64>,
    pub launch: LaunchSettings,
    pub emulator: EmulatorSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:8000".to_string(),
            timeout_secs: None,
            launch: LaunchSettings::default(),
            emulator: EmulatorSettings::default(),
        }
    }
}

impl Settings {
    /// `config.json` next to the executable
    pub fn config_path() -> PathBuf {
        let mut path = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));
        path.push("config.json");
        path
    }

    /// Load from `path`, or [`config_path`](Self::config_path) when `None`.
    ///
    /// A missing file yields defaults silently; an unreadable or malformed
    /// one yields defaults with a warning.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log(LogCategory::Admin, LogLevel::Warn, || {
                    format!("{}. Using defaults.", e)
                });
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Editor settings
///
/// Read once at startup from `<config dir>/kml-editor/settings.json`:
/// - Linux: ~/.config/kml-editor/settings.json
/// - macOS: ~/Library/Application Support/kml-editor/settings.json
/// - Windows: %APPDATA%\kml-editor\settings.json
///
/// The file is optional and every field may be omitted.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Native parser, relative to the working directory
pub const DEFAULT_LIBRARY_PATH: &str = "./libkmlparser.so";

/// KML 2.2 schema, relative to the working directory
pub const DEFAULT_SCHEMA_FILE: &str = "ogckml22.xsd";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Path handed to the dynamic loader
    pub library_path: PathBuf,
    /// Schema used for both open and save validation
    pub schema_file: String,
    /// Maximum distance in metres between a path's ends for it to count as a loop
    pub loop_tolerance: f64,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            library_path: PathBuf::from(DEFAULT_LIBRARY_PATH),
            schema_file: DEFAULT_SCHEMA_FILE.to_string(),
            loop_tolerance: 10.0,
            window_width: 1000.0,
            window_height: 600.0,
        }
    }
}

impl Settings {
    /// Where the settings file lives, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("kml-editor");
        path.push("settings.json");
        Some(path)
    }

    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the default location, falling back to defaults on any error
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => {
                tracing::debug!(path = %path.display(), ?settings, "settings loaded");
                settings
            }
            Err(e) => {
                tracing::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}

//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Export defaults.
    pub export: ExportDefaults,

    /// Content generator defaults.
    pub generator: GeneratorDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default export parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportDefaults {
    /// Directory the exported poster is written to.
    pub output_dir: PathBuf,

    /// File name of the exported poster.
    pub file_name: String,

    /// Pixel multiplier applied on top of the 1000x1000 logical canvas.
    pub scale_factor: f64,

    /// External program used to rasterize the export document.
    pub rasterizer_program: String,

    /// Base directory for relative image references (logos, overlay).
    pub asset_root: PathBuf,
}

/// Defaults used when generating poster copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorDefaults {
    /// Language code, `sw` or `en`.
    pub language: String,

    /// Auction start time (`HH:MM`) used when none is given.
    pub default_time: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "bango=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_name: "poster.png".to_string(),
            scale_factor: 1.0,
            rasterizer_program: "rsvg-convert".to_string(),
            asset_root: PathBuf::from("."),
        }
    }
}

impl Default for GeneratorDefaults {
    fn default() -> Self {
        Self {
            language: "sw".to_string(),
            default_time: "10:30".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("bango").join("config.json")
}

//! Launcher settings.
//!
//! Settings live in `$XDG_CONFIG_HOME/sv-dashboard/config.json`, next to
//! the icon catalog.  The tile list itself is a separate file (see
//! [`catalog`](crate::catalog)); this one only tunes behaviour.
//!
//! # Example
//!
//! ```json
//! {
//!   "gestures": { "slow_min_px": 140.0, "fast_max_ms": 300 },
//!   "scale": { "base_width": 1280, "base_height": 720 },
//!   "window": { "fullscreen": true, "scheme": "night" }
//! }
//! ```

use crate::gesture::SwipeConfig;
use crate::scale::ScaleConfig;
use crate::theme::Scheme;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
///
/// Every field is optional — a minimal `{}` file is valid and all sections
/// fall back to their compiled-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Swipe recognition thresholds.
    #[serde(default)]
    pub gestures: SwipeConfig,

    /// Window-size → scale mapping.
    #[serde(default)]
    pub scale: ScaleConfig,

    /// Window placement and startup state.
    #[serde(default)]
    pub window: WindowConfig,
}

/// Window placement and startup state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial width when not fullscreen.
    pub width: i32,
    /// Initial height when not fullscreen.
    pub height: i32,
    /// Start fullscreen.
    pub fullscreen: bool,
    /// Run as a Wayland layer-shell surface covering the output.
    pub layer_shell: bool,
    /// Scheme active at startup.
    pub scheme: Scheme,
    /// Page slide animation (ms).  `0` disables it.
    pub transition_ms: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 800,
            fullscreen: false,
            layer_shell: false,
            scheme: Scheme::Day,
            transition_ms: 250,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        config
            .scale
            .validate()
            .map_err(|e| ConfigError(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(cfg) => {
                info!("loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                info!("no config file ({}), using defaults", e);
                Self::default()
            }
        }
    }
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/sv-dashboard`).
pub fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
            format!("{}/.config", home)
        });
    PathBuf::from(base).join("sv-dashboard")
}

/// Path of the settings file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

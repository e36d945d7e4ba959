//! Instance and runtime settings
//!
//! Settings are plain serde structs. Every key has a default, so a TOML file
//! only needs the keys it overrides:
//!
//! ```toml
//! [runtime]
//! check_frequency = 500
//!
//! [instance]
//! class_prefix = "sb"
//! max_track_size = 80
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Per-instance settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Keep touch content from resting exactly on an edge
    pub fix_touch_page_bounce: bool,
    /// Create tracks even when the host has overlay scrollbars
    pub forced_scrollbars: bool,
    /// Quiet period after the last scroll event before settling (ms)
    pub scroll_stop_delay: f64,
    /// Largest thumb, in percent of the track
    pub max_track_size: f64,
    /// Smallest thumb, in percent of the track
    pub min_track_size: f64,
    /// Whether tracks accept pointer input. Carried for hosts that read
    /// settings; the engine does not act on it.
    pub scrollbars_interactivity: bool,
    /// Register with the polling loop
    pub auto_update: bool,
    pub class_prefix: String,
    /// CSS transition applied to enabled tracks
    pub track_transitions: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fix_touch_page_bounce: true,
            forced_scrollbars: false,
            scroll_stop_delay: 300.0,
            max_track_size: 90.0,
            min_track_size: 5.0,
            scrollbars_interactivity: true,
            auto_update: true,
            class_prefix: "glide".to_string(),
            track_transitions: "height 0.2s ease 0s, width 0.2s ease 0s, opacity 0.2s ease 0s"
                .to_string(),
        }
    }
}

impl Settings {
    /// Check the track limits are percentages and not inverted.
    ///
    /// A limit of 0 means "unset" and is always accepted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = self.track_limits();
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if !in_range(self.min_track_size) || !in_range(self.max_track_size) || min > max {
            return Err(ConfigError::InvalidTrackRange {
                min: self.min_track_size,
                max: self.max_track_size,
            });
        }
        Ok(())
    }

    /// Effective `(min, max)` track limits. An unset max means 100.
    pub fn track_limits(&self) -> (f64, f64) {
        let max = if self.max_track_size == 0.0 {
            100.0
        } else {
            self.max_track_size
        };
        (self.min_track_size, max)
    }

    /// Prefixed class name, e.g. `glide-scrolling`
    pub fn class(&self, suffix: &str) -> String {
        format!("{}-{}", self.class_prefix, suffix)
    }
}

/// Settings shared by every instance of a runtime
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// Minimum time between two throttled scroll updates (ms). 0 disables throttling.
    pub scroll_min_update_interval: f64,
    /// Polling period (ms). 0 runs a single check and stops.
    pub check_frequency: f64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            scroll_min_update_interval: 1000.0 / 60.0,
            check_frequency: 1000.0,
        }
    }
}

/// A settings file
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub runtime: GlobalSettings,
    pub instance: Settings,
}

impl Config {
    /// Parse and validate a TOML settings document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(source)?;
        config.instance.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML settings file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!("loading settings from {}", path.display());
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

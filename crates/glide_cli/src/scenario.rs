//! Scenario definition for headless scroll simulations.

use anyhow::{bail, Result};
use glide_scroll::{EdgeDelta, HeadlessConfig, ScrollDuration, ScrollTarget};
use serde::Deserialize;
use std::path::Path;

/// A host description and the steps replayed against it.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub host: HeadlessConfig,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Let time pass, one frame at a time
    Wait { ms: f64 },
    /// User scroll to the given offsets
    Scroll {
        #[serde(default)]
        top: Option<f64>,
        #[serde(default)]
        left: Option<f64>,
    },
    TouchStart,
    TouchMove,
    /// Change content or viewport size without notifying the runtime
    Resize {
        scroll_width: f64,
        scroll_height: f64,
        client_width: f64,
        client_height: f64,
    },
    ScrollTo {
        #[serde(default)]
        x: Option<TargetValue>,
        #[serde(default)]
        y: Option<TargetValue>,
        #[serde(default)]
        duration: Option<DurationValue>,
        #[serde(default)]
        disable_events: bool,
    },
    ScrollIntoView {
        selector: String,
        #[serde(default)]
        duration: Option<DurationValue>,
        #[serde(default)]
        delta: Option<DeltaValue>,
    },
    /// Host reported an overflow change
    CheckSize,
    /// Remove the container from the document
    Detach,
    Destroy,
    /// Print the current scroll state
    Snapshot,
}

/// `"top"`, `"bottom"`, `"left"`, `"right"`, `"keep"` or a pixel offset
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TargetValue {
    Offset(f64),
    Named(String),
}

impl TargetValue {
    pub fn to_target(&self) -> Result<ScrollTarget> {
        match self {
            TargetValue::Offset(offset) => Ok(ScrollTarget::Offset(*offset)),
            TargetValue::Named(name) => match ScrollTarget::parse(name) {
                Some(target) => Ok(target),
                None => bail!("Unknown scroll target {:?}", name),
            },
        }
    }
}

/// Milliseconds, or text such as `"auto"`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Millis(f64),
    Text(String),
}

impl DurationValue {
    pub fn to_duration(&self) -> ScrollDuration {
        match self {
            DurationValue::Millis(ms) => ScrollDuration::from_ms(*ms),
            DurationValue::Text(text) => ScrollDuration::parse(text),
        }
    }
}

/// One margin for every edge, or per-edge margins
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DeltaValue {
    Uniform(f64),
    Edges(EdgeDelta),
}

impl From<&DeltaValue> for EdgeDelta {
    fn from(value: &DeltaValue) -> Self {
        match value {
            DeltaValue::Uniform(delta) => EdgeDelta::uniform(*delta),
            DeltaValue::Edges(edges) => *edges,
        }
    }
}

//! Inputs accepted by a scroll instance

use serde::{Deserialize, Serialize};

/// Destination of one axis in a programmatic scroll
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ScrollTarget {
    /// Leave the axis where it is
    #[default]
    Keep,
    /// Top or left edge
    Start,
    /// Bottom or right edge
    End,
    /// Pixel offset
    Offset(f64),
}

impl ScrollTarget {
    /// Resolve to a pixel offset
    pub fn resolve(&self, current: f64, scroll_size: f64, client_size: f64) -> f64 {
        match self {
            ScrollTarget::Keep => current,
            ScrollTarget::Start => 0.0,
            ScrollTarget::End => scroll_size - client_size,
            ScrollTarget::Offset(offset) => *offset,
        }
    }

    /// Parse `top`/`left`, `bottom`/`right`, `keep` or a number.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "top" | "left" => Some(ScrollTarget::Start),
            "bottom" | "right" => Some(ScrollTarget::End),
            "keep" | "" => Some(ScrollTarget::Keep),
            other => other.parse().ok().map(ScrollTarget::Offset),
        }
    }
}

impl From<f64> for ScrollTarget {
    fn from(offset: f64) -> Self {
        ScrollTarget::Offset(offset)
    }
}

/// Margin kept around an element scrolled into view
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EdgeDelta {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl EdgeDelta {
    pub fn uniform(delta: f64) -> Self {
        Self {
            top: delta,
            right: delta,
            bottom: delta,
            left: delta,
        }
    }
}

impl From<f64> for EdgeDelta {
    fn from(delta: f64) -> Self {
        Self::uniform(delta)
    }
}

/// Native events forwarded by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputEvent {
    Scroll,
    TouchStart,
    TouchMove,
    /// `overflow`, `underflow` or `overflowchanged`
    OverflowChanged,
}

impl InputEvent {
    pub fn event_type(&self) -> glide_core::EventType {
        use glide_core::events::event_types::*;
        match self {
            InputEvent::Scroll => SCROLL,
            InputEvent::TouchStart => TOUCH_START,
            InputEvent::TouchMove => TOUCH_MOVE,
            InputEvent::OverflowChanged => OVERFLOW_CHANGED,
        }
    }
}

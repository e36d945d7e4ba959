//! Host abstraction
//!
//! The engine never touches a document directly. Everything it needs from
//! the embedding (reading and writing scroll offsets, measuring, toggling
//! classes, styling the track elements) goes through [`ScrollHost`].

use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::cache::Dimensions;

/// A client-space rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// An element inside the scroll element
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementTarget {
    /// Resolved by the host, like `querySelector`
    Selector(String),
    /// Opaque handle handed out by the host
    Handle(u64),
}

impl std::fmt::Display for ElementTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementTarget::Selector(s) => write!(f, "{}", s),
            ElementTarget::Handle(h) => write!(f, "#{}", h),
        }
    }
}

impl From<&str> for ElementTarget {
    fn from(selector: &str) -> Self {
        ElementTarget::Selector(selector.to_string())
    }
}

/// Operations the engine needs from a scroll container
pub trait ScrollHost {
    fn scroll_top(&self) -> f64;
    fn scroll_left(&self) -> f64;
    fn set_scroll_top(&mut self, value: f64);
    fn set_scroll_left(&mut self, value: f64);

    /// Current scroll and client sizes of the scroll element
    fn dimensions(&self) -> Dimensions;

    /// Whether the container is still part of the document
    fn is_attached(&self) -> bool;

    /// Whether the device delivers touch events
    fn is_touch(&self) -> bool;

    /// Width of native scrollbars in pixels, 0 for overlay scrollbars
    fn native_scrollbar_size(&self) -> f64;

    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);

    /// Hide the native scrollbars of the scroll element
    fn hide_native_scrollbars(&mut self);

    /// Create the `{prefix}-v`/`{prefix}-vtrack` and `{prefix}-h`/`{prefix}-htrack` elements
    fn create_tracks(&mut self, class_prefix: &str);
    fn remove_tracks(&mut self);

    /// Track length in percent of its scrollbar
    fn set_track_length(&mut self, axis: Axis, percent: f64);
    /// Track translation along its axis, in percent of its own length
    fn set_track_translate(&mut self, axis: Axis, percent: f64);
    fn set_track_transition(&mut self, axis: Axis, transition: &str);

    /// Client rect of the scroll element
    fn viewport_rect(&self) -> Rect;

    /// Client rect of an element inside the scroll element
    fn element_rect(&self, target: &ElementTarget) -> Option<Rect>;

    /// Unbind native listeners and restore the scroll element style
    fn release(&mut self);

    fn scroll_offset(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.scroll_top(),
            Axis::Horizontal => self.scroll_left(),
        }
    }

    fn set_scroll_offset(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Vertical => self.set_scroll_top(value),
            Axis::Horizontal => self.set_scroll_left(value),
        }
    }
}

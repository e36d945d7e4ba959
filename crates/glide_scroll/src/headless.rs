//! In-memory scroll host
//!
//! Models a scroll container without a document, useful for:
//! - Unit and integration tests
//! - Replaying scroll scenarios from the command line
//!
//! Element rects are given in content coordinates and mapped to client
//! coordinates through the viewport origin and the current scroll offset.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::cache::Dimensions;
use crate::host::{ElementTarget, Rect, ScrollHost};

/// An element inside the headless scroll content
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct HeadlessElement {
    pub selector: String,
    /// Rect relative to the top-left corner of the content
    pub rect: Rect,
}

/// Configuration for a headless host.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HeadlessConfig {
    pub scroll_width: f64,
    pub scroll_height: f64,
    pub client_width: f64,
    pub client_height: f64,
    /// Deliver touch events
    pub touch: bool,
    /// Native scrollbar width; 0 models overlay scrollbars
    pub native_scrollbar_size: f64,
    /// Client-space origin of the scroll element
    pub left: f64,
    pub top: f64,
    /// Accept offsets past the content edges, like momentum scrolling
    pub allow_overscroll: bool,
    pub elements: Vec<HeadlessElement>,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            scroll_width: 800.0,
            scroll_height: 600.0,
            client_width: 800.0,
            client_height: 600.0,
            touch: false,
            native_scrollbar_size: 15.0,
            left: 0.0,
            top: 0.0,
            allow_overscroll: false,
            elements: Vec::new(),
        }
    }
}

impl HeadlessConfig {
    /// Create a config with the given content and viewport sizes.
    pub fn new(scroll_width: f64, scroll_height: f64, client_width: f64, client_height: f64) -> Self {
        Self {
            scroll_width,
            scroll_height,
            client_width,
            client_height,
            ..Default::default()
        }
    }

    pub fn with_touch(mut self, touch: bool) -> Self {
        self.touch = touch;
        self
    }

    pub fn with_native_scrollbar_size(mut self, size: f64) -> Self {
        self.native_scrollbar_size = size;
        self
    }

    pub fn with_overscroll(mut self, allow: bool) -> Self {
        self.allow_overscroll = allow;
        self
    }

    /// Add an element at `rect` (content coordinates).
    pub fn with_element(mut self, selector: impl Into<String>, rect: Rect) -> Self {
        self.elements.push(HeadlessElement {
            selector: selector.into(),
            rect,
        });
        self
    }
}

/// Styles written to one track element
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TrackStyle {
    pub length: Option<f64>,
    pub translate: Option<f64>,
    pub transition: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Tracks {
    prefix: String,
    v: TrackStyle,
    h: TrackStyle,
}

/// A scroll container that lives entirely in memory.
#[derive(Clone, Debug)]
pub struct HeadlessHost {
    config: HeadlessConfig,
    scroll_top: f64,
    scroll_left: f64,
    attached: bool,
    classes: BTreeSet<String>,
    tracks: Option<Tracks>,
    native_hidden: bool,
    released: bool,
    scroll_writes: usize,
}

impl HeadlessHost {
    pub fn new(config: HeadlessConfig) -> Self {
        Self {
            config,
            scroll_top: 0.0,
            scroll_left: 0.0,
            attached: true,
            classes: BTreeSet::new(),
            tracks: None,
            native_hidden: false,
            released: false,
            scroll_writes: 0,
        }
    }

    pub fn config(&self) -> &HeadlessConfig {
        &self.config
    }

    /// Change content and viewport sizes. Offsets are re-clamped.
    pub fn resize(&mut self, scroll_width: f64, scroll_height: f64, client_width: f64, client_height: f64) {
        self.config.scroll_width = scroll_width;
        self.config.scroll_height = scroll_height;
        self.config.client_width = client_width;
        self.config.client_height = client_height;
        self.scroll_left = self.clamp(Axis::Horizontal, self.scroll_left);
        self.scroll_top = self.clamp(Axis::Vertical, self.scroll_top);
    }

    /// Remove the container from the document: sizes drop to zero.
    pub fn detach(&mut self) {
        self.attached = false;
        self.resize(0.0, 0.0, 0.0, 0.0);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn has_tracks(&self) -> bool {
        self.tracks.is_some()
    }

    /// Prefix the tracks were created with
    pub fn track_prefix(&self) -> Option<&str> {
        self.tracks.as_ref().map(|t| t.prefix.as_str())
    }

    pub fn track(&self, axis: Axis) -> Option<&TrackStyle> {
        self.tracks.as_ref().map(|t| match axis {
            Axis::Vertical => &t.v,
            Axis::Horizontal => &t.h,
        })
    }

    pub fn native_hidden(&self) -> bool {
        self.native_hidden
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Number of scroll offset writes so far
    pub fn scroll_writes(&self) -> usize {
        self.scroll_writes
    }

    fn clamp(&self, axis: Axis, value: f64) -> f64 {
        if self.config.allow_overscroll {
            return value;
        }
        let max = match axis {
            Axis::Vertical => self.config.scroll_height - self.config.client_height,
            Axis::Horizontal => self.config.scroll_width - self.config.client_width,
        };
        value.min(max).max(0.0)
    }

    fn track_mut(&mut self, axis: Axis) -> Option<&mut TrackStyle> {
        self.tracks.as_mut().map(|t| match axis {
            Axis::Vertical => &mut t.v,
            Axis::Horizontal => &mut t.h,
        })
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(HeadlessConfig::default())
    }
}

impl ScrollHost for HeadlessHost {
    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    fn set_scroll_top(&mut self, value: f64) {
        self.scroll_top = self.clamp(Axis::Vertical, value);
        self.scroll_writes += 1;
    }

    fn set_scroll_left(&mut self, value: f64) {
        self.scroll_left = self.clamp(Axis::Horizontal, value);
        self.scroll_writes += 1;
    }

    fn dimensions(&self) -> Dimensions {
        Dimensions::new(
            self.config.scroll_width,
            self.config.scroll_height,
            self.config.client_width,
            self.config.client_height,
        )
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn is_touch(&self) -> bool {
        self.config.touch
    }

    fn native_scrollbar_size(&self) -> f64 {
        self.config.native_scrollbar_size
    }

    fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    fn hide_native_scrollbars(&mut self) {
        self.native_hidden = true;
    }

    fn create_tracks(&mut self, class_prefix: &str) {
        self.tracks = Some(Tracks {
            prefix: class_prefix.to_string(),
            ..Default::default()
        });
    }

    fn remove_tracks(&mut self) {
        self.tracks = None;
    }

    fn set_track_length(&mut self, axis: Axis, percent: f64) {
        if let Some(track) = self.track_mut(axis) {
            track.length = Some(percent);
        }
    }

    fn set_track_translate(&mut self, axis: Axis, percent: f64) {
        if let Some(track) = self.track_mut(axis) {
            track.translate = Some(percent);
        }
    }

    fn set_track_transition(&mut self, axis: Axis, transition: &str) {
        if let Some(track) = self.track_mut(axis) {
            track.transition = Some(transition.to_string());
        }
    }

    fn viewport_rect(&self) -> Rect {
        Rect::new(
            self.config.left,
            self.config.top,
            self.config.client_width,
            self.config.client_height,
        )
    }

    fn element_rect(&self, target: &ElementTarget) -> Option<Rect> {
        let element = match target {
            ElementTarget::Selector(selector) => {
                self.config.elements.iter().find(|e| &e.selector == selector)
            }
            ElementTarget::Handle(index) => {
                let index = usize::try_from(*index).ok()?;
                self.config.elements.get(index)
            }
        }?;

        Some(Rect::new(
            self.config.left + element.rect.left - self.scroll_left,
            self.config.top + element.rect.top - self.scroll_top,
            element.rect.width,
            element.rect.height,
        ))
    }

    fn release(&mut self) {
        self.native_hidden = false;
        self.released = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_are_clamped() {
        let mut host = HeadlessHost::new(HeadlessConfig::new(300.0, 1000.0, 100.0, 200.0));

        host.set_scroll_top(5000.0);
        assert_eq!(host.scroll_top(), 800.0);
        host.set_scroll_left(-10.0);
        assert_eq!(host.scroll_left(), 0.0);
        assert_eq!(host.scroll_writes(), 2);
    }

    #[test]
    fn test_overscroll_allowed() {
        let mut host =
            HeadlessHost::new(HeadlessConfig::new(100.0, 1000.0, 100.0, 200.0).with_overscroll(true));
        host.set_scroll_top(-40.0);
        assert_eq!(host.scroll_top(), -40.0);
    }

    #[test]
    fn test_element_rect_follows_scroll() {
        let config = HeadlessConfig::new(100.0, 1000.0, 100.0, 200.0)
            .with_element("#item", Rect::new(0.0, 500.0, 100.0, 50.0));
        let mut host = HeadlessHost::new(HeadlessConfig { top: 20.0, ..config });

        let rect = host.element_rect(&"#item".into()).unwrap();
        assert_eq!(rect.top, 520.0);

        host.set_scroll_top(300.0);
        let rect = host.element_rect(&ElementTarget::Handle(0)).unwrap();
        assert_eq!(rect.top, 220.0);

        assert!(host.element_rect(&"#missing".into()).is_none());
        assert!(host.element_rect(&ElementTarget::Handle(3)).is_none());
    }

    #[test]
    fn test_detach_zeroes_sizes() {
        let mut host = HeadlessHost::default();
        host.detach();
        assert!(!host.is_attached());
        let dims = host.dimensions();
        assert_eq!(dims.scroll_height, 0.0);
        assert_eq!(dims.client_height, 0.0);
    }

    #[test]
    fn test_track_styles_need_tracks() {
        let mut host = HeadlessHost::default();
        host.set_track_length(Axis::Vertical, 20.0);
        assert!(host.track(Axis::Vertical).is_none());

        host.create_tracks("glide");
        host.set_track_length(Axis::Vertical, 20.0);
        host.set_track_translate(Axis::Horizontal, 50.0);
        assert_eq!(host.track_prefix(), Some("glide"));
        assert_eq!(host.track(Axis::Vertical).unwrap().length, Some(20.0));
        assert_eq!(host.track(Axis::Horizontal).unwrap().translate, Some(50.0));

        host.remove_tracks();
        assert!(!host.has_tracks());
    }
}

//! Per-axis scrollbar state
//!
//! Each axis tracks its latest geometry, the last edge it reported, and
//! whether its track is enabled. The track state follows the content:
//! enabled while the content overflows, disabled once it fits.

use glide_core::events::event_types::{CONTENT_FITS, CONTENT_OVERFLOW};
use glide_core::fsm::{StateMachine, StateTransitions};
use glide_core::EventType;
use serde::Serialize;

use crate::edge::EdgeMark;
use crate::geometry::AxisGeometry;

/// Scroll axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::Vertical, Axis::Horizontal];

    /// Short axis tag used in class names (`v` / `h`)
    pub fn tag(&self) -> &'static str {
        match self {
            Axis::Vertical => "v",
            Axis::Horizontal => "h",
        }
    }

    /// Class set on the scroll element while this axis' track is enabled
    pub fn enabled_class(&self) -> &'static str {
        match self {
            Axis::Vertical => "vtrack-on",
            Axis::Horizontal => "htrack-on",
        }
    }
}

/// Track state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrackState {
    #[default]
    Disabled,
    Enabled,
}

impl StateTransitions for TrackState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        match (self, event) {
            (TrackState::Disabled, CONTENT_OVERFLOW) => Some(TrackState::Enabled),
            (TrackState::Enabled, CONTENT_FITS) => Some(TrackState::Disabled),
            _ => None,
        }
    }
}

/// Cached state of one axis
#[derive(Debug, Clone, Default)]
pub struct AxisState {
    /// Latest geometry, `None` until the first update
    geometry: Option<AxisGeometry>,
    /// Last edge reported by edge detection, `None` until the first check
    pub last_edge: Option<EdgeMark>,
    track: StateMachine<TrackState>,
}

impl AxisState {
    /// Latest geometry, or a full track before the first update
    pub fn geometry(&self) -> AxisGeometry {
        self.geometry.unwrap_or_default()
    }

    /// Size from the last update, if any
    pub fn last_size(&self) -> Option<f64> {
        self.geometry.map(|g| g.size)
    }

    pub fn set_geometry(&mut self, geometry: AxisGeometry) {
        self.geometry = Some(geometry);
    }

    pub fn is_enabled(&self) -> bool {
        self.track.is_in(TrackState::Enabled)
    }

    pub fn track_state(&self) -> TrackState {
        self.track.current_state()
    }

    /// Feed a freshly computed thumb size into the track state machine.
    ///
    /// Returns the new state when the track was enabled or disabled.
    pub fn sync_track(&mut self, size: f64) -> Option<TrackState> {
        if size == 1.0 {
            self.track.send(CONTENT_FITS)
        } else if size < 1.0 {
            self.track.send(CONTENT_OVERFLOW)
        } else {
            None
        }
    }
}

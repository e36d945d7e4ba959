//! Notifications delivered to instance listeners

use serde::Serialize;

use crate::axis::Axis;
use crate::cache::{Cache, Dimensions};
use crate::edge::EdgeMark;
use crate::geometry::AxisGeometry;

/// Kind of notification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    SizeChange,
    ScrollStop,
    ScrollReachEdge,
    ScrollReachTop,
    ScrollReachBottom,
    ScrollReachLeft,
    ScrollReachRight,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 7] = [
        NotificationKind::SizeChange,
        NotificationKind::ScrollStop,
        NotificationKind::ScrollReachEdge,
        NotificationKind::ScrollReachTop,
        NotificationKind::ScrollReachBottom,
        NotificationKind::ScrollReachLeft,
        NotificationKind::ScrollReachRight,
    ];

    /// Event name as seen by listeners
    pub fn name(&self) -> &'static str {
        match self {
            NotificationKind::SizeChange => "sizechange",
            NotificationKind::ScrollStop => "scrollstop",
            NotificationKind::ScrollReachEdge => "scrollreachedge",
            NotificationKind::ScrollReachTop => "scrollreachtop",
            NotificationKind::ScrollReachBottom => "scrollreachbottom",
            NotificationKind::ScrollReachLeft => "scrollreachleft",
            NotificationKind::ScrollReachRight => "scrollreachright",
        }
    }

    /// The per-axis "reached" notification for an edge, if any
    pub fn reached(axis: Axis, edge: EdgeMark) -> Option<Self> {
        match (axis, edge) {
            (Axis::Vertical, EdgeMark::Start) => Some(NotificationKind::ScrollReachTop),
            (Axis::Vertical, EdgeMark::End) => Some(NotificationKind::ScrollReachBottom),
            (Axis::Horizontal, EdgeMark::Start) => Some(NotificationKind::ScrollReachLeft),
            (Axis::Horizontal, EdgeMark::End) => Some(NotificationKind::ScrollReachRight),
            (_, EdgeMark::Between) => None,
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Scroll state exposed with every notification
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollSnapshot {
    pub v: AxisGeometry,
    pub h: AxisGeometry,
    #[serde(flatten)]
    pub dimensions: Dimensions,
    pub scroll_top: f64,
    pub scroll_bottom: f64,
    pub scroll_left: f64,
    pub scroll_right: f64,
}

impl ScrollSnapshot {
    /// Build a snapshot from cached state. Pixel fields are derived from the
    /// thumb position ratios.
    pub fn from_cache(cache: &Cache) -> Self {
        let dims = cache.dimensions();
        let v = cache.v.geometry();
        let h = cache.h.geometry();
        Self {
            v,
            h,
            dimensions: dims,
            scroll_top: v.position * dims.scroll_height,
            scroll_bottom: (1.0 - v.position) * dims.scroll_height,
            scroll_left: h.position * dims.scroll_width,
            scroll_right: (1.0 - h.position) * dims.scroll_width,
        }
    }
}

/// A notification and its payload
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScrollEvent {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub detail: ScrollSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        let names: Vec<_> = NotificationKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(
            names,
            [
                "sizechange",
                "scrollstop",
                "scrollreachedge",
                "scrollreachtop",
                "scrollreachbottom",
                "scrollreachleft",
                "scrollreachright"
            ]
        );
    }

    #[test]
    fn test_reached_kinds() {
        assert_eq!(
            NotificationKind::reached(Axis::Vertical, EdgeMark::End),
            Some(NotificationKind::ScrollReachBottom)
        );
        assert_eq!(
            NotificationKind::reached(Axis::Horizontal, EdgeMark::Start),
            Some(NotificationKind::ScrollReachLeft)
        );
        assert_eq!(NotificationKind::reached(Axis::Vertical, EdgeMark::Between), None);
    }

    #[test]
    fn test_snapshot_pixel_fields() {
        let mut cache = Cache {
            dims: Some(Dimensions::new(100.0, 1000.0, 100.0, 200.0)),
            ..Default::default()
        };
        cache.v.set_geometry(AxisGeometry {
            position: 0.3,
            size: 0.2,
            percent: 37.5,
        });

        let snapshot = ScrollSnapshot::from_cache(&cache);
        assert!((snapshot.scroll_top - 300.0).abs() < 1e-9);
        assert!((snapshot.scroll_bottom - 700.0).abs() < 1e-9);
        assert_eq!(snapshot.scroll_left, 0.0);
        assert_eq!(snapshot.scroll_right, 100.0);
    }

    #[test]
    fn test_event_json_shape() {
        let event = ScrollEvent {
            kind: NotificationKind::ScrollReachBottom,
            detail: ScrollSnapshot::from_cache(&Cache::default()),
        };
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["type"], "scrollreachbottom");
        assert!(json["detail"]["scrollTop"].is_number());
        assert!(json["detail"]["scrollHeight"].is_number());
        assert_eq!(json["detail"]["v"]["size"], 1.0);
    }
}

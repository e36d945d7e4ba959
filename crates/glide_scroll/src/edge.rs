//! Edge detection
//!
//! Decides whether the thumb newly reached the start or end of its track.
//! Distances are measured in content pixels with a 1px tolerance either way.

use serde::Serialize;

use crate::geometry::AxisGeometry;

/// Where the scroll position sits relative to the content edges
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMark {
    /// Top or left edge
    Start,
    /// Bottom or right edge
    End,
    /// Away from both edges
    Between,
}

/// When an edge check runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeCheck {
    /// While a touch is in progress: repeated hits count, used to keep the
    /// content from resting exactly on an edge
    Live,
    /// After scrolling settled: only new hits count, notifications fire
    Final,
}

impl EdgeCheck {
    pub fn ignores_last_edge(&self) -> bool {
        matches!(self, EdgeCheck::Live)
    }
}

/// Classify the scroll position of one axis.
///
/// Returns `None` when nothing changed: either the edge was already
/// reported, or the content is overscrolled past the edge it last hit.
pub fn detect_edge(
    geometry: &AxisGeometry,
    last_edge: Option<EdgeMark>,
    full_size: f64,
    ignore_last: bool,
) -> Option<EdgeMark> {
    let to_start = geometry.position * full_size;
    let to_end = full_size - (geometry.position + geometry.size) * full_size;

    if (to_start < 0.0 && last_edge == Some(EdgeMark::Start))
        || (to_end < 0.0 && last_edge == Some(EdgeMark::End))
    {
        return None;
    }

    if to_start <= 1.0 && to_start > -1.0 && (last_edge != Some(EdgeMark::Start) || ignore_last) {
        return Some(EdgeMark::Start);
    }

    if to_end <= 1.0
        && to_end > -1.0
        && to_start > 1.0
        && (last_edge != Some(EdgeMark::End) || ignore_last)
    {
        return Some(EdgeMark::End);
    }

    if !ignore_last && to_start > 1.0 && to_end > 1.0 {
        return Some(EdgeMark::Between);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(position: f64, size: f64) -> AxisGeometry {
        AxisGeometry {
            position,
            size,
            percent: 0.0,
        }
    }

    #[test]
    fn test_start_edge_first_time() {
        assert_eq!(
            detect_edge(&at(0.0, 0.2), None, 1000.0, true),
            Some(EdgeMark::Start)
        );
        assert_eq!(
            detect_edge(&at(0.0, 0.2), None, 1000.0, false),
            Some(EdgeMark::Start)
        );
    }

    #[test]
    fn test_end_edge_after_start() {
        assert_eq!(
            detect_edge(&at(0.8, 0.2), Some(EdgeMark::Start), 1000.0, true),
            Some(EdgeMark::End)
        );
    }

    #[test]
    fn test_repeated_edge_is_suppressed_when_final() {
        assert_eq!(
            detect_edge(&at(0.0, 0.2), Some(EdgeMark::Start), 1000.0, false),
            None
        );
        assert_eq!(
            detect_edge(&at(0.8, 0.2), Some(EdgeMark::End), 1000.0, false),
            None
        );
    }

    #[test]
    fn test_repeated_edge_reported_when_live() {
        assert_eq!(
            detect_edge(&at(0.0, 0.2), Some(EdgeMark::Start), 1000.0, true),
            Some(EdgeMark::Start)
        );
    }

    #[test]
    fn test_between_resets_only_when_final() {
        let middle = at(0.4, 0.2);
        assert_eq!(
            detect_edge(&middle, Some(EdgeMark::Start), 1000.0, false),
            Some(EdgeMark::Between)
        );
        assert_eq!(detect_edge(&middle, Some(EdgeMark::Start), 1000.0, true), None);
    }

    #[test]
    fn test_overscroll_past_last_edge_is_ignored() {
        assert_eq!(
            detect_edge(&at(-0.01, 0.2), Some(EdgeMark::Start), 1000.0, true),
            None
        );
        assert_eq!(
            detect_edge(&at(0.81, 0.2), Some(EdgeMark::End), 1000.0, true),
            None
        );
    }

    #[test]
    fn test_one_pixel_tolerance() {
        // 0.5px from the start still counts
        assert_eq!(
            detect_edge(&at(0.0005, 0.2), None, 1000.0, false),
            Some(EdgeMark::Start)
        );
        // 2px from the start does not
        assert_eq!(
            detect_edge(&at(0.002, 0.2), None, 1000.0, false),
            Some(EdgeMark::Between)
        );
    }

    #[test]
    fn test_edge_check_modes() {
        assert!(EdgeCheck::Live.ignores_last_edge());
        assert!(!EdgeCheck::Final.ignores_last_edge());
    }
}

//! Scrollbar track geometry
//!
//! Maps a scroll offset onto the thumb position and size along its track.
//! All values are ratios of the track length except `percent`, which is the
//! scroll progress in percent and may leave `[0, 100]` while overscrolling.

use serde::Serialize;

/// Thumb placement along one axis
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AxisGeometry {
    /// Thumb offset as a fraction of the track
    pub position: f64,
    /// Thumb length as a fraction of the track, `1.0` when nothing overflows
    pub size: f64,
    /// Scroll progress, `0` at the start edge and `100` at the end edge
    pub percent: f64,
}

impl AxisGeometry {
    /// Geometry of an axis whose content fits the viewport
    pub const FULL: AxisGeometry = AxisGeometry {
        position: 0.0,
        size: 1.0,
        percent: 0.0,
    };

    /// Whether the content overflows on this axis
    pub fn overflows(&self) -> bool {
        self.size < 1.0
    }

    /// Track length in percent of the scrollbar
    pub fn track_length_percent(&self) -> f64 {
        self.size * 100.0
    }

    /// Translation of the thumb in percent of its own length
    pub fn track_translate_percent(&self) -> f64 {
        (1.0 / self.size) * self.position * 100.0
    }
}

impl Default for AxisGeometry {
    fn default() -> Self {
        Self::FULL
    }
}

/// Compute the thumb geometry for one axis.
///
/// `min_track` and `max_track` bound the thumb length in percent of the
/// track. When clamping changes the length, the position is shifted in
/// proportion to the scroll progress so the thumb still reaches both ends.
pub fn calculate(
    position: f64,
    view_size: f64,
    scroll_size: f64,
    min_track: f64,
    max_track: f64,
) -> AxisGeometry {
    let min_ratio = min_track / 100.0;
    let max_ratio = max_track / 100.0;

    let mut size_ratio = view_size / scroll_size;

    if size_ratio == 1.0 || scroll_size == 0.0 {
        return AxisGeometry::FULL;
    }

    let mut position_ratio = position / scroll_size;
    let percent = 100.0 * position / (scroll_size - view_size);

    if size_ratio > max_ratio {
        position_ratio += (size_ratio - max_ratio) * (percent / 100.0);
        size_ratio = max_ratio;
    }

    if size_ratio < min_ratio {
        position_ratio += (size_ratio - min_ratio) * (percent / 100.0);
        size_ratio = min_ratio;
    }

    // Overscroll: pin the thumb, keep its length stable for transitions
    if percent < 0.0 {
        position_ratio = 0.0;
    }
    if percent > 100.0 {
        position_ratio = 1.0 - size_ratio;
    }

    AxisGeometry {
        position: position_ratio,
        size: size_ratio,
        percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overflow_is_full_track() {
        assert_eq!(calculate(0.0, 500.0, 500.0, 5.0, 90.0), AxisGeometry::FULL);
        assert_eq!(calculate(0.0, 0.0, 0.0, 5.0, 90.0), AxisGeometry::FULL);
        assert!(!AxisGeometry::FULL.overflows());
    }

    #[test]
    fn test_basic_ratio() {
        let g = calculate(0.0, 200.0, 1000.0, 5.0, 90.0);
        assert_eq!(g.size, 0.2);
        assert_eq!(g.position, 0.0);
        assert_eq!(g.percent, 0.0);
        assert!(g.overflows());
    }

    #[test]
    fn test_scrolled_to_end() {
        let g = calculate(800.0, 200.0, 1000.0, 5.0, 90.0);
        assert_eq!(g.percent, 100.0);
        assert!((g.position - (1.0 - g.size)).abs() < 1e-12);
        assert!((g.track_translate_percent() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_clamp_compensates_position() {
        // 950/1000 = 0.95 > 0.9
        let g = calculate(25.0, 950.0, 1000.0, 5.0, 90.0);
        assert_eq!(g.size, 0.9);
        assert!((g.percent - 50.0).abs() < 1e-12);
        // 0.025 + 0.05 * 0.5
        assert!((g.position - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_min_clamp_compensates_position() {
        // 100/10000 = 0.01 < 0.05
        let g = calculate(9900.0, 100.0, 10000.0, 5.0, 90.0);
        assert_eq!(g.size, 0.05);
        assert!((g.percent - 100.0).abs() < 1e-12);
        // thumb ends flush with the track end
        assert!((g.position + g.size - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_overscroll_pins_thumb() {
        let top = calculate(-40.0, 200.0, 1000.0, 5.0, 90.0);
        assert!(top.percent < 0.0);
        assert_eq!(top.position, 0.0);
        assert_eq!(top.size, 0.2);

        let bottom = calculate(860.0, 200.0, 1000.0, 5.0, 90.0);
        assert!(bottom.percent > 100.0);
        assert_eq!(bottom.position, 1.0 - bottom.size);
    }

    #[test]
    fn test_size_within_track_limits() {
        for scroll_size in [201.0, 250.0, 400.0, 1000.0, 5000.0, 100_000.0] {
            for position in [0.0, 1.0, 100.0, scroll_size - 200.0] {
                let g = calculate(position, 200.0, scroll_size, 5.0, 90.0);
                assert!(
                    (0.05..=0.9).contains(&g.size),
                    "size {} out of range for scroll size {}",
                    g.size,
                    scroll_size
                );
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let a = calculate(333.3, 123.0, 4567.0, 5.0, 90.0);
        let b = calculate(333.3, 123.0, 4567.0, 5.0, 90.0);
        assert_eq!(a, b);
    }
}

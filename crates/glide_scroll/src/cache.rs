//! Measurement cache

use serde::Serialize;

use crate::axis::{Axis, AxisState};

/// Scroll and client sizes of the scroll element
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub scroll_height: f64,
    pub client_height: f64,
    pub scroll_width: f64,
    pub client_width: f64,
}

impl Dimensions {
    pub fn new(scroll_width: f64, scroll_height: f64, client_width: f64, client_height: f64) -> Self {
        Self {
            scroll_height,
            client_height,
            scroll_width,
            client_width,
        }
    }

    /// `(scroll size, client size)` along `axis`
    pub fn along(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::Vertical => (self.scroll_height, self.client_height),
            Axis::Horizontal => (self.scroll_width, self.client_width),
        }
    }
}

/// Last known measurements and axis state of an instance
#[derive(Debug, Default)]
pub struct Cache {
    /// `None` until the first measurement
    pub dims: Option<Dimensions>,
    pub v: AxisState,
    pub h: AxisState,
    /// Time of the last throttled scroll update
    pub scroll_now: Option<f64>,
}

impl Cache {
    /// Dimensions, zeroed before the first measurement
    pub fn dimensions(&self) -> Dimensions {
        self.dims.unwrap_or_default()
    }

    pub fn axis(&self, axis: Axis) -> &AxisState {
        match axis {
            Axis::Vertical => &self.v,
            Axis::Horizontal => &self.h,
        }
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut AxisState {
        match axis {
            Axis::Vertical => &mut self.v,
            Axis::Horizontal => &mut self.h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_along_axis() {
        let dims = Dimensions::new(300.0, 1000.0, 100.0, 200.0);
        assert_eq!(dims.along(Axis::Vertical), (1000.0, 200.0));
        assert_eq!(dims.along(Axis::Horizontal), (300.0, 100.0));
    }

    #[test]
    fn test_unmeasured_cache() {
        let cache = Cache::default();
        assert!(cache.dims.is_none());
        assert_eq!(cache.dimensions(), Dimensions::default());
        assert!(cache.scroll_now.is_none());
    }
}

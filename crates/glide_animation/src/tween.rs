//! Two-axis scroll tween

use crate::duration::ScrollDuration;
use crate::easing::ease_out_cubic;

/// Interpolates scroll offsets from a start position to an end position
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollTween {
    start_x: f64,
    end_x: f64,
    start_y: f64,
    end_y: f64,
    started_at: f64,
    duration_ms: f64,
}

/// Offsets to apply for one animation frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenFrame {
    /// New horizontal offset, `None` when the axis does not move
    pub x: Option<f64>,
    /// New vertical offset, `None` when the axis does not move
    pub y: Option<f64>,
    /// Linear progress in `[0, 1]`
    pub progress: f64,
    pub finished: bool,
}

impl ScrollTween {
    /// Create a tween starting at `started_at` (milliseconds).
    ///
    /// The duration is resolved immediately from the travelled distance.
    pub fn new(
        (start_x, end_x): (f64, f64),
        (start_y, end_y): (f64, f64),
        started_at: f64,
        duration: ScrollDuration,
    ) -> Self {
        let duration_ms = duration.resolve(end_x - start_x, end_y - start_y);
        Self {
            start_x,
            end_x,
            start_y,
            end_y,
            started_at,
            duration_ms,
        }
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn target(&self) -> (f64, f64) {
        (self.end_x, self.end_y)
    }

    /// Sample the tween at `now`
    pub fn sample(&self, now: f64) -> TweenFrame {
        let progress = if self.duration_ms > 0.0 {
            ((now - self.started_at) / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let eased = ease_out_cubic(progress);

        let x = (self.end_x != self.start_x)
            .then(|| eased * (self.end_x - self.start_x) + self.start_x);
        let y = (self.end_y != self.start_y)
            .then(|| eased * (self.end_y - self.start_y) + self.start_y);

        TweenFrame {
            x,
            y,
            progress,
            finished: progress >= 1.0,
        }
    }
}

//! Scroll animation durations

use std::convert::Infallible;
use std::str::FromStr;

/// Duration used when a requested duration cannot be interpreted
pub const FALLBACK_DURATION_MS: f64 = 500.0;

/// Exponent of the distance-based duration curve
const AUTO_EXPONENT: f64 = 0.62;
/// Scale of the distance-based duration curve
const AUTO_SCALE: f64 = 15.0;

/// How long a programmatic scroll should take
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ScrollDuration {
    /// Jump synchronously, no animation frames
    Instant,
    /// Derive the duration from the distance travelled
    #[default]
    Auto,
    /// Fixed duration in milliseconds
    Fixed(f64),
}

impl ScrollDuration {
    /// Interpret a millisecond value. `0` jumps, `NaN` means auto, anything
    /// else that is not a positive finite number falls back to 500ms.
    pub fn from_ms(ms: f64) -> Self {
        if ms == 0.0 {
            ScrollDuration::Instant
        } else if ms.is_nan() {
            ScrollDuration::Auto
        } else if ms.is_finite() && ms > 0.0 {
            ScrollDuration::Fixed(ms)
        } else {
            tracing::warn!("unusable scroll duration {}, using {}ms", ms, FALLBACK_DURATION_MS);
            ScrollDuration::Fixed(FALLBACK_DURATION_MS)
        }
    }

    /// Interpret a textual duration: `"auto"` (or empty), a number of
    /// milliseconds, or anything else which falls back to 500ms.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() || text.eq_ignore_ascii_case("auto") {
            return ScrollDuration::Auto;
        }
        match text.parse::<f64>() {
            Ok(ms) => Self::from_ms(ms),
            Err(_) => {
                tracing::warn!(
                    "non-numeric scroll duration {:?}, using {}ms",
                    text,
                    FALLBACK_DURATION_MS
                );
                ScrollDuration::Fixed(FALLBACK_DURATION_MS)
            }
        }
    }

    pub fn is_instant(&self) -> bool {
        matches!(self, ScrollDuration::Instant)
    }

    /// Resolve to milliseconds for a scroll travelling `dx`/`dy` pixels.
    ///
    /// Auto durations grow sub-linearly: ~700ms for 500px, ~1670ms for 2000px.
    pub fn resolve(&self, dx: f64, dy: f64) -> f64 {
        match self {
            ScrollDuration::Instant => 0.0,
            ScrollDuration::Auto => dx.abs().max(dy.abs()).powf(AUTO_EXPONENT) * AUTO_SCALE,
            ScrollDuration::Fixed(ms) => *ms,
        }
    }
}

impl From<f64> for ScrollDuration {
    fn from(ms: f64) -> Self {
        Self::from_ms(ms)
    }
}

impl FromStr for ScrollDuration {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

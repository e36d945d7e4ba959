//! Glide Animation System
//!
//! Time-based scroll animations driven one frame at a time.
//!
//! # Features
//!
//! - **Easing**: ease-out cubic, matching native smooth scrolling
//! - **Durations**: fixed, instant, or derived from the travelled distance
//! - **Tweens**: independent per-axis interpolation from start to end offsets
//! - **Scheduler**: at most one animation per owner, superseded animations
//!   are cancelled explicitly

pub mod duration;
pub mod easing;
pub mod scheduler;
pub mod tween;

pub use duration::ScrollDuration;
pub use easing::ease_out_cubic;
pub use scheduler::{AnimationId, AnimationScheduler};
pub use tween::{ScrollTween, TweenFrame};

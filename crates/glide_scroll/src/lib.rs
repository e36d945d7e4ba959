//! Glide Scroll
//!
//! Custom scrollbar engine for scroll containers. The engine computes track
//! geometry, detects edges, animates programmatic scrolling and coordinates
//! native scroll and touch events. Everything platform specific sits behind
//! the [`ScrollHost`] trait.
//!
//! # Modules
//!
//! - [`geometry`]: thumb position and size from scroll offsets
//! - [`edge`]: start/end edge detection
//! - [`axis`]: per-axis track state machine
//! - [`instance`]: event coordination for one container
//! - [`runtime`]: instance registry, timers, animations and the polling loop
//! - [`headless`]: an in-memory host for tests and simulations

pub mod axis;
pub mod cache;
pub mod edge;
pub mod error;
pub mod geometry;
pub mod headless;
pub mod host;
pub mod instance;
pub mod notify;
pub mod phase;
pub mod request;
pub mod runtime;
pub mod settings;

pub use axis::{Axis, AxisState, TrackState};
pub use cache::{Cache, Dimensions};
pub use edge::{detect_edge, EdgeCheck, EdgeMark};
pub use error::{ConfigError, Result, ScrollError};
pub use geometry::{calculate, AxisGeometry};
pub use headless::{HeadlessConfig, HeadlessElement, HeadlessHost, TrackStyle};
pub use host::{ElementTarget, Rect, ScrollHost};
pub use instance::{Instance, SizeCheck};
pub use notify::{NotificationKind, ScrollEvent, ScrollSnapshot};
pub use phase::ScrollPhase;
pub use request::{EdgeDelta, InputEvent, ScrollTarget};
pub use runtime::{InstanceId, Runtime};
pub use settings::{Config, GlobalSettings, Settings};

pub use glide_animation::ScrollDuration;

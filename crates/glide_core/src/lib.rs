//! Glide Core Runtime
//!
//! This crate provides the foundational primitives for the Glide scrollbar engine:
//!
//! - **State Machines**: enum-driven transitions for scroll phases and track states
//! - **Event Dispatch**: keyed notification listeners
//! - **Clocks**: a system clock and a controllable virtual clock
//! - **Timers**: a deadline queue for debounce and polling timers
//!
//! # Example
//!
//! ```rust
//! use glide_core::clock::{Clock, VirtualClock};
//! use glide_core::timer::TimerQueue;
//!
//! let clock = VirtualClock::new();
//! let mut timers = TimerQueue::new();
//! timers.schedule(clock.now_ms() + 300.0, "scroll-stop");
//!
//! clock.advance(299.0);
//! assert!(timers.take_due(clock.now_ms()).is_empty());
//!
//! clock.advance(1.0);
//! let due = timers.take_due(clock.now_ms());
//! assert_eq!(due.len(), 1);
//! assert_eq!(due[0].1, "scroll-stop");
//! ```

pub mod clock;
pub mod events;
pub mod fsm;
pub mod timer;

pub use clock::{Clock, SystemClock, VirtualClock, FRAME_INTERVAL_MS};
pub use events::{EventDispatcher, EventType};
pub use fsm::{StateMachine, StateTransitions};
pub use timer::{TimerId, TimerQueue};

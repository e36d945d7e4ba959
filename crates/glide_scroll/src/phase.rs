//! Scroll phase state machine
//!
//! ```text
//! Idle --SCROLL--> Scrolling --SCROLL_END--> Settling --SETTLED--> Idle
//!   \______________SCROLL_END_______________/
//! ```
//!
//! A settle can start from `Idle` when a size change forces one.

use glide_core::events::event_types::{SCROLL, SCROLL_END, SETTLED};
use glide_core::fsm::StateTransitions;
use glide_core::EventType;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollPhase {
    #[default]
    Idle,
    Scrolling,
    Settling,
}

impl StateTransitions for ScrollPhase {
    fn on_event(&self, event: EventType) -> Option<Self> {
        match (self, event) {
            (ScrollPhase::Idle, SCROLL) => Some(ScrollPhase::Scrolling),
            (ScrollPhase::Idle | ScrollPhase::Scrolling, SCROLL_END) => Some(ScrollPhase::Settling),
            (ScrollPhase::Settling, SETTLED) => Some(ScrollPhase::Idle),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::fsm::StateMachine;

    #[test]
    fn test_scroll_cycle() {
        let mut phase = StateMachine::new(ScrollPhase::Idle);

        assert_eq!(phase.send(SCROLL), Some(ScrollPhase::Scrolling));
        // further scroll events keep scrolling
        assert_eq!(phase.send(SCROLL), None);
        assert_eq!(phase.send(SCROLL_END), Some(ScrollPhase::Settling));
        assert_eq!(phase.send(SETTLED), Some(ScrollPhase::Idle));
        assert_eq!(phase.history().count(), 3);
    }

    #[test]
    fn test_forced_settle_from_idle() {
        let mut phase = StateMachine::new(ScrollPhase::Idle);
        assert_eq!(phase.send(SCROLL_END), Some(ScrollPhase::Settling));
        assert!(!phase.can_send(SCROLL));
        assert!(phase.can_send(SETTLED));
    }
}

//! State Machine Runtime
//!
//! Flat state machines whose transition table is expressed by an enum
//! implementing [`StateTransitions`]. Supports:
//! - Transition lookup (`can_send`)
//! - Bounded transition history for debugging

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use crate::events::EventType;

/// Number of transitions kept in the debugging history
const HISTORY_LIMIT: usize = 32;

/// A state enum that knows its own transition table
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// A state machine instance
#[derive(Debug, Clone)]
pub struct StateMachine<S: StateTransitions> {
    current_state: S,
    /// History of state transitions (for debugging)
    history: VecDeque<(S, EventType, S)>,
}

impl<S: StateTransitions> StateMachine<S> {
    /// Create a new state machine in `initial_state`
    pub fn new(initial_state: S) -> Self {
        Self {
            current_state: initial_state,
            history: VecDeque::new(),
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: EventType) -> bool {
        self.current_state.on_event(event).is_some()
    }

    /// Send an event to the state machine.
    ///
    /// Returns the new state when a transition happened.
    pub fn send(&mut self, event: EventType) -> Option<S> {
        let from = self.current_state;
        let to = from.on_event(event)?;

        self.current_state = to;

        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back((from, event, to));

        tracing::trace!("fsm {:?} --{}--> {:?}", from, event, to);
        Some(to)
    }

    /// Get transition history, oldest first
    pub fn history(&self) -> impl Iterator<Item = &(S, EventType, S)> {
        self.history.iter()
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRESS: EventType = 1;
    const RELEASE: EventType = 2;
    const DISABLE: EventType = 3;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    enum Switch {
        #[default]
        Off,
        On,
        Broken,
    }

    impl StateTransitions for Switch {
        fn on_event(&self, event: EventType) -> Option<Self> {
            match (self, event) {
                (Switch::Off, PRESS) => Some(Switch::On),
                (Switch::On, RELEASE) => Some(Switch::Off),
                (Switch::Broken, _) => None,
                (_, DISABLE) => Some(Switch::Broken),
                _ => None,
            }
        }
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = StateMachine::new(Switch::Off);

        assert_eq!(fsm.send(PRESS), Some(Switch::On));
        assert!(fsm.is_in(Switch::On));

        assert_eq!(fsm.send(RELEASE), Some(Switch::Off));
        assert_eq!(fsm.current_state(), Switch::Off);
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = StateMachine::<Switch>::default();

        assert_eq!(fsm.send(RELEASE), None);
        assert_eq!(fsm.current_state(), Switch::Off);
        assert_eq!(fsm.history().count(), 0);
    }

    #[test]
    fn test_terminal_state_ignores_events() {
        let mut fsm = StateMachine::new(Switch::On);
        fsm.send(DISABLE);
        assert!(fsm.is_in(Switch::Broken));
        assert!(!fsm.can_send(PRESS));
        assert!(!fsm.can_send(DISABLE));
    }

    #[test]
    fn test_history() {
        let mut fsm = StateMachine::new(Switch::Off);
        fsm.send(PRESS);
        fsm.send(RELEASE);

        let history: Vec<_> = fsm.history().copied().collect();
        assert_eq!(
            history,
            vec![(Switch::Off, PRESS, Switch::On), (Switch::On, RELEASE, Switch::Off)]
        );

        fsm.clear_history();
        assert_eq!(fsm.history().count(), 0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut fsm = StateMachine::new(Switch::Off);
        for _ in 0..HISTORY_LIMIT {
            fsm.send(PRESS);
            fsm.send(RELEASE);
        }
        assert_eq!(fsm.history().count(), HISTORY_LIMIT);
        assert_eq!(fsm.history().last(), Some(&(Switch::On, RELEASE, Switch::Off)));
    }
}

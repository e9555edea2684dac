//! State transitions
//!
//! Interaction states are plain tagged enums. Each state type maps
//! `(state, event)` pairs to its next state; pairs with no entry leave the
//! state untouched.
//!
//! ```rust
//! use dragflow_core::fsm::{EventId, StateTransitions};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
//! enum Press {
//!     #[default]
//!     Up,
//!     Down,
//! }
//!
//! const DOWN: EventId = 1;
//! const UP: EventId = 2;
//!
//! impl StateTransitions for Press {
//!     fn on_event(&self, event: EventId) -> Option<Self> {
//!         match (self, event) {
//!             (Press::Up, DOWN) => Some(Press::Down),
//!             (Press::Down, UP) => Some(Press::Up),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut state = Press::default();
//! assert!(state.send(DOWN));
//! assert_eq!(state, Press::Down);
//! assert!(!state.send(DOWN));
//! ```

use std::hash::Hash;

/// Identifier for an event type
pub type EventId = u32;

/// Trait for state types that can handle event transitions
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventId) -> Option<Self>;

    /// Check if an event can trigger a transition from the current state
    fn can_send(&self, event: EventId) -> bool {
        self.on_event(event).is_some()
    }

    /// Apply an event in place. Returns true if the state changed.
    fn send(&mut self, event: EventId) -> bool {
        match self.on_event(event) {
            Some(next) => {
                tracing::trace!("{:?} --{}--> {:?}", self, event, next);
                let changed = next != *self;
                *self = next;
                changed
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    enum Hover {
        #[default]
        Idle,
        Hovered,
        Pressed,
    }

    const POINTER_ENTER: EventId = 1;
    const POINTER_LEAVE: EventId = 2;
    const POINTER_DOWN: EventId = 3;
    const POINTER_UP: EventId = 4;

    impl StateTransitions for Hover {
        fn on_event(&self, event: EventId) -> Option<Self> {
            match (self, event) {
                (Hover::Idle, POINTER_ENTER) => Some(Hover::Hovered),
                (Hover::Hovered, POINTER_LEAVE) => Some(Hover::Idle),
                (Hover::Hovered, POINTER_DOWN) => Some(Hover::Pressed),
                (Hover::Pressed, POINTER_UP) => Some(Hover::Hovered),
                _ => None,
            }
        }
    }

    #[test]
    fn test_simple_transitions() {
        let mut state = Hover::default();

        assert!(state.send(POINTER_ENTER));
        assert_eq!(state, Hover::Hovered);

        assert!(state.send(POINTER_DOWN));
        assert_eq!(state, Hover::Pressed);

        assert!(state.send(POINTER_UP));
        assert_eq!(state, Hover::Hovered);

        assert!(state.send(POINTER_LEAVE));
        assert_eq!(state, Hover::Idle);
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut state = Hover::Idle;

        // POINTER_DOWN is not valid in Idle
        assert!(!state.send(POINTER_DOWN));
        assert_eq!(state, Hover::Idle);
    }

    #[test]
    fn test_can_send() {
        let state = Hover::Idle;
        assert!(state.can_send(POINTER_ENTER));
        assert!(!state.can_send(POINTER_UP));
    }
}

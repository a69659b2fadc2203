//! Global counter state container.
//!
//! Reducer-style state with increment and decrement actions. Nothing in the
//! form flow dispatches these actions.

use serde::{Deserialize, Serialize};

/// Action type string for [`CounterAction::Increment`].
pub const INCREMENT: &str = "INCREMENT";
/// Action type string for [`CounterAction::Decrement`].
pub const DECREMENT: &str = "DECREMENT";

/// Counter state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    /// Current count, starting at zero.
    pub count: i64,
}

/// Counter actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterAction {
    /// Add one.
    Increment,
    /// Subtract one.
    Decrement,
}

impl CounterAction {
    /// Parse an action type string; unknown types yield `None`.
    #[must_use]
    pub fn from_type(action_type: &str) -> Option<Self> {
        match action_type {
            INCREMENT => Some(Self::Increment),
            DECREMENT => Some(Self::Decrement),
            _ => None,
        }
    }

    /// Action type string.
    #[must_use]
    pub const fn action_type(self) -> &'static str {
        match self {
            Self::Increment => INCREMENT,
            Self::Decrement => DECREMENT,
        }
    }
}

/// Apply an action, returning the next state.
#[must_use]
pub const fn reduce(state: CounterState, action: CounterAction) -> CounterState {
    let count = match action {
        CounterAction::Increment => state.count.saturating_add(1),
        CounterAction::Decrement => state.count.saturating_sub(1),
    };
    CounterState { count }
}

/// Apply an action given by its type string; unknown types leave the state unchanged.
#[must_use]
pub fn reduce_type(state: CounterState, action_type: &str) -> CounterState {
    CounterAction::from_type(action_type).map_or(state, |action| reduce(state, action))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(CounterState::default().count, 0);
    }

    #[test]
    fn increments_and_decrements() {
        let state = reduce(CounterState::default(), CounterAction::Increment);
        let state = reduce(state, CounterAction::Increment);
        let state = reduce(state, CounterAction::Decrement);
        assert_eq!(state, CounterState { count: 1 });
    }

    #[test]
    fn unknown_action_types_are_ignored() {
        let state = CounterState { count: 7 };
        assert_eq!(reduce_type(state, "RESET"), state);
        assert_eq!(reduce_type(state, "increment"), state);
        assert_eq!(reduce_type(state, DECREMENT), CounterState { count: 6 });
    }

    #[test]
    fn saturates_at_bounds() {
        let state = CounterState { count: i64::MAX };
        assert_eq!(reduce(state, CounterAction::Increment), state);
        let state = CounterState { count: i64::MIN };
        assert_eq!(reduce(state, CounterAction::Decrement), state);
    }

    #[test]
    fn action_types_round_trip() {
        for action in [CounterAction::Increment, CounterAction::Decrement] {
            assert_eq!(CounterAction::from_type(action.action_type()), Some(action));
        }
    }
}

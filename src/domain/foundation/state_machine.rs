//! State machine trait for status enums.
//!
//! Account plan status, account approval and contact-message status all
//! share this interface for validating transitions.

use super::{DomainError, ErrorCode, ValidationError};

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for MessageStatus {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!(
///             (self, target),
///             (Pending, Replied) | (Pending, Resolved) | (Replied, Resolved)
///         )
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> { /* ... */ }
/// }
///
/// let next = status.transition_to(MessageStatus::Resolved)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Same as [`StateMachine::transition_to`] but reported as a domain state error.
    fn transition_or_conflict(&self, target: Self) -> Result<Self, DomainError> {
        self.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition from {:?} to {:?}", self, target),
            )
        })
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TicketStatus {
        Open,
        Answered,
        Closed,
    }

    impl StateMachine for TicketStatus {
        fn can_transition_to(&self, target: &Self) -> bool {
            use TicketStatus::*;
            matches!((self, target), (Open, Answered) | (Open, Closed) | (Answered, Closed))
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use TicketStatus::*;
            match self {
                Open => vec![Answered, Closed],
                Answered => vec![Closed],
                Closed => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(
            TicketStatus::Open.transition_to(TicketStatus::Answered),
            Ok(TicketStatus::Answered)
        );
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        assert!(TicketStatus::Closed.transition_to(TicketStatus::Open).is_err());
    }

    #[test]
    fn transition_or_conflict_uses_state_error_code() {
        let err = TicketStatus::Closed
            .transition_or_conflict(TicketStatus::Answered)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn is_terminal_only_for_closed() {
        assert!(TicketStatus::Closed.is_terminal());
        assert!(!TicketStatus::Open.is_terminal());
        assert!(!TicketStatus::Answered.is_terminal());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for status in [TicketStatus::Open, TicketStatus::Answered, TicketStatus::Closed] {
            for target in status.valid_transitions() {
                assert!(status.can_transition_to(&target), "{:?} -> {:?}", status, target);
            }
        }
    }
}

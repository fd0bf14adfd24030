//! Checkout flow state machine.

use crate::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// States of a page session with respect to checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutState {
    /// Shopping; the cart may change freely.
    #[default]
    Browsing,
    /// Checkout initiated; navigating to the checkout destination.
    CheckingOut,
    /// Purchase completed and the cart cleared.
    Completed,
}

impl CheckoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Browsing => "browsing",
            CheckoutState::CheckingOut => "checking_out",
            CheckoutState::Completed => "completed",
        }
    }
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks the checkout state of one page session.
///
/// Not persisted. A new page starts in `Browsing` and the cart comes back
/// from storage, so completion is accepted straight from `Browsing`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutFlow {
    state: CheckoutState,
}

impl CheckoutFlow {
    /// Create a new flow in `Browsing`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Check if a transition to `next` is allowed.
    pub fn can_advance_to(&self, next: CheckoutState) -> bool {
        match (self.state, next) {
            (CheckoutState::Completed, _) => false,
            (_, CheckoutState::Browsing) => false,
            (CheckoutState::Browsing | CheckoutState::CheckingOut, _) => true,
        }
    }

    /// Enter `CheckingOut`.
    pub fn initiate(&mut self) -> Result<CheckoutState, CommerceError> {
        self.advance_to(CheckoutState::CheckingOut)
    }

    /// Enter `Completed`.
    pub fn complete(&mut self) -> Result<CheckoutState, CommerceError> {
        self.advance_to(CheckoutState::Completed)
    }

    /// Check if the purchase has completed.
    pub fn is_complete(&self) -> bool {
        self.state == CheckoutState::Completed
    }

    fn advance_to(&mut self, next: CheckoutState) -> Result<CheckoutState, CommerceError> {
        if !self.can_advance_to(next) {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_creation() {
        let flow = CheckoutFlow::new();
        assert_eq!(flow.state(), CheckoutState::Browsing);
        assert!(!flow.is_complete());
    }

    #[test]
    fn test_full_sequence() {
        let mut flow = CheckoutFlow::new();
        assert_eq!(flow.initiate().unwrap(), CheckoutState::CheckingOut);
        assert_eq!(flow.complete().unwrap(), CheckoutState::Completed);
        assert!(flow.is_complete());
    }

    #[test]
    fn test_initiate_twice_is_allowed() {
        let mut flow = CheckoutFlow::new();
        flow.initiate().unwrap();
        assert!(flow.initiate().is_ok());
    }

    #[test]
    fn test_complete_from_browsing() {
        let mut flow = CheckoutFlow::new();
        assert!(flow.complete().is_ok());
    }

    #[test]
    fn test_completed_is_terminal() {
        let mut flow = CheckoutFlow::new();
        flow.complete().unwrap();

        assert_eq!(
            flow.initiate().unwrap_err(),
            CommerceError::InvalidCheckoutTransition {
                from: CheckoutState::Completed,
                to: CheckoutState::CheckingOut,
            }
        );
        assert!(flow.complete().is_err());
    }

    #[test]
    fn test_error_message() {
        let err = CommerceError::InvalidCheckoutTransition {
            from: CheckoutState::Completed,
            to: CheckoutState::CheckingOut,
        };
        assert_eq!(
            err.to_string(),
            "Invalid checkout transition from completed to checking_out"
        );
    }
}

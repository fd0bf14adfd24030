//! Checkout module.
//!
//! Contains the checkout state machine and the navigation seam used to hand
//! control to the next page.

mod flow;
mod navigate;

pub use flow::{CheckoutFlow, CheckoutState};
pub use navigate::{MemoryNavigator, Navigator};

//! Commerce error types.

use thiserror::Error;

use crate::checkout::CheckoutState;

/// Errors that can occur in cart operations.
///
/// Only input validation and checkout sequencing are reported to callers.
/// Storage, display and analytics failures degrade silently inside the
/// service and are logged instead. A corrupt persisted record surfaces as
/// [`cart_cache::CacheError::Parse`] from [`crate::CartStore::load`].
#[derive(Error, Debug, PartialEq)]
pub enum CommerceError {
    /// Price is not a storable amount.
    #[error("Invalid price for {product_id}: {price}")]
    InvalidPrice { product_id: String, price: f64 },

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition {
        from: CheckoutState,
        to: CheckoutState,
    },
}

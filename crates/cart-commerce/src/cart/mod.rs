//! Shopping cart module.
//!
//! Contains the cart mapping, its line items, and derived totals.

mod cart;
mod pricing;

pub use cart::{Cart, LineItem};
pub use pricing::{CartTotals, LineTotal};

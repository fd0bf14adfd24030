//! Cart totals.

use crate::ids::ProductId;
use crate::money::Price;
use serde::{Deserialize, Serialize};

/// Totals derived from a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of price times quantity over all lines.
    pub value: Price,
    /// Number of distinct products.
    pub num_items: usize,
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LineTotal>,
}

impl CartTotals {
    /// Total units across all lines.
    pub fn units(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

/// Pricing for a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineTotal {
    /// Product on this line.
    pub product_id: ProductId,
    /// Unit price.
    pub unit_price: Price,
    /// Quantity.
    pub quantity: u32,
    /// unit_price * quantity.
    pub total: Price,
}

//! Tabular view of the cart.

use crate::cart::Cart;
use crate::money::Currency;

/// One rendered row: name, unit price, quantity, line total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    pub name: String,
    pub unit_price: String,
    pub quantity: String,
    pub line_total: String,
}

impl CartRow {
    /// Cells in column order.
    pub fn cells(&self) -> [&str; 4] {
        [
            self.name.as_str(),
            self.unit_price.as_str(),
            self.quantity.as_str(),
            self.line_total.as_str(),
        ]
    }
}

/// The full cart table, rebuilt from scratch on every render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartTable {
    pub rows: Vec<CartRow>,
    pub total: String,
}

impl CartTable {
    /// Column headings.
    pub const HEADERS: [&'static str; 4] = ["Product", "Price", "Quantity", "Total"];

    /// Build the table from the current cart.
    pub fn from_cart(cart: &Cart, currency: Currency) -> Self {
        let rows = cart
            .iter()
            .map(|(_, item)| CartRow {
                name: item.name.clone(),
                unit_price: item.price.display(currency),
                quantity: item.quantity.to_string(),
                line_total: item.line_total().display(currency),
            })
            .collect();

        Self {
            rows,
            total: cart.totals().value.display(currency),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

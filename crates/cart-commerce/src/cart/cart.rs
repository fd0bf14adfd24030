//! Cart and line item types.

use std::collections::BTreeMap;

use crate::cart::{CartTotals, LineTotal};
use crate::ids::ProductId;
use crate::money::Price;
use serde::{Deserialize, Serialize};

/// A shopping cart: product id to line item.
///
/// Serializes as a bare JSON object keyed by product id, which is the format
/// of the persisted `"cart"` record. Every entry has `quantity >= 1`; an item
/// is removed outright rather than kept at zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct Cart {
    items: BTreeMap<ProductId, LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// An existing entry gets its quantity bumped and keeps the name and
    /// price it was first added with. Returns the resulting quantity.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        name: impl Into<String>,
        price: Price,
    ) -> u32 {
        if let Some(existing) = self.items.get_mut(&product_id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return existing.quantity;
        }

        self.items.insert(product_id, LineItem::new(name, price));
        1
    }

    /// Remove an item from the cart. Removing an absent id is a no-op.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        self.items.remove(product_id).is_some()
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of distinct products.
    ///
    /// This is what the cart badge shows; quantities are not summed.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total number of units across all line items.
    pub fn unit_count(&self) -> u64 {
        self.items.values().map(|i| u64::from(i.quantity)).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by product id.
    pub fn get(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.get(product_id)
    }

    /// Check whether a product is in the cart.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.contains_key(product_id)
    }

    /// Iterate over entries ordered by product id.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, &LineItem)> {
        self.items.iter()
    }

    /// Product ids in iteration order.
    pub fn product_ids(&self) -> impl Iterator<Item = &ProductId> {
        self.items.keys()
    }

    /// Calculate per-line and overall totals.
    pub fn totals(&self) -> CartTotals {
        let lines: Vec<LineTotal> = self
            .items
            .iter()
            .map(|(id, item)| LineTotal {
                product_id: id.clone(),
                unit_price: item.price,
                quantity: item.quantity,
                total: item.line_total(),
            })
            .collect();

        CartTotals {
            value: Price::sum(lines.iter().map(|l| l.total)),
            num_items: lines.len(),
            lines,
        }
    }

    /// Drop entries that break the quantity invariant.
    ///
    /// Only needed for carts rehydrated from storage written by something
    /// other than this crate. Returns the number of entries dropped.
    pub fn retain_valid(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|id, item| {
            let keep = item.quantity >= 1;
            if !keep {
                tracing::warn!(product_id = %id, "dropping stored line item with zero quantity");
            }
            keep
        });
        before - self.items.len()
    }
}

impl FromIterator<(ProductId, LineItem)> for Cart {
    fn from_iter<I: IntoIterator<Item = (ProductId, LineItem)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Quantity.
    pub quantity: u32,
}

impl LineItem {
    /// Create a new line item with quantity 1.
    pub fn new(name: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            price,
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

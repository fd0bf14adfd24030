//! Pixel event payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cart::Cart;
use crate::ids::ProductId;
use crate::money::{Currency, Price};

/// Content type reported for every line.
pub const CONTENT_TYPE_PRODUCT: &str = "product";

/// Commerce milestones reported to the pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventName {
    AddToCart,
    InitiateCheckout,
    Purchase,
}

impl EventName {
    /// Name as the tracker expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::AddToCart => "AddToCart",
            EventName::InitiateCheckout => "InitiateCheckout",
            EventName::Purchase => "Purchase",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `{id, quantity}` entry of a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub id: ProductId,
    pub quantity: u32,
}

/// Event parameters in the tracker's standard commerce shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelPayload {
    pub content_ids: Vec<ProductId>,
    pub content_type: String,
    pub contents: Vec<Content>,
    pub value: f64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_items: Option<usize>,
}

/// A named event with its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelEvent {
    pub name: EventName,
    pub payload: PixelPayload,
}

impl PixelEvent {
    /// A single unit was added.
    ///
    /// Always reports quantity 1 and the unit price, regardless of how many
    /// units of the product the cart now holds.
    pub fn item_added(product_id: &ProductId, price: Price, currency: Currency) -> Self {
        Self {
            name: EventName::AddToCart,
            payload: PixelPayload {
                content_ids: vec![product_id.clone()],
                content_type: CONTENT_TYPE_PRODUCT.to_string(),
                contents: vec![Content {
                    id: product_id.clone(),
                    quantity: 1,
                }],
                value: price.amount(),
                currency: currency.code().to_string(),
                num_items: None,
            },
        }
    }

    /// Checkout was initiated on `cart`.
    pub fn checkout_started(cart: &Cart, currency: Currency) -> Self {
        Self {
            name: EventName::InitiateCheckout,
            payload: aggregate(cart, currency),
        }
    }

    /// A purchase of `cart` completed. Must be built before the cart is cleared.
    pub fn purchase_completed(cart: &Cart, currency: Currency) -> Self {
        Self {
            name: EventName::Purchase,
            payload: aggregate(cart, currency),
        }
    }
}

fn aggregate(cart: &Cart, currency: Currency) -> PixelPayload {
    let totals = cart.totals();
    let contents: Vec<Content> = totals
        .lines
        .iter()
        .map(|line| Content {
            id: line.product_id.clone(),
            quantity: line.quantity,
        })
        .collect();

    PixelPayload {
        content_ids: contents.iter().map(|c| c.id.clone()).collect(),
        content_type: CONTENT_TYPE_PRODUCT.to_string(),
        num_items: Some(contents.len()),
        contents,
        value: totals.value.amount(),
        currency: currency.code().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_line_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(ProductId::new("P1"), "Widget", Price::new(10.0));
        cart.add_item(ProductId::new("P2"), "Gadget", Price::new(20.0));
        cart
    }

    #[test]
    fn test_item_added_payload() {
        let event = PixelEvent::item_added(&ProductId::new("P1"), Price::new(9.99), Currency::USD);

        assert_eq!(event.name.as_str(), "AddToCart");
        assert_eq!(
            serde_json::to_value(&event.payload).unwrap(),
            json!({
                "content_ids": ["P1"],
                "content_type": "product",
                "contents": [{"id": "P1", "quantity": 1}],
                "value": 9.99,
                "currency": "USD"
            })
        );
    }

    #[test]
    fn test_checkout_started_aggregates_cart() {
        let mut cart = two_line_cart();
        cart.add_item(ProductId::new("P1"), "Widget", Price::new(10.0));

        let event = PixelEvent::checkout_started(&cart, Currency::USD);
        assert_eq!(event.name, EventName::InitiateCheckout);
        assert_eq!(
            serde_json::to_value(&event.payload).unwrap(),
            json!({
                "content_ids": ["P1", "P2"],
                "content_type": "product",
                "contents": [{"id": "P1", "quantity": 2}, {"id": "P2", "quantity": 1}],
                "value": 40.0,
                "currency": "USD",
                "num_items": 2
            })
        );
    }

    #[test]
    fn test_checkout_and_purchase_agree() {
        let cart = two_line_cart();
        let checkout = PixelEvent::checkout_started(&cart, Currency::USD);
        let purchase = PixelEvent::purchase_completed(&cart, Currency::USD);

        assert_eq!(checkout.payload, purchase.payload);
        assert_eq!(purchase.name, EventName::Purchase);
    }

    #[test]
    fn test_empty_cart_aggregate() {
        let event = PixelEvent::checkout_started(&Cart::new(), Currency::USD);
        assert_eq!(event.payload.value, 0.0);
        assert_eq!(event.payload.num_items, Some(0));
        assert!(event.payload.content_ids.is_empty());
    }
}

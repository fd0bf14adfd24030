//! Cart state, persistence, pixel analytics and checkout for the pixel cart
//! widget.
//!
//! - **Cart**: product id to line item, distinct-product count, totals
//! - **Persistence**: the whole cart as one JSON record in a key-value store
//! - **Analytics**: `AddToCart`, `InitiateCheckout` and `Purchase` pixel events
//! - **Display**: badge count, cart table, self-dismissing notifications
//! - **Checkout**: `Browsing -> CheckingOut -> Completed` with navigation
//!
//! [`CartService`] ties these together behind the [`Renderer`],
//! [`Navigator`] and [`AnalyticsSink`] seams so the whole flow runs
//! headlessly.
//!
//! # Example
//!
//! ```rust
//! use cart_cache::MemoryStore;
//! use cart_commerce::prelude::*;
//!
//! let sink = MemorySink::new();
//! let mut service = CartService::open(
//!     MemoryStore::new(),
//!     CartConfig::default(),
//!     Capabilities {
//!         sink: Box::new(sink.clone()),
//!         renderer: Box::new(MemoryRenderer::new()),
//!         navigator: Box::new(MemoryNavigator::new()),
//!     },
//! );
//!
//! service.add_item("P1", "Widget", 9.99).unwrap();
//! service.add_item("P1", "Widget", 9.99).unwrap();
//! assert_eq!(service.item_count(), 1);
//!
//! service.initiate_checkout().unwrap();
//! assert_eq!(sink.names().last(), Some(&EventName::InitiateCheckout));
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod money;
pub mod persist;
pub mod service;

pub mod analytics;
pub mod cart;
pub mod checkout;
pub mod display;

pub use analytics::AnalyticsSink;
pub use checkout::Navigator;
pub use config::CartConfig;
pub use display::Renderer;
pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Price};
pub use persist::CartStore;
pub use service::{Capabilities, CartService};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::CartConfig;
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Price};
    pub use crate::persist::CartStore;
    pub use crate::service::{Capabilities, CartService};

    // Cart
    pub use crate::cart::{Cart, CartTotals, LineItem, LineTotal};

    // Analytics
    pub use crate::analytics::{
        AnalyticsSink, Content, EventName, JsonLinesSink, MemorySink, NoopSink, PixelEvent,
        PixelPayload,
    };

    // Checkout
    pub use crate::checkout::{CheckoutFlow, CheckoutState, MemoryNavigator, Navigator};

    // Display
    pub use crate::display::{CartRow, CartTable, Notification, NotificationTray, Renderer};
    #[cfg(not(target_arch = "wasm32"))]
    pub use crate::display::MemoryRenderer;
}

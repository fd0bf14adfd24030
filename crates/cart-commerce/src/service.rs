//! The cart service: one owner for cart state and its side effects.
//!
//! Every user action maps to one method here. Mutations go through a single
//! path that persists the cart and refreshes the badge, so storage and
//! display never drift from the in-memory state.

use cart_cache::Store;

use crate::analytics::{Analytics, AnalyticsSink};
use crate::cart::Cart;
use crate::checkout::{CheckoutFlow, CheckoutState, Navigator};
use crate::config::CartConfig;
use crate::display::{CartTable, Notification, Renderer};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Price;
use crate::persist::CartStore;

/// External capabilities the service drives.
pub struct Capabilities {
    /// Where pixel events go. Use [`crate::analytics::NoopSink`] when no
    /// tracker is loaded.
    pub sink: Box<dyn AnalyticsSink>,
    /// Page rendering.
    pub renderer: Box<dyn Renderer>,
    /// Page navigation.
    pub navigator: Box<dyn Navigator>,
}

/// Owns the cart for one page session.
pub struct CartService<S> {
    cart: Cart,
    store: CartStore<S>,
    analytics: Analytics,
    renderer: Box<dyn Renderer>,
    navigator: Box<dyn Navigator>,
    flow: CheckoutFlow,
    config: CartConfig,
}

impl<S: Store> CartService<S> {
    /// Start a session: rehydrate the cart from `store` and show its count.
    ///
    /// An unreadable stored cart is replaced by an empty one.
    pub fn open(store: S, config: CartConfig, capabilities: Capabilities) -> Self {
        let store = CartStore::new(store, config.storage_key.clone());
        let cart = store.load_or_empty();
        tracing::debug!(items = cart.item_count(), key = %store.key(), "cart rehydrated");

        let service = Self {
            cart,
            store,
            analytics: Analytics::new(capabilities.sink, config.currency),
            renderer: capabilities.renderer,
            navigator: capabilities.navigator,
            flow: CheckoutFlow::new(),
            config,
        };
        service.refresh_count();
        service
    }

    /// Read access to the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Number of distinct products in the cart.
    pub fn item_count(&self) -> usize {
        self.cart.item_count()
    }

    /// Current checkout state of this session.
    pub fn checkout_state(&self) -> CheckoutState {
        self.flow.state()
    }

    /// Active configuration.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// The persistence adapter.
    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// Add one unit of a product.
    ///
    /// Persists, refreshes the badge, shows a notification and reports an
    /// `AddToCart` event. A rejected price leaves everything untouched.
    /// Returns the product's resulting quantity.
    pub fn add_item(
        &mut self,
        product_id: impl Into<ProductId>,
        name: &str,
        price: impl Into<Price>,
    ) -> Result<u32, CommerceError> {
        let product_id = product_id.into();
        let price = price.into();
        self.check_price(&product_id, price)?;

        let quantity = self.mutate(|cart| cart.add_item(product_id.clone(), name, price));
        tracing::debug!(product_id = %product_id, quantity, "item added");

        self.renderer
            .show_notification(&Notification::item_added(name, self.config.notification_ttl()));
        self.analytics.item_added(&product_id, price);
        Ok(quantity)
    }

    /// Remove a product entirely. Removing an absent product is a no-op
    /// that still rewrites storage and the badge.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let removed = self.mutate(|cart| cart.remove_item(product_id));
        tracing::debug!(product_id = %product_id, removed, "item removed");
        removed
    }

    /// Rebuild the cart table from the current cart.
    pub fn render_cart_table(&self) {
        let table = CartTable::from_cart(&self.cart, self.config.currency);
        self.renderer.render_cart_table(&table);
    }

    /// Report `InitiateCheckout` and navigate to the checkout page.
    ///
    /// The cart is left intact so it is still there if the shopper returns.
    pub fn initiate_checkout(&mut self) -> Result<(), CommerceError> {
        self.flow.initiate()?;
        self.analytics.checkout_started(&self.cart);
        tracing::info!(
            items = self.cart.item_count(),
            destination = %self.config.checkout_url,
            "checkout initiated"
        );
        self.navigator.navigate(&self.config.checkout_url);
        Ok(())
    }

    /// Report `Purchase`, clear and persist the empty cart, then navigate
    /// to the confirmation page.
    ///
    /// The event is built from the cart before it is cleared.
    pub fn complete_purchase(&mut self) -> Result<(), CommerceError> {
        self.flow.complete()?;
        self.analytics.purchase_completed(&self.cart);
        let purchased = self.cart.item_count();
        self.mutate(Cart::clear);
        tracing::info!(
            items = purchased,
            destination = %self.config.confirmation_url,
            "purchase completed"
        );
        self.navigator.navigate(&self.config.confirmation_url);
        Ok(())
    }

    fn check_price(&self, product_id: &ProductId, price: Price) -> Result<(), CommerceError> {
        let invalid = !price.is_finite() || (self.config.validate_prices && price.is_negative());
        if invalid {
            tracing::warn!(product_id = %product_id, price = price.amount(), "rejecting price");
            return Err(CommerceError::InvalidPrice {
                product_id: product_id.to_string(),
                price: price.amount(),
            });
        }
        Ok(())
    }

    fn mutate<R>(&mut self, f: impl FnOnce(&mut Cart) -> R) -> R {
        let result = f(&mut self.cart);
        if let Err(e) = self.store.save(&self.cart) {
            tracing::warn!(key = %self.store.key(), error = %e, "failed to persist cart");
        }
        self.refresh_count();
        result
    }

    fn refresh_count(&self) {
        self.renderer.set_item_count(self.cart.item_count());
    }
}

impl<S> std::fmt::Debug for CartService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartService")
            .field("cart", &self.cart)
            .field("state", &self.flow.state())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

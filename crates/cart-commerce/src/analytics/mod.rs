//! Commerce analytics.
//!
//! Builds pixel events at the add, checkout and purchase milestones and
//! hands them to whichever [`AnalyticsSink`] is installed.

mod event;
mod sink;

pub use event::{Content, EventName, PixelEvent, PixelPayload, CONTENT_TYPE_PRODUCT};
pub use sink::{AnalyticsSink, JsonLinesSink, MemorySink, NoopSink};

use crate::cart::Cart;
use crate::ids::ProductId;
use crate::money::{Currency, Price};

/// Emits milestone events to a sink in a fixed currency.
pub struct Analytics {
    sink: Box<dyn AnalyticsSink>,
    currency: Currency,
}

impl Analytics {
    /// Emit to `sink`, reporting values in `currency`.
    pub fn new(sink: Box<dyn AnalyticsSink>, currency: Currency) -> Self {
        Self { sink, currency }
    }

    /// Report that one unit of a product was added.
    pub fn item_added(&self, product_id: &ProductId, price: Price) {
        self.emit(PixelEvent::item_added(product_id, price, self.currency));
    }

    /// Report that checkout started on `cart`.
    pub fn checkout_started(&self, cart: &Cart) {
        self.emit(PixelEvent::checkout_started(cart, self.currency));
    }

    /// Report that `cart` was purchased.
    pub fn purchase_completed(&self, cart: &Cart) {
        self.emit(PixelEvent::purchase_completed(cart, self.currency));
    }

    fn emit(&self, event: PixelEvent) {
        tracing::debug!(
            event = %event.name,
            value = event.payload.value,
            lines = event.payload.contents.len(),
            "tracking pixel event"
        );
        self.sink.track(&event);
    }
}

impl std::fmt::Debug for Analytics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analytics")
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}

//! The page's `fbq` tracker as an analytics sink.

use cart_commerce::analytics::{AnalyticsSink, NoopSink, PixelEvent};
use wasm_bindgen::{JsCast, JsValue};

use crate::storage::describe;

/// Calls `fbq('track', name, payload)`.
pub struct FbqSink {
    fbq: js_sys::Function,
}

impl FbqSink {
    /// Find `fbq` on the window, if the pixel script defined it.
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let fbq = js_sys::Reflect::get(&window, &JsValue::from_str("fbq")).ok()?;
        fbq.dyn_into::<js_sys::Function>()
            .ok()
            .map(|fbq| Self { fbq })
    }
}

impl AnalyticsSink for FbqSink {
    fn track(&self, event: &PixelEvent) {
        let payload = match serde_json::to_string(&event.payload)
            .map_err(|e| JsValue::from_str(&e.to_string()))
            .and_then(|json| js_sys::JSON::parse(&json))
        {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(event = %event.name, error = %describe(&e), "could not build pixel payload");
                return;
            }
        };

        if let Err(e) = self.fbq.call3(
            &JsValue::NULL,
            &JsValue::from_str("track"),
            &JsValue::from_str(event.name.as_str()),
            &payload,
        ) {
            web_sys::console::warn_1(&format!("fbq track failed: {}", describe(&e)).into());
        }
    }
}

/// The tracker if one is loaded, otherwise a sink that drops events.
pub fn page_sink() -> Box<dyn AnalyticsSink> {
    match FbqSink::detect() {
        Some(sink) => Box::new(sink),
        None => Box::new(NoopSink),
    }
}

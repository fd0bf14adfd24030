//! Browser binding for the pixel cart.
//!
//! Wires [`CartService`] to the page: `localStorage` for persistence (memory
//! when the browser blocks it), the storefront's element ids for rendering,
//! `fbq` for pixel events and `window.location` for navigation.
//!
//! ## Usage from JavaScript
//! ```js
//! import init, { addToCart, initiateCheckout } from './pkg/cart_web.js';
//!
//! await init();                      // rehydrates the cart, renders the badge
//! addToCart("P1", "Widget", 9.99);   // from a product button
//! initiateCheckout();                // from the cart page
//! ```
//!
//! On load the cart table is rendered when `#cart-table` exists and
//! `#purchase-btn`, when present, is bound to purchase completion.

mod dom;
mod pixel;
mod storage;

use std::cell::RefCell;

use cart_commerce::{Capabilities, CartConfig, CartService, ProductId};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub use dom::{
    DomRenderer, LocationNavigator, CART_BODY_ID, CART_COUNT_ID, CART_TABLE_ID, PURCHASE_BUTTON_ID,
};
pub use pixel::{page_sink, FbqSink};
pub use storage::{LocalStorage, PageStore};

thread_local! {
    static SESSION: RefCell<Option<CartService<PageStore>>> = const { RefCell::new(None) };
}

fn log_error(msg: &str) {
    web_sys::console::error_1(&msg.into());
}

/// Open a session for the current page, replacing any previous one.
fn open_session(config: CartConfig) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let store = PageStore::open();
    if !store.is_persistent() {
        web_sys::console::warn_1(&"cart storage unavailable, cart will not persist".into());
    }

    let service = CartService::open(
        store,
        config,
        Capabilities {
            sink: page_sink(),
            renderer: Box::new(DomRenderer::new(window.clone(), document.clone())),
            navigator: Box::new(LocationNavigator::new(window)),
        },
    );

    if document.get_element_by_id(dom::CART_TABLE_ID).is_some() {
        service.render_cart_table();
    }

    SESSION.with(|session| *session.borrow_mut() = Some(service));
    Ok(())
}

fn bind_purchase_button(document: &web_sys::Document) {
    let Some(button) = document.get_element_by_id(dom::PURCHASE_BUTTON_ID) else {
        return;
    };
    let on_click = Closure::<dyn FnMut()>::new(complete_purchase);
    if let Err(e) =
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
    {
        log_error(&format!("could not bind purchase button: {:?}", e));
        return;
    }
    // The listener lives as long as the page.
    on_click.forget();
}

fn with_session<R>(f: impl FnOnce(&mut CartService<PageStore>) -> R) -> Option<R> {
    SESSION.with(|session| match session.borrow_mut().as_mut() {
        Some(service) => Some(f(service)),
        None => {
            log_error("cart session not started");
            None
        }
    })
}

/// Page-load entry point.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = open_session(CartConfig::default()) {
        log_error(&format!("cart start failed: {}", e));
        return;
    }
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        bind_purchase_button(&document);
    }
}

/// Restart the session with a JSON configuration (any subset of
/// `CartConfig` fields).
#[wasm_bindgen]
pub fn configure(config_json: &str) -> Result<(), JsError> {
    let config: CartConfig = serde_json::from_str(config_json)?;
    open_session(config).map_err(|e| JsError::new(&e))
}

/// Add one unit of a product. `product_id` must match the catalog feed id.
#[wasm_bindgen(js_name = addToCart)]
pub fn add_to_cart(product_id: &str, name: &str, price: f64) {
    let result = with_session(|service| service.add_item(ProductId::new(product_id), name, price));
    if let Some(Err(e)) = result {
        log_error(&e.to_string());
    }
}

/// Remove a product from the cart entirely.
#[wasm_bindgen(js_name = removeFromCart)]
pub fn remove_from_cart(product_id: &str) {
    with_session(|service| service.remove_item(&ProductId::new(product_id)));
}

/// Number of distinct products in the cart.
#[wasm_bindgen(js_name = cartCount)]
pub fn cart_count() -> usize {
    with_session(|service| service.item_count()).unwrap_or(0)
}

/// Re-render the cart table.
#[wasm_bindgen(js_name = displayCartTable)]
pub fn display_cart_table() {
    with_session(|service| service.render_cart_table());
}

/// Report `InitiateCheckout` and go to the checkout page.
#[wasm_bindgen(js_name = initiateCheckout)]
pub fn initiate_checkout() {
    if let Some(Err(e)) = with_session(|service| service.initiate_checkout()) {
        log_error(&e.to_string());
    }
}

/// Report `Purchase`, empty the cart and go to the confirmation page.
#[wasm_bindgen(js_name = completePurchase)]
pub fn complete_purchase() {
    if let Some(Err(e)) = with_session(|service| service.complete_purchase()) {
        log_error(&e.to_string());
    }
}

#![cfg(target_arch = "wasm32")]

use cart_cache::{CacheError, Store};
use cart_commerce::prelude::*;
use cart_web::{
    page_sink, DomRenderer, FbqSink, LocalStorage, PageStore, CART_BODY_ID, CART_COUNT_ID,
};
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Document, Window};

wasm_bindgen_test_configure!(run_in_browser);

const CART_PAGE: &str = r#"
    <span id="cart-count">0</span>
    <table id="cart-table"><tbody id="cart-body"></tbody></table>
"#;

fn page(markup: &str) -> (Window, Document) {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    document.body().unwrap().set_inner_html(markup);
    (window, document)
}

fn renderer(markup: &str) -> (DomRenderer, Document) {
    let (window, document) = page(markup);
    (DomRenderer::new(window, document.clone()), document)
}

fn cart(lines: &[(&str, &str, f64, u32)]) -> Cart {
    let mut cart = Cart::new();
    for &(id, name, price, quantity) in lines {
        for _ in 0..quantity {
            cart.add_item(ProductId::new(id), name, Price::new(price));
        }
    }
    cart
}

fn text_of(document: &Document, id: &str) -> Option<String> {
    document.get_element_by_id(id).and_then(|e| e.text_content())
}

#[wasm_bindgen_test]
fn test_badge_shows_item_count() {
    let (renderer, document) = renderer(CART_PAGE);

    renderer.set_item_count(3);

    assert_eq!(text_of(&document, CART_COUNT_ID).as_deref(), Some("3"));
}

#[wasm_bindgen_test]
fn test_cart_table_is_rebuilt_not_appended() {
    let (renderer, document) = renderer(CART_PAGE);
    let two_lines = cart(&[("P1", "Widget", 9.99, 2), ("P2", "Gadget", 20.0, 1)]);
    let one_line = cart(&[("P2", "Gadget", 20.0, 1)]);

    renderer.render_cart_table(&CartTable::from_cart(&two_lines, Currency::USD));
    renderer.render_cart_table(&CartTable::from_cart(&one_line, Currency::USD));

    let body = document.get_element_by_id(CART_BODY_ID).unwrap();
    assert_eq!(body.child_element_count(), 1);
    let row = body.first_element_child().unwrap();
    assert_eq!(row.child_element_count(), 4);
    assert_eq!(row.text_content().as_deref(), Some("Gadget$20.001$20.00"));
}

#[wasm_bindgen_test]
fn test_missing_elements_are_skipped() {
    let (renderer, document) = renderer("<p>no cart here</p>");
    let table = CartTable::from_cart(&cart(&[("P1", "Widget", 1.0, 1)]), Currency::USD);

    renderer.set_item_count(1);
    renderer.render_cart_table(&table);

    let body = document.body().unwrap();
    assert_eq!(body.child_element_count(), 1);
    assert_eq!(body.text_content().as_deref(), Some("no cart here"));
}

#[wasm_bindgen_test]
fn test_notification_text_is_not_markup() {
    let (renderer, document) = renderer(CART_PAGE);

    renderer.show_notification(&Notification::new("Added <b>Mug</b> to cart!"));

    let toast = document.query_selector(".notification").unwrap().unwrap();
    assert_eq!(toast.text_content().as_deref(), Some("Added <b>Mug</b> to cart!"));
    assert!(toast.query_selector("b").unwrap().is_none());
    assert!(toast.query_selector("svg").unwrap().is_some());
}

#[wasm_bindgen_test]
fn test_missing_fbq_falls_back_to_noop() {
    let window = web_sys::window().unwrap();
    Reflect::delete_property(&window, &JsValue::from_str("fbq")).unwrap();

    assert!(FbqSink::detect().is_none());

    let event = PixelEvent::item_added(&ProductId::new("P1"), Price::new(1.0), Currency::USD);
    page_sink().track(&event);
}

#[wasm_bindgen_test]
fn test_fbq_receives_track_call() {
    let window = web_sys::window().unwrap();
    let fbq = Function::new_with_args(
        "action, name, payload",
        "window.pixelCalls = (window.pixelCalls || []).concat([[action, name, payload]]);",
    );
    Reflect::set(&window, &JsValue::from_str("pixelCalls"), &Array::new()).unwrap();
    Reflect::set(&window, &JsValue::from_str("fbq"), &fbq).unwrap();

    let sink = FbqSink::detect().unwrap();
    sink.track(&PixelEvent::item_added(
        &ProductId::new("P1"),
        Price::new(9.99),
        Currency::USD,
    ));

    let calls: Array = Reflect::get(&window, &JsValue::from_str("pixelCalls"))
        .unwrap()
        .dyn_into()
        .unwrap();
    assert_eq!(calls.length(), 1);
    let call: Array = calls.get(0).dyn_into().unwrap();
    assert_eq!(call.get(0).as_string().as_deref(), Some("track"));
    assert_eq!(call.get(1).as_string().as_deref(), Some("AddToCart"));

    let payload = call.get(2);
    let value = Reflect::get(&payload, &JsValue::from_str("value")).unwrap();
    assert_eq!(value.as_f64(), Some(9.99));
    let currency = Reflect::get(&payload, &JsValue::from_str("currency")).unwrap();
    assert_eq!(currency.as_string().as_deref(), Some("USD"));

    Reflect::delete_property(&window, &JsValue::from_str("fbq")).unwrap();
}

#[wasm_bindgen_test]
fn test_local_storage_record_format() {
    let key = "cart-web-test-record";
    let store = CartStore::new(LocalStorage::open().unwrap(), key);

    store.save(&cart(&[("P1", "Widget", 9.99, 2)])).unwrap();

    let raw = web_sys::window()
        .unwrap()
        .local_storage()
        .unwrap()
        .unwrap()
        .get_item(key)
        .unwrap()
        .unwrap();
    let record: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        record,
        serde_json::json!({"P1": {"name": "Widget", "price": 9.99, "quantity": 2}})
    );
    assert_eq!(store.load().unwrap().item_count(), 1);

    store.store().delete(key).unwrap();
}

#[wasm_bindgen_test]
fn test_page_store_uses_local_storage() {
    assert!(PageStore::open().is_persistent());
}

#[wasm_bindgen_test]
fn test_blocked_storage_keeps_cart_working() {
    let (window, document) = page(CART_PAGE);
    let store = PageStore::or_memory(Err(CacheError::OpenError("SecurityError".to_string())));
    assert!(!store.is_persistent());

    let sink = MemorySink::new();
    let mut service = CartService::open(
        store,
        CartConfig::default(),
        Capabilities {
            sink: Box::new(sink.clone()),
            renderer: Box::new(DomRenderer::new(window, document.clone())),
            navigator: Box::new(MemoryNavigator::new()),
        },
    );

    service.add_item("P1", "Widget", 9.99).unwrap();
    service.add_item("P2", "Gadget", 5.0).unwrap();

    assert_eq!(text_of(&document, CART_COUNT_ID).as_deref(), Some("2"));
    assert_eq!(sink.names(), vec![EventName::AddToCart, EventName::AddToCart]);
}

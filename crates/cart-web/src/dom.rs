//! DOM rendering and page navigation.

use cart_commerce::checkout::Navigator;
use cart_commerce::display::{CartTable, Notification, Renderer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use crate::storage::describe;

/// Badge element showing the distinct-product count.
pub const CART_COUNT_ID: &str = "cart-count";
/// Table shown on the cart page.
pub const CART_TABLE_ID: &str = "cart-table";
/// Body of the cart table that rows are rendered into.
pub const CART_BODY_ID: &str = "cart-body";
/// Purchase confirmation button.
pub const PURCHASE_BUTTON_ID: &str = "purchase-btn";

const NOTIFICATION_ICON: &str = r##"<svg width="20" height="20" viewBox="0 0 20 20"><path d="M10 2C5.14 2 1 5.14 1 10s4.14 8 9 8 9-4.14 9-8S14.86 2 10 2z" fill="#fff" /></svg>"##;

/// Renders into the well-known element ids of the storefront pages.
pub struct DomRenderer {
    window: Window,
    document: Document,
}

impl DomRenderer {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn cell(&self, text: &str) -> Option<Element> {
        let td = self.document.create_element("td").ok()?;
        td.set_text_content(Some(text));
        Some(td)
    }

    fn row(&self, cells: [&str; 4]) -> Option<Element> {
        let tr = self.document.create_element("tr").ok()?;
        for text in cells {
            let td = self.cell(text)?;
            tr.append_child(&td).ok()?;
        }
        Some(tr)
    }
}

impl Renderer for DomRenderer {
    fn set_item_count(&self, count: usize) {
        if let Some(badge) = self.element(CART_COUNT_ID) {
            badge.set_text_content(Some(&count.to_string()));
        }
    }

    fn render_cart_table(&self, table: &CartTable) {
        let Some(body) = self.element(CART_BODY_ID) else {
            return;
        };
        body.set_inner_html("");
        for row in &table.rows {
            match self.row(row.cells()) {
                Some(tr) => {
                    if let Err(e) = body.append_child(&tr) {
                        tracing::warn!(error = %describe(&e), "failed to append cart row");
                    }
                }
                None => tracing::warn!(product = %row.name, "failed to build cart row"),
            }
        }
    }

    fn show_notification(&self, notification: &Notification) {
        let Some(body) = self.document.body() else {
            return;
        };
        let Ok(toast) = self.document.create_element("div") else {
            return;
        };
        let Ok(text) = self.document.create_element("span") else {
            return;
        };

        toast.set_class_name("notification");
        text.set_text_content(Some(&notification.message));
        if toast.append_child(&text).is_err() {
            return;
        }
        if let Err(e) = toast.insert_adjacent_html("beforeend", NOTIFICATION_ICON) {
            tracing::warn!(error = %describe(&e), "failed to add notification icon");
        }
        if body.append_child(&toast).is_err() {
            return;
        }

        // Fire-and-forget: if the page unloads first the removal never runs.
        let dismiss = Closure::once_into_js(move || toast.remove());
        let delay = i32::try_from(notification.dismiss_after.as_millis()).unwrap_or(i32::MAX);
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(dismiss.unchecked_ref(), delay)
        {
            tracing::warn!(error = %describe(&e), "failed to schedule notification removal");
        }
    }
}

/// Navigates by assigning `window.location.href`.
pub struct LocationNavigator {
    window: Window,
}

impl LocationNavigator {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Navigator for LocationNavigator {
    fn navigate(&self, destination: &str) {
        if let Err(e) = self.window.location().set_href(destination) {
            web_sys::console::warn_1(
                &format!("navigation to {} failed: {}", destination, describe(&e)).into(),
            );
        }
    }
}

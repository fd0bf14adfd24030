//! Terminal rendering and navigation.

use cart_commerce::checkout::Navigator;
use cart_commerce::display::{CartTable, Notification, Renderer};

use crate::output::Output;

/// Prints the cart badge, table and notifications.
pub struct TerminalRenderer {
    output: Output,
}

impl TerminalRenderer {
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

impl Renderer for TerminalRenderer {
    fn set_item_count(&self, count: usize) {
        self.output.debug(&format!("Cart count: {}", count));
    }

    fn render_cart_table(&self, table: &CartTable) {
        if table.is_empty() {
            self.output.info("Your cart is empty");
            return;
        }

        let rows: Vec<[&str; 4]> = table.rows.iter().map(|row| row.cells()).collect();
        self.output.table("Cart", CartTable::HEADERS, &rows);
        self.output.kv("Total", &table.total);
    }

    fn show_notification(&self, notification: &Notification) {
        self.output.success(&notification.message);
    }
}

/// Reports the page a browser would have been sent to.
pub struct TerminalNavigator {
    output: Output,
}

impl TerminalNavigator {
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, destination: &str) {
        self.output.info(&format!("Continue at {}", destination));
    }
}

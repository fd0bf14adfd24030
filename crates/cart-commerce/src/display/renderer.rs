//! Rendering seam between cart logic and the page.

#[cfg(not(target_arch = "wasm32"))]
pub use memory::MemoryRenderer;

use crate::display::{CartTable, Notification};

/// Everything the cart needs to draw.
///
/// Implementations skip silently when their target element is missing.
pub trait Renderer {
    /// Update the cart badge with the number of distinct products.
    fn set_item_count(&self, count: usize);

    /// Replace the whole cart table.
    fn render_cart_table(&self, table: &CartTable);

    /// Show a notification that dismisses itself after
    /// `notification.dismiss_after`.
    fn show_notification(&self, notification: &Notification);
}

/// Headless rendering, for native targets only: `Instant::now` is not
/// available on `wasm32-unknown-unknown`.
#[cfg(not(target_arch = "wasm32"))]
mod memory {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Instant;

    use super::Renderer;
    use crate::display::{CartTable, Notification, NotificationTray};

    #[derive(Debug, Default)]
    struct Screen {
        item_count: Option<usize>,
        table: Option<CartTable>,
        tray: NotificationTray,
        table_renders: usize,
    }

    /// Headless renderer that keeps what would be on screen.
    ///
    /// Clones share state, so one clone can go into the service while the test
    /// holds the other.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryRenderer {
        screen: Rc<RefCell<Screen>>,
    }

    impl MemoryRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        /// Current badge value, if it was ever set.
        pub fn item_count(&self) -> Option<usize> {
            self.screen.borrow().item_count
        }

        /// Last rendered table.
        pub fn table(&self) -> Option<CartTable> {
            self.screen.borrow().table.clone()
        }

        /// How many times the table was rendered.
        pub fn table_renders(&self) -> usize {
            self.screen.borrow().table_renders
        }

        /// Messages of notifications still visible at `now`.
        pub fn notifications_at(&self, now: Instant) -> Vec<String> {
            let mut screen = self.screen.borrow_mut();
            screen.tray.prune(now);
            screen.tray.active().map(|n| n.message.clone()).collect()
        }
    }

    impl Renderer for MemoryRenderer {
        fn set_item_count(&self, count: usize) {
            self.screen.borrow_mut().item_count = Some(count);
        }

        fn render_cart_table(&self, table: &CartTable) {
            let mut screen = self.screen.borrow_mut();
            screen.table = Some(table.clone());
            screen.table_renders += 1;
        }

        fn show_notification(&self, notification: &Notification) {
            self.screen
                .borrow_mut()
                .tray
                .push(notification.clone(), Instant::now());
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::display::NOTIFICATION_TTL;

        #[test]
        fn test_memory_renderer_keeps_screen() {
            let renderer = MemoryRenderer::new();
            let view = renderer.clone();

            renderer.set_item_count(3);
            renderer.render_cart_table(&CartTable::default());
            renderer.show_notification(&Notification::new("hello"));

            assert_eq!(view.item_count(), Some(3));
            assert_eq!(view.table_renders(), 1);
            assert_eq!(view.notifications_at(Instant::now()), vec!["hello".to_string()]);
            assert!(view
                .notifications_at(Instant::now() + NOTIFICATION_TTL)
                .is_empty());
        }
    }
}

//! Notifications and cart display.

mod notify;
mod renderer;
mod table;

pub use notify::{Notification, NotificationTray, NOTIFICATION_TTL};
pub use renderer::Renderer;
#[cfg(not(target_arch = "wasm32"))]
pub use renderer::MemoryRenderer;
pub use table::{CartRow, CartTable};

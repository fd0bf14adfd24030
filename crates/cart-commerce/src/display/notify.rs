//! Transient toast notifications.

use std::time::{Duration, Instant};

use crate::config::DEFAULT_NOTIFICATION_MS;

/// Default time a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(DEFAULT_NOTIFICATION_MS);

/// A message shown briefly and then dismissed on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub dismiss_after: Duration,
}

impl Notification {
    /// A notification with the default lifetime.
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_ttl(message, NOTIFICATION_TTL)
    }

    /// A notification with an explicit lifetime.
    pub fn with_ttl(message: impl Into<String>, dismiss_after: Duration) -> Self {
        Self {
            message: message.into(),
            dismiss_after,
        }
    }

    /// Message shown after an item is added.
    pub fn item_added(name: &str, dismiss_after: Duration) -> Self {
        Self::with_ttl(format!("Added {} to cart!", name), dismiss_after)
    }
}

/// Headless stand-in for the stack of visible notifications.
///
/// Notifications stack without deduplication. Dismissal is by deadline, the
/// way a fire-and-forget timer would remove them.
#[derive(Debug, Clone, Default)]
pub struct NotificationTray {
    shown: Vec<(Instant, Notification)>,
}

impl NotificationTray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a notification starting at `now`.
    pub fn push(&mut self, notification: Notification, now: Instant) {
        self.shown.push((now + notification.dismiss_after, notification));
    }

    /// Dismiss every notification whose deadline has passed.
    pub fn prune(&mut self, now: Instant) {
        self.shown.retain(|(deadline, _)| *deadline > now);
    }

    /// Currently visible notifications, oldest first.
    pub fn active(&self) -> impl Iterator<Item = &Notification> {
        self.shown.iter().map(|(_, n)| n)
    }

    pub fn len(&self) -> usize {
        self.shown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_added_message() {
        let n = Notification::item_added("Widget", NOTIFICATION_TTL);
        assert_eq!(n.message, "Added Widget to cart!");
        assert_eq!(n.dismiss_after, Duration::from_millis(3000));
    }

    #[test]
    fn test_notifications_stack() {
        let mut tray = NotificationTray::new();
        let now = Instant::now();
        tray.push(Notification::new("same"), now);
        tray.push(Notification::new("same"), now);

        assert_eq!(tray.len(), 2);
    }

    #[test]
    fn test_prune_after_deadline() {
        let mut tray = NotificationTray::new();
        let start = Instant::now();
        tray.push(Notification::new("first"), start);
        tray.push(Notification::new("second"), start + Duration::from_millis(2000));

        tray.prune(start + Duration::from_millis(2999));
        assert_eq!(tray.len(), 2);

        tray.prune(start + Duration::from_millis(3000));
        let left: Vec<&str> = tray.active().map(|n| n.message.as_str()).collect();
        assert_eq!(left, vec!["second"]);

        tray.prune(start + Duration::from_millis(5000));
        assert!(tray.is_empty());
    }
}

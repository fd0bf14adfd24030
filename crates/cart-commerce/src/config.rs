//! Widget configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::money::Currency;

/// Storage key of the persisted cart record.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// How long a notification stays on screen.
pub const DEFAULT_NOTIFICATION_MS: u64 = 3000;

/// Configuration for a cart widget instance.
///
/// Every field has a default, so an empty TOML table or JSON object is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Key the cart is persisted under.
    pub storage_key: String,
    /// Currency reported in pixel events and used for display.
    pub currency: Currency,
    /// Destination after checkout is initiated.
    pub checkout_url: String,
    /// Destination after a purchase completes.
    pub confirmation_url: String,
    /// Notification lifetime in milliseconds.
    pub notification_ms: u64,
    /// Reject negative prices in `add_item`. Non-finite prices are always
    /// rejected since they cannot be persisted.
    pub validate_prices: bool,
}

impl CartConfig {
    /// Notification lifetime as a duration.
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: Currency::USD,
            checkout_url: "checkout.html".to_string(),
            confirmation_url: "purchase-confirmation.html".to_string(),
            notification_ms: DEFAULT_NOTIFICATION_MS,
            validate_prices: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CartConfig::default();
        assert_eq!(config.storage_key, "cart");
        assert_eq!(config.currency, Currency::USD);
        assert_eq!(config.notification_ttl(), Duration::from_millis(3000));
        assert!(config.validate_prices);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: CartConfig =
            serde_json::from_str(r#"{"checkout_url": "/pay", "validate_prices": false}"#).unwrap();
        assert_eq!(config.checkout_url, "/pay");
        assert!(!config.validate_prices);
        assert_eq!(config.confirmation_url, "purchase-confirmation.html");
    }
}

//! Price and currency types.
//!
//! Prices are kept as the dollar amounts the storefront hands us and the pixel
//! expects back (`9.99`, not `999`), so the persisted record and the analytics
//! payload carry plain JSON numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::CAD => "CA$",
            Currency::AUD => "A$",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "CAD" => Some(Currency::CAD),
            "AUD" => Some(Currency::AUD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A unit or line price in major currency units.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Wrap a raw amount without checking it.
    pub fn new(amount: f64) -> Self {
        Self(amount)
    }

    /// A zero price.
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// The raw amount.
    pub fn amount(&self) -> f64 {
        self.0
    }

    /// Whether the amount can be stored and reported (not NaN or infinite).
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Whether the amount is below zero.
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Price of `quantity` units at this unit price.
    pub fn times(&self, quantity: u32) -> Price {
        Price(self.0 * f64::from(quantity))
    }

    /// Sum an iterator of prices.
    pub fn sum(iter: impl Iterator<Item = Price>) -> Price {
        iter.fold(Price::zero(), |acc, p| acc + p)
    }

    /// Format with a currency symbol and two decimals (e.g., "$49.99").
    pub fn display(&self, currency: Currency) -> String {
        format!("{}{:.2}", currency.symbol(), self.0)
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, other: Price) -> Price {
        Price(self.0 + other.0)
    }
}

impl From<f64> for Price {
    fn from(amount: f64) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display(Currency::USD))
    }
}

//! Product: an item stocked in the simulated fridge.

use serde::Serialize;

use crate::error::CatalogError;

/// A product fixture, serialised exactly as the controller reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    /// Vending product number, unique within a catalog.
    pub vpn: String,
    /// Decimal price with two fractional digits (e.g. `"1.60"`).
    pub unit_price: String,
    pub name: String,
}

impl Product {
    #[must_use]
    pub fn new(
        vpn: impl Into<String>,
        unit_price: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            vpn: vpn.into(),
            unit_price: unit_price.into(),
            name: name.into(),
        }
    }

    /// Unit price in cents.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidPrice`] when `unit_price` is not a
    /// non-negative decimal with at most two fractional digits.
    pub fn price_cents(&self) -> Result<u64, CatalogError> {
        parse_cents(&self.unit_price).ok_or_else(|| CatalogError::InvalidPrice {
            vpn: self.vpn.clone(),
            price: self.unit_price.clone(),
        })
    }
}

fn parse_cents(value: &str) -> Option<u64> {
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    if whole.is_empty() || fraction.len() > 2 {
        return None;
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let whole: u64 = whole.parse().ok()?;
    let fraction: u64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<u64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };
    whole.checked_mul(100)?.checked_add(fraction)
}

//! Cart models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product entry with quantity in the customer's pending selection.
///
/// Serialized under the `cart` storage key in the shape the original
/// client used, so an existing stored cart keeps working:
/// `{"name": ..., "price": ..., "quantity": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product key; unique within the cart.
    #[serde(rename = "name")]
    pub product_key: String,

    /// Unit price captured when the line was added.
    #[serde(rename = "price", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,

    /// Number of units; never zero in a stored cart.
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A cart line joined with live catalog data for display.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayLine {
    /// Product key of the underlying cart line.
    pub product_key: String,
    /// Unit price from the cart.
    pub unit_price: Decimal,
    /// Quantity from the cart.
    pub quantity: u32,
    /// Unit price times quantity.
    pub line_total: Decimal,
    /// Picture URLs from the catalog; empty when stale.
    pub pictures: Vec<String>,
    /// The product no longer appears in the catalog snapshot, so the line
    /// is shown from cart data alone. Display concern only — checkout
    /// re-resolves the catalog independently.
    pub stale: bool,
}

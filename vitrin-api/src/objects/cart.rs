use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::Gender;

/// One cart line as served by the cart endpoint: the product joined with the
/// quantity held for the shopper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CartItem {
    /// A line is usable only with a real product id, a positive price and at
    /// least one unit. Lines violating this are dropped from cart mirrors.
    pub fn is_valid(&self) -> bool {
        self.id > 0 && self.price > Decimal::ZERO && self.quantity >= 1
    }

    /// Line subtotal, `price × quantity`.
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

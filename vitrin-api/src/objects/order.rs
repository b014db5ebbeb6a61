use compact_str::CompactString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::CartItem;

/// Opaque server-issued order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(CompactString);

impl OrderId {
    pub fn new(id: impl Into<CompactString>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(CompactString::from(id))
    }
}

impl std::str::FromStr for OrderId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(CompactString::from(s)))
    }
}

/// Lifecycle status of an order. `Paid` and `Failed` are terminal.
///
/// Unknown status strings are a deserialization error, never a silent
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Unpaid,
    Paid,
    Failed,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Failed)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Unpaid => write!(f, "unpaid"),
            OrderStatus::Paid => write!(f, "paid"),
            OrderStatus::Failed => write!(f, "failed"),
        }
    }
}

fn default_currency() -> CompactString {
    CompactString::const_new("BTC")
}

/// Full order record, returned by order creation, order details and delivery
/// update alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub id: OrderId,
    pub user_id: i64,
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_address: Option<String>,
    #[serde(default)]
    pub payment_amount: Option<Decimal>,
    /// Defaults to BTC when the backend omits it.
    #[serde(default = "default_currency")]
    pub currency: CompactString,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub contact_handle: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// Unix timestamp of when the order was created.
    pub created_at: i64,
}

/// Body of the order creation call. Delivery fields stay null at checkout
/// time; they are collected only after payment confirms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub user_id: i64,
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub name: Option<String>,
    pub contact_handle: Option<String>,
    pub address: Option<String>,
    pub postcode: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl CreateOrderRequest {
    /// A checkout-time request: items and total only.
    pub fn checkout(user_id: i64, items: Vec<CartItem>, total: Decimal) -> Self {
        Self {
            user_id,
            items,
            total,
            name: None,
            contact_handle: None,
            address: None,
            postcode: None,
            city: None,
            country: None,
        }
    }
}

/// Body of the payment status check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatusResponse {
    pub status: OrderStatus,
    #[serde(default)]
    pub message: Option<String>,
}

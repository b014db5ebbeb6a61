//! Order initiation: cart snapshot → order with payment coordinates.

use std::sync::Arc;

use compact_str::CompactString;
use rust_decimal::Decimal;
use tracing::{info, warn};
use vitrin_api::objects::cart::CartItem;
use vitrin_api::objects::order::{CreateOrderRequest, OrderDetails, OrderId, OrderStatus};

use crate::backend::StorefrontBackend;
use crate::cart::CartStore;
use crate::errors::FlowError;

/// Everything the payment stage needs from an order record.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentSession {
    pub order_id: OrderId,
    pub payment_address: String,
    pub payment_amount: Decimal,
    pub currency: CompactString,
    pub status: OrderStatus,
}

impl PaymentSession {
    /// Extract a session from an order record. An order without payment
    /// coordinates is not in a payable state.
    pub fn from_order(order: &OrderDetails) -> Result<Self, FlowError> {
        let (Some(address), Some(amount)) = (&order.payment_address, order.payment_amount) else {
            return Err(FlowError::StateConflict {
                order_id: order.id.clone(),
                reason: "payment coordinates are missing".to_owned(),
            });
        };
        Ok(Self {
            order_id: order.id.clone(),
            payment_address: address.clone(),
            payment_amount: amount,
            currency: order.currency.clone(),
            status: order.status,
        })
    }

    /// Rebuild a session for an existing order, the reload path.
    pub async fn resume(
        backend: &dyn StorefrontBackend,
        order_id: &OrderId,
    ) -> Result<Self, FlowError> {
        let order = backend.order_details(order_id).await?;
        Self::from_order(&order)
    }
}

/// Converts the live cart into an order and hands off to payment.
pub struct Checkout {
    backend: Arc<dyn StorefrontBackend>,
    cart: Arc<CartStore>,
}

impl Checkout {
    pub fn new(backend: Arc<dyn StorefrontBackend>, cart: Arc<CartStore>) -> Self {
        Self { backend, cart }
    }

    /// Create an order from the current cart.
    ///
    /// The mirror is refreshed first; an empty cart, or one with no valid
    /// lines, fails validation before any mutation is sent. The cart is
    /// cleared only after the order exists, and a clear failure is logged
    /// and swallowed since the order is already durable.
    pub async fn initiate_payment(&self) -> Result<PaymentSession, FlowError> {
        let items = self.cart.refresh().await;
        let valid: Vec<CartItem> = items.into_iter().filter(CartItem::is_valid).collect();
        if valid.is_empty() {
            return Err(FlowError::Validation("cart is empty".to_owned()));
        }
        let total: Decimal = valid.iter().map(CartItem::subtotal).sum();

        let request = CreateOrderRequest::checkout(self.cart.user_id(), valid, total);
        let order = self.backend.create_order(&request).await?;
        info!(order_id = %order.id, total = %order.total, "order created");

        if let Err(e) = self.cart.clear().await {
            warn!(order_id = %order.id, error = %e, "cart clear after checkout failed");
        }

        PaymentSession::from_order(&order)
    }
}

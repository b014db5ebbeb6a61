//! Delivery gate: the only door to delivery submission.
//!
//! The gate never trusts what the caller believes about an order; it
//! re-fetches the record and lets only server-confirmed `paid` orders
//! through. Submission validates locally, allows one attempt in flight, and
//! surfaces server field errors verbatim.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use vitrin_api::objects::delivery::{DeliveryDetails, DeliveryUpdateRequest};
use vitrin_api::objects::order::{OrderDetails, OrderId, OrderStatus};

use crate::backend::StorefrontBackend;
use crate::errors::FlowError;

/// A paid order the gate has verified, plus a draft prefilled from whatever
/// delivery data the server already holds. Only the gate constructs these.
#[derive(Debug, Clone)]
pub struct VerifiedOrder {
    order: OrderDetails,
    pub draft: DeliveryDetails,
}

impl VerifiedOrder {
    pub fn order(&self) -> &OrderDetails {
        &self.order
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order.id
    }
}

pub struct DeliveryGate {
    backend: Arc<dyn StorefrontBackend>,
    submit_lock: Mutex<()>,
}

impl DeliveryGate {
    pub fn new(backend: Arc<dyn StorefrontBackend>) -> Self {
        Self {
            backend,
            submit_lock: Mutex::new(()),
        }
    }

    /// Re-fetch the order and let it through only when the server itself
    /// reports `paid`. Anything else is a state conflict, the caller should
    /// send the shopper back to payment.
    pub async fn verify_and_load(&self, order_id: &OrderId) -> Result<VerifiedOrder, FlowError> {
        let order = self.backend.order_details(order_id).await?;
        if order.status != OrderStatus::Paid {
            warn!(order_id = %order_id, status = %order.status, "delivery blocked, order not paid");
            return Err(FlowError::StateConflict {
                order_id: order_id.clone(),
                reason: format!("status is {}, payment must be confirmed first", order.status),
            });
        }
        debug!(order_id = %order_id, "order verified as paid");
        let draft = DeliveryDetails::from_order(&order);
        Ok(VerifiedOrder { order, draft })
    }

    /// Submit delivery details for a verified order.
    ///
    /// Fields are trimmed first; any blank field fails validation with no
    /// network call. At most one submission is in flight at a time, a
    /// concurrent attempt is rejected client-side.
    pub async fn submit(
        &self,
        verified: &VerifiedOrder,
        details: &DeliveryDetails,
    ) -> Result<OrderDetails, FlowError> {
        let details = details.trimmed();
        let missing = details.missing_fields();
        if !missing.is_empty() {
            return Err(FlowError::Validation(format!(
                "missing delivery fields: {}",
                missing.join(", ")
            )));
        }
        let Ok(_guard) = self.submit_lock.try_lock() else {
            return Err(FlowError::Validation(
                "a delivery submission is already in flight".to_owned(),
            ));
        };
        let request = DeliveryUpdateRequest {
            order_id: verified.order_id().clone(),
            details,
        };
        let updated = self.backend.submit_delivery(&request).await?;
        info!(order_id = %updated.id, "delivery details submitted");
        Ok(updated)
    }
}

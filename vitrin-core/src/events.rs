//! Payment watch event channel.
//!
//! Factory function and handle aliases for the events a payment watch emits
//! while it runs.

use tokio::sync::mpsc;
use vitrin_api::objects::order::{OrderId, OrderStatus};

/// Default buffer size for event channels.
pub const DEFAULT_CHANNEL_BUFFER: usize = 32;

/// Events emitted by a payment watch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentEvent {
    /// A non-terminal status was observed; the watch keeps going.
    Status { order_id: OrderId, status: OrderStatus },
    /// The payment settled. Emitted exactly once, then the watch stops.
    Confirmed { order_id: OrderId },
    /// The payment failed, or a status check errored (fail-stop). Emitted
    /// once, then the watch stops.
    Failed { order_id: OrderId, reason: String },
}

/// Sender handle for PaymentEvent events.
pub type PaymentEventSender = mpsc::Sender<PaymentEvent>;
/// Receiver handle for PaymentEvent events.
pub type PaymentEventReceiver = mpsc::Receiver<PaymentEvent>;

/// Create a new PaymentEvent channel.
pub fn payment_event_channel() -> (PaymentEventSender, PaymentEventReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}

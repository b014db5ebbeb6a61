//! Payment watcher.
//!
//! The watcher is responsible for:
//! - Checking an order's payment status once, immediately, on start
//! - Re-checking on a fixed interval, never overlapping checks
//! - Emitting `PaymentEvent`s for every observation
//! - Confirming exactly once when the status reaches `paid`, then stopping
//! - Stopping on the first failed check (fail-stop), emitting `Failed`
//! - Stopping promptly on cancellation without emitting anything further
//!
//! The caller owns the watch through the [`PaymentWatch`] handle; dropping
//! the handle cancels the watch.

use std::sync::Arc;
use std::time::Duration;

use kanau::processor::Processor;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use vitrin_api::objects::order::{OrderId, OrderStatus};

use crate::backend::StorefrontBackend;
use crate::checkout::PaymentSession;
use crate::errors::FlowError;
use crate::events::{PaymentEvent, PaymentEventReceiver, PaymentEventSender, payment_event_channel};

/// Fixed delay between two consecutive status checks.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// What to do after observing a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollDecision {
    /// Not settled yet, keep polling on the fixed interval.
    Continue,
    /// Funds arrived, confirm and stop.
    Confirm,
    /// Terminal failure, report and stop.
    Fail,
}

impl PollDecision {
    pub fn from_status(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending | OrderStatus::Unpaid => PollDecision::Continue,
            OrderStatus::Paid => PollDecision::Confirm,
            OrderStatus::Failed => PollDecision::Fail,
        }
    }
}

/// One status check for one order.
#[derive(Debug, Clone)]
pub struct PaymentCheck {
    pub order_id: OrderId,
}

/// Watches orders settle by polling the backend.
#[derive(Clone)]
pub struct PaymentWatcher {
    backend: Arc<dyn StorefrontBackend>,
}

impl Processor<PaymentCheck> for PaymentWatcher {
    type Output = OrderStatus;
    type Error = FlowError;

    #[tracing::instrument(skip_all, err, name = "PaymentCheck")]
    async fn process(&self, check: PaymentCheck) -> Result<OrderStatus, FlowError> {
        let response = self.backend.check_payment(&check.order_id).await?;
        Ok(response.status)
    }
}

impl PaymentWatcher {
    pub fn new(backend: Arc<dyn StorefrontBackend>) -> Self {
        Self { backend }
    }

    /// Spawn a watch task for one payment session.
    ///
    /// Returns the owning handle and the event stream. The loop starts with
    /// an immediate check (unless the session is already terminal) and then
    /// re-checks every [`POLL_INTERVAL`].
    pub fn start(&self, session: PaymentSession) -> (PaymentWatch, PaymentEventReceiver) {
        let (event_tx, event_rx) = payment_event_channel();
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let watcher = self.clone();
        let handle = tokio::spawn(async move {
            watcher.run(session, event_tx, cancel_rx).await;
        });
        (PaymentWatch { cancel_tx, handle }, event_rx)
    }

    async fn run(
        self,
        session: PaymentSession,
        events: PaymentEventSender,
        mut cancel_rx: watch::Receiver<bool>,
    ) {
        let order_id = session.order_id.clone();
        let mut status = session.status;
        info!(order_id = %order_id, status = %status, "payment watch started");

        loop {
            match PollDecision::from_status(status) {
                PollDecision::Confirm => {
                    info!(order_id = %order_id, "payment confirmed");
                    let _ = events
                        .send(PaymentEvent::Confirmed {
                            order_id: order_id.clone(),
                        })
                        .await;
                    return;
                }
                PollDecision::Fail => {
                    warn!(order_id = %order_id, "payment failed");
                    let _ = events
                        .send(PaymentEvent::Failed {
                            order_id: order_id.clone(),
                            reason: "payment reported as failed".to_owned(),
                        })
                        .await;
                    return;
                }
                PollDecision::Continue => {}
            }

            // One in-flight check at a time; cancellation wins over a
            // completed check that has not been reported yet.
            let checked = tokio::select! {
                biased;

                _ = cancel_rx.changed() => {
                    debug!(order_id = %order_id, "payment watch cancelled");
                    return;
                }

                result = self.process(PaymentCheck { order_id: order_id.clone() }) => result,
            };

            match checked {
                Ok(new_status) => {
                    debug!(order_id = %order_id, status = %new_status, "payment status checked");
                    status = new_status;
                    if status.is_terminal() {
                        continue;
                    }
                    if events
                        .send(PaymentEvent::Status {
                            order_id: order_id.clone(),
                            status,
                        })
                        .await
                        .is_err()
                    {
                        debug!(order_id = %order_id, "event receiver dropped, stopping watch");
                        return;
                    }
                    tokio::select! {
                        biased;

                        _ = cancel_rx.changed() => {
                            debug!(order_id = %order_id, "payment watch cancelled");
                            return;
                        }

                        _ = tokio::time::sleep(POLL_INTERVAL) => {}
                    }
                }
                Err(e) => {
                    // Fail-stop: one failed check ends the attempt.
                    warn!(order_id = %order_id, error = %e, "payment status check failed");
                    let _ = events
                        .send(PaymentEvent::Failed {
                            order_id: order_id.clone(),
                            reason: e.to_string(),
                        })
                        .await;
                    return;
                }
            }
        }
    }
}

/// Owning handle for a running payment watch.
///
/// Dropping the handle cancels the watch; [`cancel`](Self::cancel) does so
/// explicitly. After cancellation no further event is emitted.
pub struct PaymentWatch {
    cancel_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl PaymentWatch {
    /// Stop the watch promptly. Idempotent.
    pub fn cancel(&self) {
        let _ = self.cancel_tx.send(true);
    }

    /// Wait for the watch task to wind down.
    pub async fn stopped(self) {
        let _ = self.handle.await;
    }
}

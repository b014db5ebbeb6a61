//! `vitrin pay` subcommand: watch an order until its payment settles.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use vitrin_api::objects::order::OrderId;
use vitrin_core::backend::StorefrontBackend;
use vitrin_core::checkout::PaymentSession;
use vitrin_core::events::PaymentEvent;
use vitrin_core::payment::PaymentWatcher;

#[derive(Args, Debug)]
pub struct PayArgs {
    /// Order id to watch
    pub order_id: OrderId,
}

pub async fn run(backend: Arc<dyn StorefrontBackend>, args: PayArgs) -> Result<()> {
    let session = PaymentSession::resume(backend.as_ref(), &args.order_id).await?;
    println!("Watching order {}.", session.order_id);
    println!("  Send exactly: {} {}", session.payment_amount, session.currency);
    println!("  To address:   {}", session.payment_address);
    watch_session(backend, session).await
}

/// Run a payment watch to completion, printing each status change.
/// Ctrl-C cancels the watch; the order can be resumed later.
pub(super) async fn watch_session(
    backend: Arc<dyn StorefrontBackend>,
    session: PaymentSession,
) -> Result<()> {
    let order_id = session.order_id.clone();
    let watcher = PaymentWatcher::new(backend);
    let (watch, mut events) = watcher.start(session);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                watch.cancel();
                watch.stopped().await;
                println!();
                println!("Stopped watching. Run `vitrin pay {order_id}` to resume.");
                return Ok(());
            }
            event = events.recv() => match event {
                Some(PaymentEvent::Status { status, .. }) => {
                    println!("  Payment status: {status}");
                }
                Some(PaymentEvent::Confirmed { order_id }) => {
                    println!("Payment confirmed.");
                    println!("Run `vitrin deliver {order_id}` to submit delivery details.");
                    return Ok(());
                }
                Some(PaymentEvent::Failed { order_id, reason }) => {
                    anyhow::bail!("payment for order {order_id} failed: {reason}");
                }
                None => return Ok(()),
            },
        }
    }
}

//! `vitrin checkout` subcommand: turn the cart into an order.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use vitrin_core::backend::StorefrontBackend;
use vitrin_core::cart::CartStore;
use vitrin_core::checkout::Checkout;

use super::pay;

#[derive(Args, Debug)]
pub struct CheckoutArgs {
    /// Keep watching the payment after the order is created
    #[arg(long)]
    pub watch: bool,
}

pub async fn run(
    backend: Arc<dyn StorefrontBackend>,
    user_id: i64,
    args: CheckoutArgs,
) -> Result<()> {
    let cart = Arc::new(CartStore::new(backend.clone(), user_id));
    let checkout = Checkout::new(backend.clone(), cart);
    let session = checkout.initiate_payment().await?;

    println!("Order {} created.", session.order_id);
    println!("  Send exactly: {} {}", session.payment_amount, session.currency);
    println!("  To address:   {}", session.payment_address);

    if args.watch {
        println!();
        pay::watch_session(backend, session).await
    } else {
        println!();
        println!(
            "Run `vitrin pay {}` to watch for confirmation.",
            session.order_id
        );
        Ok(())
    }
}

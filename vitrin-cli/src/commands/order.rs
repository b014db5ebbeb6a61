//! `vitrin order` subcommand: show a stored order record.

use anyhow::Result;
use clap::Args;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use vitrin_api::ShopClient;
use vitrin_api::objects::order::{OrderDetails, OrderId};

#[derive(Args, Debug)]
pub struct OrderArgs {
    /// Order id
    pub order_id: OrderId,
}

pub async fn run(client: &ShopClient, args: OrderArgs) -> Result<()> {
    let order = client.order_details(&args.order_id).await?;
    print_order(&order);
    Ok(())
}

pub(super) fn print_order(order: &OrderDetails) {
    println!("Order: {}", order.id);
    println!("  Status:  {}", order.status);
    println!("  Total:   {} {}", order.total, order.currency);
    println!("  Created: {}", format_timestamp(order.created_at));
    if let Some(address) = &order.payment_address {
        println!("  Pay to:  {address}");
    }
    if let Some(amount) = order.payment_amount {
        println!("  Amount:  {} {}", amount, order.currency);
    }
    if !order.items.is_empty() {
        println!("  Items:");
        for item in &order.items {
            println!("    {} x {} @ {}", item.quantity, item.name, item.price);
        }
    }
    if let Some(name) = &order.name {
        println!("  Deliver to: {name}");
        let lines = [
            order.address.as_deref(),
            order.postcode.as_deref(),
            order.city.as_deref(),
            order.country.as_deref(),
            order.contact_handle.as_deref(),
        ];
        for line in lines.into_iter().flatten() {
            println!("    {line}");
        }
    }
}

/// Render a unix timestamp as RFC 3339, falling back to the raw number for
/// out-of-range values.
fn format_timestamp(unix: i64) -> String {
    OffsetDateTime::from_unix_timestamp(unix)
        .ok()
        .and_then(|t| t.format(&Rfc3339).ok())
        .unwrap_or_else(|| unix.to_string())
}

//! `vitrin deliver` subcommand: submit delivery details for a paid order.
//!
//! Flags overlay whatever delivery data the server already holds, so a
//! partially saved address can be completed one field at a time.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use vitrin_api::objects::order::OrderId;
use vitrin_core::backend::StorefrontBackend;
use vitrin_core::delivery::DeliveryGate;
use vitrin_core::errors::FlowError;

use super::order::print_order;

#[derive(Args, Debug)]
pub struct DeliverArgs {
    /// Order id
    pub order_id: OrderId,

    /// Recipient full name
    #[arg(long)]
    pub name: Option<String>,

    /// Phone number or messaging handle for the courier
    #[arg(long)]
    pub contact: Option<String>,

    /// Street address
    #[arg(long)]
    pub address: Option<String>,

    /// Postal code
    #[arg(long)]
    pub postcode: Option<String>,

    /// City
    #[arg(long)]
    pub city: Option<String>,

    /// Country
    #[arg(long)]
    pub country: Option<String>,
}

pub async fn run(backend: Arc<dyn StorefrontBackend>, args: DeliverArgs) -> Result<()> {
    let gate = DeliveryGate::new(backend);
    let verified = match gate.verify_and_load(&args.order_id).await {
        Ok(verified) => verified,
        Err(FlowError::StateConflict { order_id, reason }) => {
            anyhow::bail!("{reason}. Run `vitrin pay {order_id}` to finish the payment first.");
        }
        Err(e) => return Err(e.into()),
    };

    let mut details = verified.draft.clone();
    if let Some(name) = args.name {
        details.name = name;
    }
    if let Some(contact) = args.contact {
        details.contact_handle = contact;
    }
    if let Some(address) = args.address {
        details.address = address;
    }
    if let Some(postcode) = args.postcode {
        details.postcode = postcode;
    }
    if let Some(city) = args.city {
        details.city = city;
    }
    if let Some(country) = args.country {
        details.country = country;
    }

    let updated = gate.submit(&verified, &details).await?;
    println!("Delivery details saved.");
    print_order(&updated);
    Ok(())
}

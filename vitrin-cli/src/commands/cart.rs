//! `vitrin cart` subcommand: show and edit the shopping cart.

use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Subcommand};
use vitrin_core::backend::StorefrontBackend;
use vitrin_core::cart::CartStore;

#[derive(Args, Debug)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand, Debug)]
pub enum CartCommand {
    /// Show the cart contents and total
    Show,
    /// Add units of a product
    Add {
        /// Product id
        product_id: i64,
        /// Units to add
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Remove units of a product, or the whole line
    Remove {
        /// Product id
        product_id: i64,
        /// Units to remove; omit to drop the whole line
        #[arg(short, long)]
        quantity: Option<u32>,
    },
    /// Set the quantity of a product already in the cart
    Set {
        /// Product id
        product_id: i64,
        /// Target quantity; 0 drops the line
        quantity: u32,
    },
    /// Remove every line from the cart
    Clear,
}

pub async fn run(
    backend: Arc<dyn StorefrontBackend>,
    user_id: i64,
    args: CartArgs,
) -> Result<()> {
    let cart = CartStore::new(backend, user_id);
    match args.command {
        CartCommand::Show => {
            cart.refresh().await;
        }
        CartCommand::Add {
            product_id,
            quantity,
        } => {
            cart.add_item(product_id, quantity).await?;
        }
        CartCommand::Remove {
            product_id,
            quantity,
        } => {
            // Removal validates against the mirror, so populate it first.
            cart.refresh().await;
            cart.remove_item(product_id, quantity).await?;
        }
        CartCommand::Set {
            product_id,
            quantity,
        } => {
            cart.refresh().await;
            cart.update_quantity(product_id, quantity).await?;
        }
        CartCommand::Clear => {
            cart.clear().await?;
        }
    }
    print_cart(&cart).await;
    Ok(())
}

async fn print_cart(cart: &CartStore) {
    let items = cart.items().await;
    if items.is_empty() {
        println!("Cart is empty.");
        return;
    }
    for item in &items {
        println!(
            "{:>6}  {}  {} x {} = {}",
            item.id,
            item.name,
            item.quantity,
            item.price,
            item.subtotal()
        );
    }
    println!("Total: {}", cart.total().await);
}

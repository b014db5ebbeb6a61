//! Vitrin storefront CLI
//!
//! A terminal client for the vitrin clothing storefront: browse the catalog,
//! manage a cart, check out, watch the payment, and submit delivery details.

mod commands;
mod config;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;
use vitrin_api::ShopClient;
use vitrin_core::backend::StorefrontBackend;

use commands::{cart, catalog, checkout, deliver, order, pay};

/// Vitrin - terminal client for the vitrin storefront
#[derive(Parser, Debug)]
#[command(name = "vitrin")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./vitrin.toml")]
    config: PathBuf,

    /// Override the storefront API base URL
    #[arg(long, env = "VITRIN_API_URL")]
    api_url: Option<Url>,

    /// Override the shopper id used for cart and order calls
    #[arg(long, env = "VITRIN_USER_ID")]
    user: Option<i64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse the product catalog
    Catalog(catalog::CatalogArgs),
    /// Show and edit the shopping cart
    Cart(cart::CartArgs),
    /// Turn the cart into an order and print payment coordinates
    Checkout(checkout::CheckoutArgs),
    /// Watch an order until its payment confirms or fails
    Pay(pay::PayArgs),
    /// Show an order record
    Order(order::OrderArgs),
    /// Submit delivery details for a paid order
    Deliver(deliver::DeliverArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    let file_config = config::load_or_default(&args.config).map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    let base_url = args
        .api_url
        .unwrap_or_else(|| file_config.api.base_url.clone());
    let user_id = args.user.unwrap_or(file_config.shopper.user_id);

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(file_config.api.timeout_secs))
        .build()?;
    let client = ShopClient::new(base_url).with_http_client(http);
    let backend: Arc<dyn StorefrontBackend> = Arc::new(client.clone());

    match args.command {
        Command::Catalog(cmd) => catalog::run(&client, cmd).await,
        Command::Cart(cmd) => cart::run(backend, user_id, cmd).await,
        Command::Checkout(cmd) => checkout::run(backend, user_id, cmd).await,
        Command::Pay(cmd) => pay::run(backend, cmd).await,
        Command::Order(cmd) => order::run(&client, cmd).await,
        Command::Deliver(cmd) => deliver::run(backend, cmd).await,
    }
}

/// Initialize the tracing subscriber with environment-based filtering.
/// Defaults to warnings only so command output stays readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::CartCommand;

    #[test]
    fn parse_cart_add_with_quantity() {
        let args = Args::try_parse_from(["vitrin", "cart", "add", "7", "--quantity", "3"]).unwrap();
        let Command::Cart(cart) = args.command else {
            panic!("expected cart subcommand");
        };
        let CartCommand::Add {
            product_id,
            quantity,
        } = cart.command
        else {
            panic!("expected cart add");
        };
        assert_eq!(product_id, 7);
        assert_eq!(quantity, 3);
    }

    #[test]
    fn parse_cart_add_default_quantity_is_one() {
        let args = Args::try_parse_from(["vitrin", "cart", "add", "7"]).unwrap();
        let Command::Cart(cart) = args.command else {
            panic!("expected cart subcommand");
        };
        assert!(matches!(
            cart.command,
            CartCommand::Add {
                product_id: 7,
                quantity: 1
            }
        ));
    }

    #[test]
    fn parse_cart_remove_without_quantity() {
        let args = Args::try_parse_from(["vitrin", "cart", "remove", "7"]).unwrap();
        let Command::Cart(cart) = args.command else {
            panic!("expected cart subcommand");
        };
        assert!(matches!(
            cart.command,
            CartCommand::Remove {
                product_id: 7,
                quantity: None
            }
        ));
    }

    #[test]
    fn parse_catalog_categories_rejects_unknown_gender() {
        let result = Args::try_parse_from(["vitrin", "catalog", "categories", "kids"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_deliver_overlay_flags() {
        let args = Args::try_parse_from([
            "vitrin", "deliver", "abc", "--name", "Ada", "--city", "London",
        ])
        .unwrap();
        let Command::Deliver(deliver) = args.command else {
            panic!("expected deliver subcommand");
        };
        assert_eq!(deliver.order_id.as_str(), "abc");
        assert_eq!(deliver.name.as_deref(), Some("Ada"));
        assert_eq!(deliver.city.as_deref(), Some("London"));
        assert_eq!(deliver.postcode, None);
    }

    #[test]
    fn parse_no_subcommand_errors() {
        assert!(Args::try_parse_from(["vitrin"]).is_err());
    }

    #[test]
    fn parse_global_overrides() {
        let args = Args::try_parse_from([
            "vitrin",
            "--api-url",
            "https://shop.example.com",
            "--user",
            "42",
            "cart",
            "show",
        ])
        .unwrap();
        assert_eq!(
            args.api_url.map(|u| u.as_str().to_owned()),
            Some("https://shop.example.com/".to_owned())
        );
        assert_eq!(args.user, Some(42));
    }
}

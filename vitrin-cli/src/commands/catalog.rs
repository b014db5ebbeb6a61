//! `vitrin catalog` subcommand: browse products and categories.

use anyhow::Result;
use clap::{Args, Subcommand};
use vitrin_api::ShopClient;
use vitrin_api::objects::catalog::{Gender, Product};

#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// List every product in the catalog
    Products,
    /// Show one product
    Show {
        /// Product id
        id: i64,
    },
    /// List the categories in a catalog section
    Categories {
        /// Section: male, female or unisex
        gender: Gender,
    },
}

pub async fn run(client: &ShopClient, args: CatalogArgs) -> Result<()> {
    match args.command {
        CatalogCommand::Products => {
            let products = client.products().await?;
            if products.is_empty() {
                println!("The catalog is empty.");
                return Ok(());
            }
            for product in &products {
                print_product_line(product);
            }
        }
        CatalogCommand::Show { id } => {
            let product = client.product(id).await?;
            println!("Product: {}", product.name);
            println!("  Id:       {}", product.id);
            println!("  Price:    {}", product.price);
            println!("  Section:  {}", product.gender);
            println!("  Category: {}", product.category);
            if let Some(url) = &product.image_url {
                println!("  Image:    {url}");
            }
        }
        CatalogCommand::Categories { gender } => {
            let categories = client.categories(gender).await?;
            if categories.is_empty() {
                println!("No categories in the {gender} section.");
                return Ok(());
            }
            for category in &categories {
                println!("{category}");
            }
        }
    }
    Ok(())
}

fn print_product_line(product: &Product) {
    println!(
        "{:>6}  {}  ({}, {}, {})",
        product.id, product.name, product.price, product.gender, product.category
    );
}

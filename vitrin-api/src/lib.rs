//! Wire types and typed HTTP client for the vitrin storefront REST API.
//!
//! Everything on the wire lives in [`objects`]; [`client::ShopClient`] maps
//! the REST endpoints one-to-one onto async methods.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod client;
pub mod objects;

pub use client::{ClientError, ShopClient};

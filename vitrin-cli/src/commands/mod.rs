//! Subcommand handlers for the vitrin CLI.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod deliver;
pub mod order;
pub mod pay;

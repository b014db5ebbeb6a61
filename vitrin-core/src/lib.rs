//! Backend-agnostic order & payment lifecycle controller for the vitrin
//! storefront.
//!
//! The flow runs cart mirror → order initiation → payment watching →
//! delivery submission. Everything remote goes through the
//! [`backend::StorefrontBackend`] seam, so the whole lifecycle can run
//! against a scripted in-process backend in tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod backend;
pub mod cart;
pub mod checkout;
pub mod delivery;
pub mod errors;
pub mod events;
pub mod payment;

#[cfg(test)]
pub(crate) mod testing;

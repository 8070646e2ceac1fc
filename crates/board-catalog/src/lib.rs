//! One-shot product catalog fetch.
//!
//! Fetches the tradable-instrument catalog from the exchange REST
//! endpoint at startup. Failures degrade to an empty batch so the store
//! always reaches a valid state.

pub mod client;
pub mod error;

pub use client::{CatalogClient, CatalogResponse};
pub use error::{CatalogError, CatalogResult};

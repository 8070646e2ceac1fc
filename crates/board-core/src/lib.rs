//! Core domain types for the ticker board.
//!
//! This crate provides the fundamental types shared across the workspace:
//! - `Symbol`: stable instrument identifier
//! - `Category`: named display groupings (market tag or quote asset)
//! - `CatalogRecord`, `TickerUpdate`, `PairRecord`: catalog and feed shapes
//! - Price-change derivation and display formatting

pub mod category;
pub mod error;
pub mod pair;

pub use category::Category;
pub use error::{CoreError, Result};
pub use pair::{format_change, CatalogRecord, Classify, PairRecord, Symbol, TickerUpdate};

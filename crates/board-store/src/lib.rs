//! Incremental ticker state for the board.
//!
//! Maintains the merged instrument catalog and the additive category
//! indices, and parses combined-stream frames into update batches.

pub mod error;
pub mod parser;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use parser::{parse_stream_frame, StreamEnvelope};
pub use store::TickerStore;

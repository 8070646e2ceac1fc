//! Combined-stream frame parsing.
//!
//! The feed multiplexes streams into one socket; every frame is a JSON
//! envelope of the form `{"stream": "...", "data": [ ...ticks ]}`.
//! Malformed frames are surfaced as errors so the dispatch loop can log
//! and drop them instead of crashing.

use crate::error::{StoreError, StoreResult};
use board_core::TickerUpdate;
use serde::Deserialize;

/// Combined-stream envelope.
#[derive(Debug, Deserialize)]
pub struct StreamEnvelope {
    /// Stream name (e.g., "!miniTicker@arr").
    pub stream: String,
    /// Batch of partial tick records.
    pub data: Vec<TickerUpdate>,
}

/// Parse one inbound frame into an update batch.
pub fn parse_stream_frame(text: &str) -> StoreResult<Vec<TickerUpdate>> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let data = value
        .get("data")
        .cloned()
        .ok_or(StoreError::MissingData)?;
    let batch: Vec<TickerUpdate> = serde_json::from_value(data)
        .map_err(|e| StoreError::Parse(format!("bad tick batch: {e}")))?;
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_frame() {
        let frame = r#"{
            "stream": "!miniTicker@arr",
            "data": [
                {"e":"24hrMiniTicker","s":"ETHBTC","c":"0.034","o":"0.033","h":"0.035","l":"0.032","v":"100","q":"3.4"},
                {"e":"24hrMiniTicker","s":"BNBUSDT","c":"584.2","o":"590.0","h":"600","l":"580","v":"5","q":"2900"}
            ]
        }"#;
        let batch = parse_stream_frame(frame).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].symbol.as_str(), "ETHBTC");
        assert_eq!(batch[0].last_price, dec!(0.034));
        assert_eq!(batch[1].open_price, dec!(590.0));
    }

    #[test]
    fn test_parse_frame_envelope_struct() {
        let frame = r#"{"stream":"!miniTicker@arr","data":[{"s":"ETHBTC","c":"1","o":"2"}]}"#;
        let envelope: StreamEnvelope = serde_json::from_str(frame).unwrap();
        assert_eq!(envelope.stream, "!miniTicker@arr");
        assert_eq!(envelope.data.len(), 1);
    }

    #[test]
    fn test_parse_frame_not_json() {
        let err = parse_stream_frame("not json").unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }

    #[test]
    fn test_parse_frame_missing_data() {
        let err = parse_stream_frame(r#"{"stream":"x"}"#).unwrap_err();
        assert!(matches!(err, StoreError::MissingData));
    }

    #[test]
    fn test_parse_frame_ill_typed_data() {
        let err = parse_stream_frame(r#"{"stream":"x","data":"nope"}"#).unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }
}

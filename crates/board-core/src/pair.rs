//! Instrument records and feed shapes.
//!
//! The catalog endpoint and the miniTicker stream use short wire names
//! (`s`, `b`, `q`, `pm`, `c`, `o`); the structs here map them to readable
//! fields and keep the remaining catalog fields as an opaque passthrough.

use crate::category::Category;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable instrument identifier (e.g., "ETHBTC").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Access to the tags a batch record can prove category membership with.
pub trait Classify {
    fn symbol(&self) -> &Symbol;
    fn market_tag(&self) -> Option<&str>;
    fn quote_asset(&self) -> Option<&str>;

    /// Categories this record belongs to, `All` included.
    fn categories(&self) -> Vec<Category> {
        Category::classify(self.market_tag(), self.quote_asset())
    }
}

/// One entry of the one-shot product catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Symbol (wire: `s`).
    #[serde(rename = "s")]
    pub symbol: Symbol,
    /// Base asset (wire: `b`).
    #[serde(rename = "b")]
    pub base: String,
    /// Quote asset (wire: `q`).
    #[serde(rename = "q")]
    pub quote: String,
    /// Parent-market tag (wire: `pm`), e.g. "BNB", "BTC", "ALTS".
    #[serde(rename = "pm")]
    pub market: String,
    /// Last price (wire: `c`).
    #[serde(rename = "c")]
    pub last_price: Decimal,
    /// Open price (wire: `o`).
    #[serde(rename = "o")]
    pub open_price: Decimal,
    /// Remaining catalog fields, carried verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Classify for CatalogRecord {
    fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    fn market_tag(&self) -> Option<&str> {
        Some(&self.market)
    }

    fn quote_asset(&self) -> Option<&str> {
        Some(&self.quote)
    }
}

/// One element of a streamed miniTicker batch.
///
/// Only the price fields are consumed; everything else in the tick is
/// ignored. Ticks carry no market/quote tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerUpdate {
    /// Symbol (wire: `s`).
    #[serde(rename = "s")]
    pub symbol: Symbol,
    /// Last price (wire: `c`).
    #[serde(rename = "c")]
    pub last_price: Decimal,
    /// Open price (wire: `o`).
    #[serde(rename = "o")]
    pub open_price: Decimal,
}

impl Classify for TickerUpdate {
    fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    fn market_tag(&self) -> Option<&str> {
        None
    }

    fn quote_asset(&self) -> Option<&str> {
        None
    }
}

/// Stored instrument entry.
///
/// Catalog fields are optional: an update for a symbol the catalog never
/// seeded creates a partial record holding just the refreshed prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairRecord {
    pub symbol: Symbol,
    pub base: Option<String>,
    pub quote: Option<String>,
    pub market: Option<String>,
    pub last_price: Decimal,
    pub open_price: Decimal,
    /// Passthrough catalog fields, set at seed time only.
    #[serde(default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PairRecord {
    /// Build a full record from a catalog entry.
    pub fn from_catalog(record: &CatalogRecord) -> Self {
        Self {
            symbol: record.symbol.clone(),
            base: Some(record.base.clone()),
            quote: Some(record.quote.clone()),
            market: Some(record.market.clone()),
            last_price: record.last_price,
            open_price: record.open_price,
            extra: record.extra.clone(),
        }
    }

    /// Build a partial record from a feed tick (unseeded symbol).
    pub fn from_tick(tick: &TickerUpdate) -> Self {
        Self {
            symbol: tick.symbol.clone(),
            base: None,
            quote: None,
            market: None,
            last_price: tick.last_price,
            open_price: tick.open_price,
            extra: serde_json::Map::new(),
        }
    }

    /// Replace the price fields from a feed tick, leaving everything else.
    pub fn apply_tick(&mut self, tick: &TickerUpdate) {
        self.last_price = tick.last_price;
        self.open_price = tick.open_price;
    }

    /// Display name, "BASE/QUOTE" when the catalog fields are known.
    pub fn pair_name(&self) -> String {
        match (&self.base, &self.quote) {
            (Some(base), Some(quote)) => format!("{base}/{quote}"),
            _ => self.symbol.to_string(),
        }
    }

    /// Price change since open as a percentage.
    ///
    /// `None` when the open price is zero; the division is undefined and
    /// must not surface as a runtime fault.
    pub fn change_pct(&self) -> Option<Decimal> {
        if self.open_price.is_zero() {
            return None;
        }
        Some((self.last_price - self.open_price) / self.open_price * Decimal::from(100))
    }
}

/// Format the price change for display, two decimal places.
///
/// A zero open price renders as the `"-"` sentinel.
pub fn format_change(record: &PairRecord) -> String {
    match record.change_pct() {
        Some(pct) => format!("{:.2}%", pct.round_dp(2)),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(last: Decimal, open: Decimal) -> PairRecord {
        PairRecord {
            symbol: Symbol::from("ETHBTC"),
            base: Some("ETH".to_string()),
            quote: Some("BTC".to_string()),
            market: Some("BTC".to_string()),
            last_price: last,
            open_price: open,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_change_positive() {
        let r = record(dec!(110), dec!(100));
        assert_eq!(format_change(&r), "10.00%");
    }

    #[test]
    fn test_change_negative() {
        let r = record(dec!(90), dec!(100));
        assert_eq!(format_change(&r), "-10.00%");
    }

    #[test]
    fn test_change_zero_open_is_sentinel() {
        let r = record(dec!(90), dec!(0));
        assert_eq!(r.change_pct(), None);
        assert_eq!(format_change(&r), "-");
    }

    #[test]
    fn test_pair_name_partial_record_falls_back_to_symbol() {
        let tick = TickerUpdate {
            symbol: Symbol::from("NEWUSDT"),
            last_price: dec!(1),
            open_price: dec!(1),
        };
        let r = PairRecord::from_tick(&tick);
        assert_eq!(r.pair_name(), "NEWUSDT");
    }

    #[test]
    fn test_catalog_record_wire_names_and_passthrough() {
        let json = r#"{
            "s": "ETHBTC",
            "b": "ETH",
            "q": "BTC",
            "pm": "BTC",
            "c": "0.034",
            "o": "0.033",
            "an": "Ethereum",
            "cs": 120000000
        }"#;
        let rec: CatalogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.symbol.as_str(), "ETHBTC");
        assert_eq!(rec.last_price, dec!(0.034));
        assert_eq!(rec.extra.get("an").unwrap(), "Ethereum");
        assert_eq!(rec.categories(), vec![Category::All, Category::Btc]);
    }

    #[test]
    fn test_tick_accepts_numeric_prices() {
        // Catalog prices arrive as numbers on some deployments; Decimal
        // deserializes both forms.
        let json = r#"{"s": "BNBUSDT", "c": 584.2, "o": 590}"#;
        let tick: TickerUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(tick.last_price, dec!(584.2));
        assert_eq!(tick.categories(), vec![Category::All]);
    }
}

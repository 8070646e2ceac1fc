//! Display categories.
//!
//! Instruments are grouped by their parent-market tag (BNB/BTC/ALTS) and
//! by selected quote assets (XRP/ETH/TRX). `All` always applies.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named instrument grouping used to filter the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    All,
    Bnb,
    Btc,
    Alts,
    Xrp,
    Eth,
    Trx,
}

impl Category {
    /// Categories keyed off the parent-market tag.
    pub const MARKET_TAGGED: [Category; 3] = [Category::Bnb, Category::Btc, Category::Alts];

    /// Categories keyed off the quote asset.
    pub const QUOTE_TAGGED: [Category; 3] = [Category::Xrp, Category::Eth, Category::Trx];

    /// All seven categories, `All` first.
    pub const ALL: [Category; 7] = [
        Category::All,
        Category::Bnb,
        Category::Btc,
        Category::Alts,
        Category::Xrp,
        Category::Eth,
        Category::Trx,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "ALL",
            Category::Bnb => "BNB",
            Category::Btc => "BTC",
            Category::Alts => "ALTS",
            Category::Xrp => "XRP",
            Category::Eth => "ETH",
            Category::Trx => "TRX",
        }
    }

    /// Categories a record with the given tags belongs to, `All` included.
    ///
    /// Membership is computed from whatever tags the batch carries; a feed
    /// tick carries neither tag and therefore only proves membership in
    /// `All`.
    pub fn classify(market_tag: Option<&str>, quote_asset: Option<&str>) -> Vec<Category> {
        let mut categories = vec![Category::All];
        match market_tag {
            Some("BNB") => categories.push(Category::Bnb),
            Some("BTC") => categories.push(Category::Btc),
            Some("ALTS") => categories.push(Category::Alts),
            _ => {}
        }
        match quote_asset {
            Some("XRP") => categories.push(Category::Xrp),
            Some("ETH") => categories.push(Category::Eth),
            Some("TRX") => categories.push(Category::Trx),
            _ => {}
        }
        categories
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Ok(Category::All),
            "BNB" => Ok(Category::Bnb),
            "BTC" => Ok(Category::Btc),
            "ALTS" => Ok(Category::Alts),
            "XRP" => Ok(Category::Xrp),
            "ETH" => Ok(Category::Eth),
            "TRX" => Ok(Category::Trx),
            other => Err(CoreError::UnknownCategory(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_market_tag() {
        let cats = Category::classify(Some("BNB"), Some("USDT"));
        assert_eq!(cats, vec![Category::All, Category::Bnb]);
    }

    #[test]
    fn test_classify_quote_asset() {
        let cats = Category::classify(Some("ALTS"), Some("ETH"));
        assert_eq!(cats, vec![Category::All, Category::Alts, Category::Eth]);
    }

    #[test]
    fn test_classify_no_tags() {
        // Feed ticks carry no tags: membership in All only.
        let cats = Category::classify(None, None);
        assert_eq!(cats, vec![Category::All]);
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("btc".parse::<Category>().unwrap(), Category::Btc);
        assert_eq!("ALTS".parse::<Category>().unwrap(), Category::Alts);
        assert!("DOGE".parse::<Category>().is_err());
    }
}

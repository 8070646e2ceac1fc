//! Application configuration.

use crate::error::{AppError, AppResult};
use board_core::Category;
use board_ws::ConnectionConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// WebSocket configuration subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsConfig {
    /// Maximum reconnect attempts over the session.
    #[serde(default = "default_retry_limit")]
    pub retry_limit: u32,
    /// Fixed delay before each reconnect attempt (ms).
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_retry_limit() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    5000
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            retry_limit: default_retry_limit(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl From<WsConfig> for ConnectionConfig {
    fn from(cfg: WsConfig) -> Self {
        Self {
            url: String::new(), // Set separately
            retry_limit: cfg.retry_limit,
            retry_delay_ms: cfg.retry_delay_ms,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Product catalog REST endpoint.
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,
    /// Combined miniTicker stream URL.
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    /// Category shown in the periodic summary.
    #[serde(default = "default_category")]
    pub category: Category,
    /// Summary output interval (seconds).
    #[serde(default = "default_summary_interval_secs")]
    pub summary_interval_secs: u64,
    /// WebSocket configuration.
    #[serde(default)]
    pub websocket: WsConfig,
}

fn default_catalog_url() -> String {
    "https://www.binance.com/exchange-api/v1/public/asset-service/product/get-products".to_string()
}

fn default_ws_url() -> String {
    "wss://stream.binance.com/stream?streams=!miniTicker@arr".to_string()
}

fn default_category() -> Category {
    Category::Btc
}

fn default_summary_interval_secs() -> u64 {
    10
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            catalog_url: default_catalog_url(),
            ws_url: default_ws_url(),
            category: default_category(),
            summary_interval_secs: default_summary_interval_secs(),
            websocket: WsConfig::default(),
        }
    }
}

impl BoardConfig {
    /// Load configuration.
    ///
    /// Path priority: explicit argument, then the `BOARD_CONFIG` env
    /// var, then `config/default.toml`. Defaults are used when the file
    /// does not exist.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        let config_path = path
            .map(str::to_string)
            .or_else(|| std::env::var("BOARD_CONFIG").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Connection configuration for the feed URL.
    pub fn connection_config(&self) -> ConnectionConfig {
        let mut config: ConnectionConfig = self.websocket.clone().into();
        config.url = self.ws_url.clone();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default();
        assert_eq!(config.category, Category::Btc);
        assert_eq!(config.websocket.retry_limit, 3);
        assert_eq!(config.websocket.retry_delay_ms, 5000);
        assert!(config.ws_url.contains("!miniTicker@arr"));
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
            category = "ETH"
            summary_interval_secs = 5

            [websocket]
            retry_limit = 1
            retry_delay_ms = 100
        "#;
        let config: BoardConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.category, Category::Eth);
        assert_eq!(config.summary_interval_secs, 5);
        assert_eq!(config.websocket.retry_limit, 1);
        // Unspecified fields fall back to defaults
        assert!(config.catalog_url.contains("get-products"));
    }

    #[test]
    fn test_connection_config_carries_url() {
        let config = BoardConfig::default();
        let conn = config.connection_config();
        assert_eq!(conn.url, config.ws_url);
        assert_eq!(conn.retry_limit, 3);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = BoardConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("category"));
        let parsed: BoardConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.category, config.category);
    }
}

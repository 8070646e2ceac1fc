//! Live market ticker board - entry point.
//!
//! Seeds the ticker store from the product catalog, subscribes to the
//! combined miniTicker stream, and logs a categorized price summary.

use anyhow::Result;
use board_core::Category;
use clap::Parser;
use tracing::info;

/// Live market ticker board
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via BOARD_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Category to display (ALL, BNB, BTC, ALTS, XRP, ETH, TRX)
    #[arg(long)]
    category: Option<Category>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize TLS crypto provider (must be before any WS connections)
    board_ws::init_crypto();

    let args = Args::parse();

    board_app::init_logging()?;

    info!("Starting ticker board v{}", env!("CARGO_PKG_VERSION"));

    let mut config = board_app::BoardConfig::load(args.config.as_deref())?;
    if let Some(category) = args.category {
        config.category = category;
    }
    info!(ws_url = %config.ws_url, category = %config.category, "Configuration loaded");

    let mut app = board_app::Application::new(config);
    app.run().await?;

    Ok(())
}

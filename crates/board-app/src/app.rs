//! Main application orchestration.
//!
//! Wires the one-shot catalog seed and the streaming feed into the
//! ticker store, all on a single dispatch task. The presentation
//! surface is a periodic structured-log summary of the configured
//! category plus the user-visible feed state label.

use crate::config::BoardConfig;
use crate::error::AppResult;
use board_catalog::CatalogClient;
use board_core::format_change;
use board_store::{parse_stream_frame, TickerStore};
use board_ws::{ConnectionManager, ReadyState, WsEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Rows shown per summary.
const SUMMARY_ROWS: usize = 5;

/// User-visible label for a connection state.
fn state_label(state: ReadyState) -> &'static str {
    match state {
        ReadyState::Open => "Sync",
        ReadyState::Closed => "Closed",
        ReadyState::Uninstantiated => "Error",
        ReadyState::Connecting => "Connecting",
        ReadyState::Closing => "Closing",
    }
}

/// Main application.
pub struct Application {
    config: BoardConfig,
    store: TickerStore,
}

impl Application {
    /// Create a new application with an empty store.
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            store: TickerStore::new(),
        }
    }

    /// Seed the store, start the feed, and run the dispatch loop until
    /// Ctrl-C or until the feed goes terminal.
    pub async fn run(&mut self) -> AppResult<()> {
        // Seed before any update is applied; a fetch failure seeds empty.
        let catalog = CatalogClient::new(&self.config.catalog_url)?;
        let batch = catalog.fetch_or_empty().await;
        self.store.seed(&batch);
        info!(
            products = self.store.len(),
            category = %self.config.category,
            "store seeded"
        );

        let (event_tx, mut event_rx) = mpsc::channel(256);
        let manager = Arc::new(ConnectionManager::new(
            self.config.connection_config(),
            event_tx,
        ));

        let runner = manager.clone();
        let mut feed_task = tokio::spawn(async move { runner.run().await });
        let mut feed_done = false;

        let mut summary =
            tokio::time::interval(Duration::from_secs(self.config.summary_interval_secs.max(1)));
        summary.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("shutdown requested");
                    manager.shutdown();
                    break;
                }

                event = event_rx.recv() => {
                    match event {
                        Some(WsEvent::Message(payload)) => match parse_stream_frame(&payload) {
                            Ok(ticks) => self.store.update(&ticks),
                            Err(e) => warn!(error = %e, "dropping malformed frame"),
                        },
                        Some(_) => {
                            info!(label = state_label(manager.state()), "feed state");
                        }
                        None => {
                            manager.shutdown();
                            break;
                        }
                    }
                }

                _ = summary.tick() => self.log_summary(),

                _ = &mut feed_task, if !feed_done => {
                    // Retry budget exhausted: the board keeps its last
                    // snapshot but stops receiving updates.
                    feed_done = true;
                    info!(label = state_label(manager.state()), "feed terminal, no further updates");
                    break;
                }
            }
        }

        if !feed_done {
            let _ = feed_task.await;
        }
        self.log_summary();
        Ok(())
    }

    /// Read-side access for embedding or tests.
    pub fn store(&self) -> &TickerStore {
        &self.store
    }

    fn log_summary(&self) {
        let rows = self.store.rows(self.config.category);
        info!(
            category = %self.config.category,
            rows = rows.len(),
            total = self.store.len(),
            "market summary"
        );
        for row in rows.iter().take(SUMMARY_ROWS) {
            info!(
                pair = %row.pair_name(),
                last = %row.last_price,
                change = %format_change(row),
                "row"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_labels() {
        assert_eq!(state_label(ReadyState::Open), "Sync");
        assert_eq!(state_label(ReadyState::Closed), "Closed");
        assert_eq!(state_label(ReadyState::Uninstantiated), "Error");
    }

    #[test]
    fn test_new_application_has_empty_store() {
        let app = Application::new(BoardConfig::default());
        assert!(app.store().is_empty());
    }
}

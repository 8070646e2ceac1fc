//! Ticker board application crate.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;

pub use app::Application;
pub use config::{BoardConfig, WsConfig};
pub use error::{AppError, AppResult};
pub use logging::init_logging;

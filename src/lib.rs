//! Signal relay: matches trading signals to subscribers and collects their
//! preferences over Telegram.
//!
//! # Architecture
//!
//! - [`domain`] - Markets, timeframes, preferences, signals and match results
//! - [`port`] - Traits for the preference store and match forwarder
//! - [`application`] - Signal matching, webhook dispatch and the preference dialogue
//! - [`adapter`] - HTTP API, Telegram bot, CLI, Supabase and webhook clients
//! - [`infrastructure`] - Configuration and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `telegram` (default) - Run the preference bot via `teloxide`
//! - `testkit` - In-memory store and recording forwarder for tests
//!
//! # Example
//!
//! ```no_run
//! use signal_relay::infrastructure::{bootstrap, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> signal_relay::error::Result<()> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     bootstrap::run(config).await
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

//! Infrastructure configuration modules.

pub mod http;
pub mod logging;
pub mod server;
pub mod settings;
pub mod store;
pub mod telegram;
pub mod webhook;

pub use settings::Config;

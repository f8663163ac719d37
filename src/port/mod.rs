//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!   HTTP / Telegram ──▶ application ──▶ PreferenceStore ──▶ Supabase
//!                            │
//!                            └───────▶ MatchForwarder  ──▶ webhook
//! ```

pub mod outbound;

pub use outbound::forwarder::MatchForwarder;
pub use outbound::store::PreferenceStore;

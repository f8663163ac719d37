//! Outbound adapters (driven side): store and webhook clients.

pub mod supabase;
pub mod webhook;

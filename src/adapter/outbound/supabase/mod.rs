//! Supabase-backed preference store.

mod client;

pub use client::SupabaseStore;

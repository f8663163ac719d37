//! Preference store connection settings.

use serde::Deserialize;

/// Supabase/PostgREST collection holding subscriber preferences.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`. Overridden by `SUPABASE_URL`.
    pub url: String,
    /// Collection name under `/rest/v1/`.
    pub table: String,
    /// Ask the store to echo created rows (`Prefer: return=representation`).
    pub return_representation: bool,
    /// Loaded from `SUPABASE_KEY` at runtime (never from the config file).
    #[serde(skip)]
    pub api_key: String,
}

fn default_table() -> String {
    "subscriber_preferences".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            table: default_table(),
            return_representation: false,
            api_key: String::new(),
        }
    }
}

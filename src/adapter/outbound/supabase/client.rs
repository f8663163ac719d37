//! PostgREST (Supabase) client for the preference collection.
//!
//! Reads use equality filters (`field=eq.value`) and hand rows back as the
//! JSON objects the store sent; writes post a single JSON object. Every request carries both the `apikey` header and a bearer token
//! built from the same key. No request is retried.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::{SubscriberPreference, SubscriberRecord};
use crate::error::{ConfigError, Result, StoreError};
use crate::infrastructure::config::Config;
use crate::port::PreferenceStore;

const PREFER_MINIMAL: &str = "return=minimal";
const PREFER_REPRESENTATION: &str = "return=representation";

/// HTTP client for one Supabase collection.
pub struct SupabaseStore {
    http: HttpClient,
    /// Collection endpoint, `{base}/rest/v1/{table}`.
    endpoint: String,
    headers: HeaderMap,
    prefer: &'static str,
}

impl SupabaseStore {
    /// Create a client for `endpoint` authenticated with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key contains characters not allowed in a header.
    pub fn new(http: HttpClient, endpoint: impl Into<String>, api_key: &str) -> Result<Self> {
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            headers: auth_headers(api_key)?,
            prefer: PREFER_MINIMAL,
        })
    }

    /// Build from application config, sharing the given HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the store key is not a valid header value.
    pub fn from_config(config: &Config, http: HttpClient) -> Result<Self> {
        let store = Self::new(http, config.store_endpoint(), &config.store.api_key)?;
        Ok(store.with_representation(config.store.return_representation))
    }

    /// Ask the store to echo created rows instead of returning an empty body.
    #[must_use]
    pub fn with_representation(mut self, enabled: bool) -> Self {
        self.prefer = if enabled {
            PREFER_REPRESENTATION
        } else {
            PREFER_MINIMAL
        };
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn auth_headers(api_key: &str) -> Result<HeaderMap> {
    let invalid = |e: reqwest::header::InvalidHeaderValue| ConfigError::InvalidValue {
        field: "SUPABASE_KEY",
        reason: e.to_string(),
    };

    let mut headers = HeaderMap::new();
    headers.insert("apikey", HeaderValue::from_str(api_key).map_err(invalid)?);
    let mut bearer = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(invalid)?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

#[async_trait]
impl PreferenceStore for SupabaseStore {
    async fn create(&self, preference: &SubscriberPreference) -> std::result::Result<(), StoreError> {
        debug!(
            subscriber_id = %preference.subscriber_id,
            instrument = %preference.instrument,
            timeframe = %preference.timeframe,
            "Creating preference"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .header("Prefer", self.prefer)
            .json(preference)
            .send()
            .await
            .map_err(|e| StoreError::write(None, e.to_string()))?;

        let status = response.status();
        if status == StatusCode::OK || status == StatusCode::CREATED {
            info!(status = status.as_u16(), "Preference stored");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), body = %body, "Store rejected preference");
        Err(StoreError::write(Some(status.as_u16()), body))
    }

    async fn query(
        &self,
        instrument: &str,
        timeframe: &str,
    ) -> std::result::Result<Vec<SubscriberRecord>, StoreError> {
        debug!(instrument, timeframe, endpoint = %self.endpoint, "Querying preferences");

        let response = self
            .http
            .get(&self.endpoint)
            .headers(self.headers.clone())
            .query(&[
                ("select", "*".to_string()),
                ("instrument", format!("eq.{instrument}")),
                ("timeframe", format!("eq.{timeframe}")),
            ])
            .send()
            .await
            .map_err(|e| StoreError::read(None, e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::read(Some(status.as_u16()), e.to_string()))?;

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), body = %body, "Store query failed");
            return Err(StoreError::read(Some(status.as_u16()), body));
        }

        let rows = decode_rows(&body).map_err(|reason| {
            StoreError::read(Some(status.as_u16()), format!("invalid response body: {reason}"))
        })?;
        debug!(count = rows.len(), "Fetched preferences");
        Ok(rows)
    }

    fn store_name(&self) -> &'static str {
        "supabase"
    }
}

/// Decode a query body. The body must be a JSON array; non-object elements
/// are skipped, object rows are kept whatever their column types.
fn decode_rows(body: &str) -> std::result::Result<Vec<SubscriberRecord>, String> {
    let value: Value = serde_json::from_str(body).map_err(|e| e.to_string())?;
    let Value::Array(items) = value else {
        return Err("expected a JSON array of rows".to_string());
    };

    let total = items.len();
    let rows: Vec<SubscriberRecord> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(columns) => Some(SubscriberRecord::from_columns(columns)),
            _ => None,
        })
        .collect();
    if rows.len() < total {
        warn!(skipped = total - rows.len(), "Ignoring non-object rows in store response");
    }
    Ok(rows)
}

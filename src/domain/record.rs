//! Subscriber rows as returned by the store.
//!
//! A row is kept as the JSON object the store sent, so every column
//! (including ones this crate never wrote, like `id`) reaches the response
//! and the webhook unchanged. Typed accessors read the known columns and
//! return `None` when a value is absent or shaped differently.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::market::Market;
use super::preference::SubscriberPreference;

/// One stored subscriber row, columns untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriberRecord(Map<String, Value>);

impl SubscriberRecord {
    pub fn from_columns(columns: Map<String, Value>) -> Self {
        Self(columns)
    }

    /// Raw column value.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    #[must_use]
    pub fn columns(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Chat id as text. Integer columns (Telegram chat ids) are rendered in decimal.
    #[must_use]
    pub fn chat_id(&self) -> Option<String> {
        match self.get("chat_id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    #[must_use]
    pub fn instrument(&self) -> Option<&str> {
        self.get("instrument")?.as_str()
    }

    #[must_use]
    pub fn timeframe(&self) -> Option<&str> {
        self.get("timeframe")?.as_str()
    }

    #[must_use]
    pub fn market(&self) -> Option<Market> {
        self.get("market")?.as_str()?.parse().ok()
    }

    /// Creation time. Timestamps without an offset are read as UTC.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.get("created_at")?.as_str()?;
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    /// Exact, case-sensitive comparison on the instrument and timeframe columns.
    #[must_use]
    pub fn matches(&self, instrument: &str, timeframe: &str) -> bool {
        self.instrument() == Some(instrument) && self.timeframe() == Some(timeframe)
    }
}

impl From<&SubscriberPreference> for SubscriberRecord {
    fn from(pref: &SubscriberPreference) -> Self {
        let mut columns = Map::new();
        columns.insert(
            "subscriber_id".into(),
            Value::String(pref.subscriber_id.to_string()),
        );
        columns.insert("chat_id".into(), Value::String(pref.chat_id.clone()));
        columns.insert("market".into(), Value::String(pref.market.as_str().into()));
        columns.insert("instrument".into(), Value::String(pref.instrument.clone()));
        columns.insert(
            "timeframe".into(),
            Value::String(pref.timeframe.as_str().into()),
        );
        Self(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timeframe;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    fn record(value: Value) -> SubscriberRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn integer_chat_id_reads_as_text() {
        let row = record(json!({ "chat_id": 123456789, "instrument": "EURUSD", "timeframe": "1h" }));
        assert_eq!(row.chat_id().as_deref(), Some("123456789"));

        let row = record(json!({ "chat_id": -1001234 }));
        assert_eq!(row.chat_id().as_deref(), Some("-1001234"));
    }

    #[test]
    fn timestamp_without_offset_is_utc() {
        let row = record(json!({ "created_at": "2024-05-01T10:00:00.123456" }));
        let ts = row.created_at().unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day(), ts.hour()), (2024, 5, 1, 10));

        let row = record(json!({ "created_at": "2024-05-01T12:00:00+02:00" }));
        assert_eq!(row.created_at().unwrap().hour(), 10);

        let row = record(json!({ "created_at": "yesterday" }));
        assert_eq!(row.created_at(), None);
    }

    #[test]
    fn odd_columns_do_not_break_the_row() {
        let row = record(json!({
            "id": 7,
            "chat_id": null,
            "market": null,
            "instrument": "XAUUSD",
            "timeframe": "2h"
        }));
        assert_eq!(row.chat_id(), None);
        assert_eq!(row.market(), None);
        assert!(row.matches("XAUUSD", "2h"));
        assert_eq!(row.get("id"), Some(&json!(7)));
    }

    #[test]
    fn serializes_back_unchanged() {
        let original = json!({ "id": 3, "chat_id": 42, "extra": { "nested": true } });
        let row = record(original.clone());
        assert_eq!(serde_json::to_value(&row).unwrap(), original);
    }

    #[test]
    fn from_preference_carries_wire_values() {
        let pref = SubscriberPreference::new("42", Market::Crypto, "BTCUSD", Timeframe::H4);
        let row = SubscriberRecord::from(&pref);
        assert_eq!(row.chat_id().as_deref(), Some("42"));
        assert_eq!(row.market(), Some(Market::Crypto));
        assert!(row.matches("BTCUSD", "4h"));
        assert_eq!(
            row.get("subscriber_id").and_then(Value::as_str),
            Some(pref.subscriber_id.as_str())
        );
    }
}

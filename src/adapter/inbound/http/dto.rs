//! Request and response bodies for the HTTP surface.

use serde::{Deserialize, Serialize};

use crate::domain::{MatchResult, Signal};
use crate::error::Error;

/// Body of `POST /match-subscribers`.
///
/// Fields are optional here so that missing values surface as an
/// `InvalidRequest` rather than a generic deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignalRequest {
    #[serde(default)]
    pub instrument: Option<String>,
    #[serde(default)]
    pub timeframe: Option<String>,
}

impl SignalRequest {
    /// Validate and convert into a [`Signal`]. Values are not normalized.
    pub fn into_signal(self) -> Result<Signal, Error> {
        let instrument = required(self.instrument, "instrument")?;
        let timeframe = required(self.timeframe, "timeframe")?;
        Ok(Signal::new(instrument, timeframe))
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, Error> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(Error::InvalidRequest(format!("`{field}` must not be empty"))),
        None => Err(Error::InvalidRequest(format!("`{field}` is required"))),
    }
}

/// Successful match response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub status: String,
    pub message: String,
    pub data: MatchResult,
}

impl MatchResponse {
    #[must_use]
    pub fn success(data: MatchResult) -> Self {
        Self {
            status: "success".to_string(),
            message: "Subscribers matched successfully".to_string(),
            data,
        }
    }
}

/// Error body for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(instrument: Option<&str>, timeframe: Option<&str>) -> SignalRequest {
        SignalRequest {
            instrument: instrument.map(str::to_string),
            timeframe: timeframe.map(str::to_string),
        }
    }

    #[test]
    fn valid_request_keeps_values_verbatim() {
        let signal = request(Some("eurusd"), Some("1H")).into_signal().unwrap();
        assert_eq!(signal, Signal::new("eurusd", "1H"));
    }

    #[test]
    fn missing_field_is_invalid() {
        let err = request(None, Some("1h")).into_signal().unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(msg) if msg.contains("instrument")));
    }

    #[test]
    fn blank_field_is_invalid() {
        let err = request(Some("EURUSD"), Some("  ")).into_signal().unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(msg) if msg.contains("timeframe")));
    }
}

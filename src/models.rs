use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::SearchError;

/// Inbound search request. Only `query` is read; everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<Value>,
}

impl SearchRequest {
    /// Parses a raw request body.
    ///
    /// A JSON `null` body is a failure. Any other non-object value is accepted
    /// as a request without a query.
    pub fn from_slice(body: &[u8]) -> Result<Self, SearchError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| SearchError::invalid_body(format!("Invalid JSON body: {}", e)))?;

        match value {
            Value::Null => Err(SearchError::invalid_body(
                "Request body must not be null",
            )),
            Value::Object(mut map) => Ok(Self {
                query: map.remove("query"),
            }),
            _ => Ok(Self::default()),
        }
    }

    /// The query text as sent to the provider. Missing or `null` becomes an
    /// empty string rather than the literal `undefined`/`null`, and any other
    /// non-string value (numbers, booleans, arrays, objects) is sent as its
    /// JSON text.
    pub fn query_text(&self) -> String {
        match &self.query {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl From<&SearchError> for ErrorResponse {
    fn from(err: &SearchError) -> Self {
        Self::new(err.message())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

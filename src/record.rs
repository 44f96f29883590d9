//! Canonical sentiment records and message normalization.
//!
//! Upstream producers emit loosely structured JSON objects; this module
//! coerces each one into the four-field canonical form, substituting
//! defaults for missing fields. The only hard requirement is that a
//! `sentiment` value, when present, reads as a number; a message that
//! fails that is rejected as a value, never as a panic, so the caller
//! can log it and move to the next message.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Category substituted when a message carries none.
pub const DEFAULT_CATEGORY: &str = "unknown";

/// Author substituted when a message carries none.
pub const DEFAULT_AUTHOR: &str = "anonymous";

/// Reasons a raw message fails normalization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// Decoded JSON was not an object.
    #[error("message is not a JSON object")]
    NotAnObject,

    /// `sentiment` was present but not readable as a number.
    #[error("sentiment value {0} is not a number")]
    BadSentiment(String),
}

/// Canonical four-field representation of one sentiment event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    /// Grouping key, [`DEFAULT_CATEGORY`] when absent.
    pub category: String,

    /// Author key, [`DEFAULT_AUTHOR`] when absent.
    pub author: String,

    /// Sentiment score, `0.0` when absent.
    pub sentiment: f64,

    /// Producer timestamp, passed through verbatim and never parsed.
    pub timestamp: Option<String>,
}

/// Coerce a decoded JSON message into a [`SentimentRecord`].
///
/// Missing fields get defaults; a `sentiment` that is present but not
/// representable as a float rejects the whole message. No other
/// validation happens here: empty strings, unknown categories and
/// nonsense timestamps all pass through untouched.
pub fn normalize(raw: &Value) -> Result<SentimentRecord, NormalizeError> {
    let obj = raw.as_object().ok_or(NormalizeError::NotAnObject)?;

    let category = obj
        .get("category")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_CATEGORY)
        .to_owned();

    let author = obj
        .get("author")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_AUTHOR)
        .to_owned();

    let sentiment = match obj.get("sentiment") {
        None => 0.0,
        Some(value) => coerce_sentiment(value)?,
    };

    let timestamp = obj
        .get("timestamp")
        .and_then(Value::as_str)
        .map(str::to_owned);

    Ok(SentimentRecord {
        category,
        author,
        sentiment,
        timestamp,
    })
}

/// Numbers pass through, numeric strings parse. Everything else,
/// including an explicit null, is a rejection.
fn coerce_sentiment(value: &Value) -> Result<f64, NormalizeError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| NormalizeError::BadSentiment(value.to_string())),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| NormalizeError::BadSentiment(value.to_string())),
        _ => Err(NormalizeError::BadSentiment(value.to_string())),
    }
}

//! Consumer error types.

use thiserror::Error;

use crate::record::NormalizeError;
use crate::store::StoreError;

/// Result type for consumer operations.
pub type ConsumerResult<T> = Result<T, ConsumerError>;

/// Consumer error types.
///
/// `Config` and `Connection` only occur at construction time and are
/// fatal; everything else is a per-message failure that the consume
/// loop recovers from by dropping the message.
#[derive(Error, Debug)]
pub enum ConsumerError {
    /// Configuration errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Consumer creation or subscription errors.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Message carried no payload.
    #[error("empty message payload")]
    EmptyPayload,

    /// Payload was not valid UTF-8 JSON.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Message failed normalization and was dropped.
    #[error("rejected: {0}")]
    Rejected(#[from] NormalizeError),

    /// Store append failed; the message is dropped, not retried.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

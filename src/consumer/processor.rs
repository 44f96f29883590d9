//! Message processor trait.
//!
//! The seam between the Kafka transport and the pipeline: the consume
//! loop hands each detached message to a processor, so the pipeline
//! can be driven in tests without a broker.

use std::fmt::Debug;

use async_trait::async_trait;
use rdkafka::message::OwnedMessage;

/// Trait for processing messages one at a time.
///
/// `process` takes `&mut self` deliberately: the pipeline is
/// single-consumer, one message is fully handled before the next is
/// read, and the processor owns its storage handle without locking.
#[async_trait]
pub trait MessageProcessor: Send + 'static {
    /// Error type for processing.
    type Error: std::error::Error + Send + Sync + Debug;

    /// Process a single message to completion.
    async fn process(&mut self, message: &OwnedMessage) -> Result<(), Self::Error>;

    /// Called when a message is successfully processed.
    async fn on_success(&mut self, _message: &OwnedMessage) {}

    /// Called when message processing fails.
    async fn on_failure(&mut self, error: &Self::Error, message: &OwnedMessage);

    /// Get processor name for logs.
    fn name(&self) -> &str {
        "MessageProcessor"
    }
}

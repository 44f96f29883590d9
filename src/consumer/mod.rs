//! Kafka consumer for the sentiment pipeline.
//!
//! The transport loop and the pipeline are split at the
//! [`MessageProcessor`] seam: [`SentimentConsumer`] owns the broker
//! client and delivers one detached message at a time, and
//! [`SentimentProcessor`] decodes, normalizes and persists it. The
//! loop is strictly sequential, so a message is fully committed before
//! the next one is read.
//!
//! # Example
//!
//! ```no_run
//! use sentiment_sink::consumer::{create_sentiment_consumer, ConsumerConfig};
//! use sentiment_sink::store::SentimentStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SentimentStore::open("sentiment.sqlite")?;
//!
//! let config = ConsumerConfig::builder()
//!     .brokers("localhost:9092".to_string())
//!     .group_id("sentiment-sink".to_string())
//!     .topic("sentiment-events".to_string())
//!     .build();
//!
//! let consumer = create_sentiment_consumer(store, config)?;
//! consumer.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod consumer;
pub mod error;
pub mod processor;

pub use config::{ConsumerConfig, ConsumerConfigBuilder};
pub use consumer::SentimentConsumer;
pub use error::{ConsumerError, ConsumerResult};
pub use processor::MessageProcessor;

use rdkafka::message::OwnedMessage;
use rdkafka::Message;
use tracing::{debug, error, info, warn};

use crate::record::normalize;
use crate::store::SentimentStore;

/// Create a consumer wired to the full normalize-and-persist pipeline.
pub fn create_sentiment_consumer(
    store: SentimentStore,
    config: ConsumerConfig,
) -> ConsumerResult<SentimentConsumer<SentimentProcessor>> {
    info!(topic = %config.topic, "creating sentiment consumer");
    let processor = SentimentProcessor::new(store);
    SentimentConsumer::new(config, processor)
}

/// Pipeline processor: decode the payload as JSON, normalize it into a
/// canonical record, append it to the store.
pub struct SentimentProcessor {
    store: SentimentStore,
}

impl SentimentProcessor {
    /// Wrap a store in the pipeline processor.
    pub fn new(store: SentimentStore) -> Self {
        Self { store }
    }

    /// Hand the store back, consuming the processor. Lets tests inspect
    /// persisted state after driving the pipeline.
    pub fn into_store(self) -> SentimentStore {
        self.store
    }
}

#[async_trait::async_trait]
impl MessageProcessor for SentimentProcessor {
    type Error = ConsumerError;

    async fn process(&mut self, message: &OwnedMessage) -> Result<(), Self::Error> {
        let payload = message.payload().ok_or(ConsumerError::EmptyPayload)?;

        let json: serde_json::Value = serde_json::from_slice(payload)
            .map_err(|e| ConsumerError::Parse(format!("JSON parse error: {}", e)))?;

        let record = normalize(&json)?;

        debug!(
            category = %record.category,
            author = %record.author,
            sentiment = record.sentiment,
            "normalized message",
        );

        self.store.append(&record)?;
        Ok(())
    }

    async fn on_success(&mut self, _message: &OwnedMessage) {
        debug!("message persisted");
    }

    async fn on_failure(&mut self, error: &Self::Error, message: &OwnedMessage) {
        match error {
            ConsumerError::Store(_) => error!(
                topic = message.topic(),
                partition = message.partition(),
                offset = message.offset(),
                %error,
                "failed to persist message",
            ),
            _ => warn!(
                topic = message.topic(),
                partition = message.partition(),
                offset = message.offset(),
                %error,
                "message dropped",
            ),
        }
    }

    fn name(&self) -> &str {
        "SentimentProcessor"
    }
}

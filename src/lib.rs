//! Kafka sentiment-event consumer with rolling SQLite aggregates.
//!
//! This library consumes JSON-encoded sentiment events from a Kafka
//! topic, normalizes each one into a four-field canonical record, and
//! persists it to a local SQLite database while keeping two derived
//! summary tables (average sentiment per category and per author)
//! transactionally in step with the append-only message log.
//!
//! # Example
//!
//! ```no_run
//! use sentiment_sink::consumer::{create_sentiment_consumer, ConsumerConfig};
//! use sentiment_sink::SentimentStore;
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

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]

// Re-export commonly used items
pub use config::{AppConfig, ConfigError};
pub use record::{normalize, NormalizeError, SentimentRecord};
pub use store::{SentimentStore, StoreError, StoredMessage};

/// Application configuration from the environment
pub mod config;

/// Canonical records and message normalization
pub mod record;

/// SQLite-backed aggregate store
pub mod store;

/// Kafka consumer and pipeline processor
pub mod consumer;

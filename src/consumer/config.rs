//! Consumer configuration structures.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Kafka consumer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumerConfig {
    /// Kafka broker addresses (comma-separated).
    pub brokers: String,

    /// Consumer group ID.
    pub group_id: String,

    /// Topic to consume from.
    pub topic: String,

    /// Session timeout in milliseconds.
    pub session_timeout_ms: u32,

    /// Maximum poll interval in milliseconds.
    pub max_poll_interval_ms: u32,

    /// Enable auto-commit. Offset management stays with the client, so
    /// this defaults to on.
    pub enable_auto_commit: bool,

    /// Offset reset policy (earliest, latest, none).
    pub auto_offset_reset: String,

    /// Pause between polls after a transport error.
    pub poll_interval: Duration,

    /// Additional Kafka properties.
    pub kafka_properties: HashMap<String, String>,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            brokers: "localhost:9092".to_string(),
            group_id: "sentiment-sink".to_string(),
            topic: "sentiment-events".to_string(),
            session_timeout_ms: 30000,
            max_poll_interval_ms: 300000,
            enable_auto_commit: true,
            auto_offset_reset: "earliest".to_string(),
            poll_interval: Duration::from_secs(1),
            kafka_properties: HashMap::new(),
        }
    }
}

/// Builder for [`ConsumerConfig`].
pub struct ConsumerConfigBuilder {
    config: ConsumerConfig,
}

impl ConsumerConfigBuilder {
    /// Create a new consumer config builder.
    pub fn new() -> Self {
        Self {
            config: ConsumerConfig::default(),
        }
    }

    /// Set the broker addresses.
    pub fn brokers(mut self, brokers: String) -> Self {
        self.config.brokers = brokers;
        self
    }

    /// Set the consumer group ID.
    pub fn group_id(mut self, group_id: String) -> Self {
        self.config.group_id = group_id;
        self
    }

    /// Set the topic to consume.
    pub fn topic(mut self, topic: String) -> Self {
        self.config.topic = topic;
        self
    }

    /// Set the session timeout.
    pub fn session_timeout_ms(mut self, timeout: u32) -> Self {
        self.config.session_timeout_ms = timeout;
        self
    }

    /// Enable or disable auto-commit.
    pub fn enable_auto_commit(mut self, enable: bool) -> Self {
        self.config.enable_auto_commit = enable;
        self
    }

    /// Set the offset reset policy.
    pub fn auto_offset_reset(mut self, policy: String) -> Self {
        self.config.auto_offset_reset = policy;
        self
    }

    /// Set the pause between polls after a transport error.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    /// Add a custom Kafka property.
    pub fn kafka_property(mut self, key: String, value: String) -> Self {
        self.config.kafka_properties.insert(key, value);
        self
    }

    /// Build the consumer configuration.
    pub fn build(self) -> ConsumerConfig {
        self.config
    }
}

impl Default for ConsumerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsumerConfig {
    /// Create a new consumer config builder.
    pub fn builder() -> ConsumerConfigBuilder {
        ConsumerConfigBuilder::new()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.brokers.is_empty() {
            return Err("Brokers cannot be empty".to_string());
        }

        if self.group_id.is_empty() {
            return Err("Group ID cannot be empty".to_string());
        }

        if self.topic.is_empty() {
            return Err("Topic cannot be empty".to_string());
        }

        if self.session_timeout_ms == 0 {
            return Err("Session timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = ConsumerConfig::builder()
            .brokers("kafka:9092".to_string())
            .group_id("group-a".to_string())
            .topic("events".to_string())
            .session_timeout_ms(10000)
            .enable_auto_commit(false)
            .build();

        assert_eq!(config.brokers, "kafka:9092");
        assert_eq!(config.group_id, "group-a");
        assert_eq!(config.topic, "events");
        assert_eq!(config.session_timeout_ms, 10000);
        assert!(!config.enable_auto_commit);
        // Untouched fields keep their defaults
        assert_eq!(config.auto_offset_reset, "earliest");
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let config = ConsumerConfig::builder().brokers(String::new()).build();
        assert!(config.validate().is_err());

        let config = ConsumerConfig::builder().group_id(String::new()).build();
        assert!(config.validate().is_err());

        let config = ConsumerConfig::builder().topic(String::new()).build();
        assert!(config.validate().is_err());

        assert!(ConsumerConfig::default().validate().is_ok());
    }
}

//! Application configuration read from the environment.
//!
//! Every knob has a default so the consumer starts against a local
//! broker with no setup. A value that is set but malformed is a fatal
//! startup error, not a silent fallback.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Configuration errors, fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment value was set but could not be parsed.
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        /// Environment variable name.
        key: &'static str,
        /// The offending value.
        value: String,
        /// Parse failure detail.
        reason: String,
    },
}

/// Process-level configuration for the sentiment consumer.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Topic to consume sentiment events from.
    pub topic: String,

    /// Kafka broker addresses (comma-separated).
    pub brokers: String,

    /// Consumer group identifier.
    pub group_id: String,

    /// Pause between polls after a transport error.
    pub poll_interval: Duration,

    /// SQLite database file location.
    pub db_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            topic: "sentiment-events".to_string(),
            brokers: "localhost:9092".to_string(),
            group_id: "sentiment-sink".to_string(),
            poll_interval: Duration::from_secs(1),
            db_path: PathBuf::from("sentiment.sqlite"),
        }
    }
}

impl AppConfig {
    /// Read configuration from the environment, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(topic) = env::var("KAFKA_TOPIC") {
            config.topic = topic;
        }
        if let Ok(brokers) = env::var("KAFKA_BROKER_ADDRESS") {
            config.brokers = brokers;
        }
        if let Ok(group_id) = env::var("KAFKA_CONSUMER_GROUP_ID") {
            config.group_id = group_id;
        }
        if let Ok(secs) = env::var("MESSAGE_INTERVAL_SECONDS") {
            let parsed = secs.parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: "MESSAGE_INTERVAL_SECONDS",
                value: secs.clone(),
                reason: e.to_string(),
            })?;
            config.poll_interval = Duration::from_secs(parsed);
        }
        if let Ok(path) = env::var("SQLITE_PATH") {
            config.db_path = PathBuf::from(path);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.topic, "sentiment-events");
        assert_eq!(config.brokers, "localhost:9092");
        assert_eq!(config.group_id, "sentiment-sink");
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.db_path, PathBuf::from("sentiment.sqlite"));
    }
}

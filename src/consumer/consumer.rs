//! Kafka consumer driving the synchronous pipeline.

use futures::StreamExt;
use rdkafka::{
    consumer::{Consumer, StreamConsumer},
    ClientConfig,
};
use tracing::{error, info, warn};

use crate::consumer::{
    config::ConsumerConfig,
    error::{ConsumerError, ConsumerResult},
    processor::MessageProcessor,
};

/// Kafka consumer that feeds messages one at a time through a
/// processor.
///
/// One message is fully processed before the next is read; ordering is
/// whatever the underlying client delivers. Per-message failures are
/// reported to the processor and never stop consumption.
pub struct SentimentConsumer<P: MessageProcessor> {
    config: ConsumerConfig,
    processor: P,
    consumer: StreamConsumer,
}

impl<P: MessageProcessor> SentimentConsumer<P> {
    /// Create the consumer and subscribe to the configured topic.
    pub fn new(config: ConsumerConfig, processor: P) -> ConsumerResult<Self> {
        config.validate().map_err(ConsumerError::Config)?;

        let mut client_config = ClientConfig::new();
        client_config
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", &config.group_id)
            .set("enable.auto.commit", config.enable_auto_commit.to_string())
            .set("session.timeout.ms", config.session_timeout_ms.to_string())
            .set(
                "max.poll.interval.ms",
                config.max_poll_interval_ms.to_string(),
            )
            .set("auto.offset.reset", &config.auto_offset_reset);

        for (key, value) in &config.kafka_properties {
            client_config.set(key, value);
        }

        let consumer: StreamConsumer = client_config.create().map_err(|e| {
            ConsumerError::Connection(format!("Failed to create consumer: {}", e))
        })?;

        consumer
            .subscribe(&[config.topic.as_str()])
            .map_err(|e| ConsumerError::Connection(format!("Failed to subscribe: {}", e)))?;

        info!(topic = %config.topic, group = %config.group_id, "subscribed");

        Ok(Self {
            config,
            processor,
            consumer,
        })
    }

    /// Run the consume loop until interrupted.
    ///
    /// A message in flight when the interrupt arrives is finished, and
    /// its append committed, before the loop exits.
    pub async fn run(self) -> ConsumerResult<()> {
        let Self {
            config,
            mut processor,
            consumer,
        } = self;

        info!(processor = processor.name(), "starting consume loop");

        let mut processed: u64 = 0;
        let mut failed: u64 = 0;
        let mut stream = consumer.stream();

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    warn!("interrupt received, shutting down");
                    break;
                }
                message = stream.next() => {
                    match message {
                        Some(Ok(message)) => {
                            let message = message.detach();
                            match processor.process(&message).await {
                                Ok(()) => {
                                    processed += 1;
                                    processor.on_success(&message).await;
                                }
                                Err(e) => {
                                    failed += 1;
                                    processor.on_failure(&e, &message).await;
                                }
                            }
                        }
                        Some(Err(e)) => {
                            error!("Kafka error: {}", e);
                            tokio::time::sleep(config.poll_interval).await;
                        }
                        None => {
                            warn!("message stream ended");
                            break;
                        }
                    }
                }
            }
        }

        info!(processed, failed, "consumer shut down");
        Ok(())
    }
}

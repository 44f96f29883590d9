use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use sentiment_sink::config::AppConfig;
use sentiment_sink::consumer::{create_sentiment_consumer, ConsumerConfig};
use sentiment_sink::store::SentimentStore;

/// Exit codes, one per startup failure class.
const EXIT_CONFIG: i32 = 1;
const EXIT_STORE_INIT: i32 = 3;
const EXIT_CONSUMER_CREATE: i32 = 11;

#[derive(Parser)]
#[command(name = "sentiment-sink")]
#[command(about = "Consume sentiment events from Kafka into a SQLite aggregate store", long_about = None)]
struct Cli {
    /// Kafka broker addresses (overrides KAFKA_BROKER_ADDRESS)
    #[arg(long)]
    brokers: Option<String>,

    /// Topic to consume from (overrides KAFKA_TOPIC)
    #[arg(long)]
    topic: Option<String>,

    /// Consumer group id (overrides KAFKA_CONSUMER_GROUP_ID)
    #[arg(long)]
    group_id: Option<String>,

    /// SQLite database path (overrides SQLITE_PATH)
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup logging
    if cli.debug {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let mut config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to read configuration: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Some(brokers) = cli.brokers {
        config.brokers = brokers;
    }
    if let Some(topic) = cli.topic {
        config.topic = topic;
    }
    if let Some(group_id) = cli.group_id {
        config.group_id = group_id;
    }
    if let Some(db_path) = cli.db_path {
        config.db_path = db_path;
    }

    info!(
        topic = %config.topic,
        brokers = %config.brokers,
        db = %config.db_path.display(),
        "starting sentiment sink",
    );

    let store = match SentimentStore::open(&config.db_path) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to initialize store: {}", e);
            std::process::exit(EXIT_STORE_INIT);
        }
    };

    let consumer_config = ConsumerConfig::builder()
        .brokers(config.brokers)
        .group_id(config.group_id)
        .topic(config.topic)
        .poll_interval(config.poll_interval)
        .build();

    let consumer = match create_sentiment_consumer(store, consumer_config) {
        Ok(consumer) => consumer,
        Err(e) => {
            error!("Could not create consumer: {}", e);
            std::process::exit(EXIT_CONSUMER_CREATE);
        }
    };

    if let Err(e) = consumer.run().await {
        error!("Consumer terminated: {}", e);
    }

    info!("sentiment sink shut down");
}

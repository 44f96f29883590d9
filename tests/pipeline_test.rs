//! Pipeline tests driving the processor without a broker.

use pretty_assertions::assert_eq;
use rdkafka::message::OwnedMessage;
use rdkafka::Timestamp;
use tempfile::TempDir;

use sentiment_sink::consumer::{ConsumerError, MessageProcessor, SentimentProcessor};
use sentiment_sink::SentimentStore;

fn message(payload: &str) -> OwnedMessage {
    OwnedMessage::new(
        Some(payload.as_bytes().to_vec()),
        None,
        "sentiment-events".to_string(),
        Timestamp::NotAvailable,
        0,
        0,
        None,
    )
}

fn processor(dir: &TempDir) -> SentimentProcessor {
    let store = SentimentStore::open(dir.path().join("sentiment.sqlite")).unwrap();
    SentimentProcessor::new(store)
}

#[tokio::test]
async fn test_good_message_is_persisted() {
    let dir = TempDir::new().unwrap();
    let mut processor = processor(&dir);

    let msg = message(
        r#"{"category":"tech","author":"alice","sentiment":0.8,"timestamp":"2025-01-15T10:00:00Z"}"#,
    );
    processor.process(&msg).await.unwrap();

    let store = processor.into_store();
    assert_eq!(store.message_count().unwrap(), 1);

    let avg = store.author_average("alice").unwrap().unwrap();
    assert!((avg - 0.8).abs() < 1e-9);
}

#[tokio::test]
async fn test_message_with_missing_fields_gets_defaults() {
    let dir = TempDir::new().unwrap();
    let mut processor = processor(&dir);

    processor.process(&message(r#"{"sentiment":1}"#)).await.unwrap();

    let store = processor.into_store();
    let messages = store.messages(1).unwrap();
    assert_eq!(messages[0].category, "unknown");
    assert_eq!(messages[0].author, "anonymous");
    assert_eq!(messages[0].sentiment, 1.0);
    assert_eq!(messages[0].timestamp, None);
}

#[tokio::test]
async fn test_unparseable_sentiment_is_rejected_without_append() {
    let dir = TempDir::new().unwrap();
    let mut processor = processor(&dir);

    let err = processor
        .process(&message(r#"{"category":"tech","sentiment":"abc"}"#))
        .await
        .unwrap_err();
    assert!(matches!(err, ConsumerError::Rejected(_)));

    let store = processor.into_store();
    assert_eq!(store.message_count().unwrap(), 0);
    assert_eq!(store.category_average("tech").unwrap(), None);
}

#[tokio::test]
async fn test_non_json_payload_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut processor = processor(&dir);

    let err = processor.process(&message("not json at all")).await.unwrap_err();
    assert!(matches!(err, ConsumerError::Parse(_)));

    assert_eq!(processor.into_store().message_count().unwrap(), 0);
}

#[tokio::test]
async fn test_non_object_json_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut processor = processor(&dir);

    let err = processor.process(&message("[1, 2, 3]")).await.unwrap_err();
    assert!(matches!(err, ConsumerError::Rejected(_)));

    assert_eq!(processor.into_store().message_count().unwrap(), 0);
}

#[tokio::test]
async fn test_empty_payload_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut processor = processor(&dir);

    let msg = OwnedMessage::new(
        None,
        None,
        "sentiment-events".to_string(),
        Timestamp::NotAvailable,
        0,
        0,
        None,
    );

    let err = processor.process(&msg).await.unwrap_err();
    assert!(matches!(err, ConsumerError::EmptyPayload));
}

#[tokio::test]
async fn test_rejection_does_not_poison_later_messages() {
    let dir = TempDir::new().unwrap();
    let mut processor = processor(&dir);

    processor
        .process(&message(r#"{"category":"tech","author":"alice","sentiment":0.8}"#))
        .await
        .unwrap();
    processor
        .process(&message(r#"{"sentiment":"abc"}"#))
        .await
        .unwrap_err();
    processor
        .process(&message(r#"{"category":"tech","author":"bob","sentiment":0.4}"#))
        .await
        .unwrap();

    let store = processor.into_store();
    assert_eq!(store.message_count().unwrap(), 2);

    let avg = store.category_average("tech").unwrap().unwrap();
    assert!((avg - 0.6).abs() < 1e-9);
}

#[tokio::test]
async fn test_store_failure_surfaces_as_store_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sentiment.sqlite");
    let store = SentimentStore::open(&path).unwrap();
    let mut processor = SentimentProcessor::new(store);

    let raw = rusqlite::Connection::open(&path).unwrap();
    raw.execute("DROP TABLE category_sentiment", []).unwrap();
    drop(raw);

    let err = processor
        .process(&message(r#"{"category":"tech","sentiment":0.8}"#))
        .await
        .unwrap_err();
    assert!(matches!(err, ConsumerError::Store(_)));

    // Nothing from the failed call is visible
    assert_eq!(processor.into_store().message_count().unwrap(), 0);
}

use crate::error::{Error, Result};
use crate::record::{KeyFormat, RawRecord, RecordDecoder, RecordError};
use avro_types::Message;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer as RdkafkaConsumer, StreamConsumer as RdkafkaStreamConsumer};
use rdkafka::message::{BorrowedMessage as RdkafkaBorrowedMessage, Message as RdkafkaMessage};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::warn;

/// Wait for further records once a poll has received its first one.
const DRAIN_TIMEOUT: Duration = Duration::from_millis(10);

/// Configuration for Kafka consumer
#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    /// Kafka brokers (comma-separated list)
    pub brokers: String,
    /// Consumer group ID
    pub group_id: String,
    /// Topic to consume from
    ///
    /// Values must be registry-framed Avro; each record carries the id of the
    /// schema it was written with, so one topic may mix schema versions.
    pub topic: String,
    /// Auto offset reset strategy ("earliest" or "latest")
    ///
    /// Only used when the consumer group has no committed offsets yet.
    pub auto_offset_reset: String,
    /// Session timeout in milliseconds
    pub session_timeout_ms: String,
    /// Enable auto commit
    ///
    /// Offsets are left to the client library; nothing here commits manually.
    pub enable_auto_commit: bool,
    /// How record keys are decoded
    pub key_format: KeyFormat,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            brokers: "localhost:9092".to_string(),
            group_id: "registry-peek".to_string(),
            topic: "".to_string(),
            auto_offset_reset: "earliest".to_string(),
            session_timeout_ms: "6000".to_string(),
            enable_auto_commit: true,
            key_format: KeyFormat::String,
        }
    }
}

/// Result of decoding one received record.
pub type Received = std::result::Result<Message, RecordError>;

/// Kafka consumer that decodes registry-framed Avro records
pub struct Consumer {
    consumer: Arc<RdkafkaStreamConsumer>,
    decoder: RecordDecoder,
    config: ConsumerConfig,
}

impl Consumer {
    /// Create a new Kafka consumer subscribed to the configured topic
    pub fn new(config: ConsumerConfig, decoder: RecordDecoder) -> Result<Self> {
        if config.topic.is_empty() {
            return Err(Error::InvalidConfig("topic must not be empty".to_string()));
        }

        let consumer: RdkafkaStreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", &config.group_id)
            .set("enable.auto.commit", config.enable_auto_commit.to_string())
            .set("auto.offset.reset", &config.auto_offset_reset)
            .set("session.timeout.ms", &config.session_timeout_ms)
            .set("enable.partition.eof", "false")
            .create()
            .map_err(|e| Error::Consumer(format!("Failed to create consumer: {e}")))?;

        consumer
            .subscribe(&[&config.topic])
            .map_err(|e| Error::Consumer(format!("Failed to subscribe to topic: {e}")))?;

        Ok(Self {
            consumer: Arc::new(consumer),
            decoder,
            config,
        })
    }

    /// Poll for records.
    ///
    /// Waits up to `timeout` for the first record, then keeps collecting
    /// whatever arrives promptly, up to `max_records`. Returns an empty batch
    /// when nothing arrived in time. A record that fails to decode is returned
    /// as an error in its slot. A broker error fails the poll only when no
    /// record was received before it; otherwise it is logged and the records
    /// already received are returned.
    pub async fn poll(&self, timeout: Duration, max_records: usize) -> Result<Vec<Received>> {
        let consumer = &self.consumer;
        let next = move || async move {
            let msg = consumer.recv().await?;
            Ok(raw_record(&msg))
        };

        let (raws, error) = collect_batch(next, timeout, max_records).await;
        match error {
            Some(e) if raws.is_empty() => return Err(e),
            Some(e) => warn!(
                "Broker error after {} records, returning them before retrying: {e}",
                raws.len()
            ),
            None => {}
        }

        let mut records = Vec::with_capacity(raws.len());
        for raw in raws {
            records.push(self.decoder.decode_record(raw, self.config.key_format).await);
        }
        Ok(records)
    }

    pub fn config(&self) -> &ConsumerConfig {
        &self.config
    }
}

/// Collect raw records from `next` until the batch is full, nothing arrives in
/// time, or `next` fails. The failure, if any, is returned next to the records
/// collected before it.
async fn collect_batch<F, Fut>(
    mut next: F,
    timeout: Duration,
    max_records: usize,
) -> (Vec<RawRecord>, Option<Error>)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<RawRecord>>,
{
    let deadline = Instant::now() + timeout;
    let mut raws = Vec::new();

    while raws.len() < max_records {
        let wait = if raws.is_empty() {
            deadline.saturating_duration_since(Instant::now())
        } else {
            DRAIN_TIMEOUT
        };

        match tokio::time::timeout(wait, next()).await {
            Ok(Ok(raw)) => raws.push(raw),
            Ok(Err(e)) => return (raws, Some(e)),
            Err(_) => break, // Timeout, no more messages available right now
        }
    }

    (raws, None)
}

/// Copy what decoding needs out of the borrowed message.
fn raw_record(msg: &RdkafkaBorrowedMessage) -> RawRecord {
    RawRecord {
        topic: msg.topic().to_string(),
        partition: msg.partition(),
        offset: msg.offset(),
        timestamp: msg.timestamp().to_millis(),
        key: msg.key().map(|k| k.to_vec()),
        payload: msg.payload().map(|p| p.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdkafka::error::{KafkaError, RDKafkaErrorCode};
    use std::collections::VecDeque;

    fn raw(offset: i64) -> RawRecord {
        RawRecord {
            topic: "TEST1".to_string(),
            partition: 0,
            offset,
            timestamp: None,
            key: None,
            payload: None,
        }
    }

    fn broker_error() -> Error {
        Error::Kafka(KafkaError::MessageConsumption(
            RDKafkaErrorCode::BrokerTransportFailure,
        ))
    }

    /// Yields the scripted results in order, then never resolves.
    fn scripted(
        results: Vec<Result<RawRecord>>,
    ) -> impl FnMut() -> std::pin::Pin<Box<dyn Future<Output = Result<RawRecord>> + Send>> {
        let mut results = VecDeque::from(results);
        move || {
            let next = results.pop_front();
            Box::pin(async move {
                match next {
                    Some(result) => result,
                    None => std::future::pending().await,
                }
            })
        }
    }

    #[tokio::test]
    async fn test_broker_error_keeps_records_already_received() {
        let next = scripted(vec![Ok(raw(1)), Ok(raw(2)), Err(broker_error()), Ok(raw(3))]);

        let (raws, error) = collect_batch(next, Duration::from_millis(200), 10).await;

        let offsets: Vec<i64> = raws.iter().map(|r| r.offset).collect();
        assert_eq!(offsets, vec![1, 2]);
        assert!(matches!(error, Some(Error::Kafka(_))));
    }

    #[tokio::test]
    async fn test_broker_error_before_any_record() {
        let next = scripted(vec![Err(broker_error())]);

        let (raws, error) = collect_batch(next, Duration::from_millis(200), 10).await;

        assert!(raws.is_empty());
        assert!(error.is_some());
    }

    #[tokio::test]
    async fn test_batch_stops_at_max_records_or_when_idle() {
        let next = scripted((1..=5).map(|o| Ok(raw(o))).collect());
        let (raws, error) = collect_batch(next, Duration::from_millis(200), 3).await;
        assert_eq!(raws.len(), 3);
        assert!(error.is_none());

        let next = scripted(vec![Ok(raw(1))]);
        let (raws, error) = collect_batch(next, Duration::from_millis(50), 10).await;
        assert_eq!(raws.len(), 1);
        assert!(error.is_none());

        let next = scripted(Vec::new());
        let (raws, error) = collect_batch(next, Duration::from_millis(20), 10).await;
        assert!(raws.is_empty());
        assert!(error.is_none());
    }
}

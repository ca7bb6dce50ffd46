//! Broker configuration for consumers and producers.

use rdkafka::config::ClientConfig;
use serde::Deserialize;

/// Configuration for one stream consumer.
///
/// Offsets are committed manually (`enable.auto.commit` stays off) so the
/// pipeline can implement its own checkpoint discipline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsumerConfig {
    /// Kafka bootstrap servers, comma separated.
    pub brokers: String,
    /// Consumer group identifier; one group per logical component.
    pub group_id: String,
    /// Topic to subscribe to.
    pub topic: String,
    /// Wait budget for one bounded poll, in milliseconds.
    pub poll_wait_ms: u64,
    /// Issue an asynchronous offset checkpoint every N processed records.
    pub commit_every: u64,
    /// Upper bound on records drained per poll window.
    pub max_batch: usize,
    /// Where to start when the group has no committed offset.
    pub auto_offset_reset: String,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            brokers: "localhost:9092".to_string(),
            group_id: "hubflow".to_string(),
            topic: String::new(),
            poll_wait_ms: 1000,
            commit_every: 10,
            max_batch: 500,
            auto_offset_reset: "earliest".to_string(),
        }
    }
}

impl ConsumerConfig {
    /// Render the rdkafka client configuration.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", &self.brokers)
            .set("group.id", &self.group_id)
            .set("enable.auto.commit", "false")
            .set("auto.offset.reset", &self.auto_offset_reset)
            .set("session.timeout.ms", "30000")
            .set("heartbeat.interval.ms", "3000")
            .set("enable.partition.eof", "false");
        config
    }
}

/// Configuration for one outbound topic producer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProducerConfig {
    /// Kafka bootstrap servers, comma separated.
    pub brokers: String,
    /// Topic the producer publishes to.
    pub topic: String,
    /// Upper bound on how long one send may stay queued, in milliseconds.
    pub send_timeout_ms: u64,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            brokers: "localhost:9092".to_string(),
            topic: String::new(),
            send_timeout_ms: 5000,
        }
    }
}

impl ProducerConfig {
    /// Render the rdkafka client configuration.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", &self.brokers)
            .set("enable.idempotence", "true")
            .set("acks", "all")
            .set("linger.ms", "5");
        config
    }
}

//! Outbound publishers: JSON records keyed by hub id.

use std::future::Future;
use std::time::Duration;

use hubflow_app::ports::{ActionSink, SnapshotSink};
use hubflow_domain::error::HubFlowError;
use hubflow_domain::scenario::ActionCommand;
use hubflow_domain::snapshot::Snapshot;
use rdkafka::producer::{FutureProducer, FutureRecord};
use serde::Serialize;
use tracing::debug;

use crate::config::ProducerConfig;
use crate::error::PipelineError;

/// A producer bound to one topic, publishing serde-serialized records.
pub struct KafkaSink {
    producer: FutureProducer,
    topic: String,
    send_timeout: Duration,
}

impl KafkaSink {
    /// Create the underlying producer.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Kafka`] when the producer cannot be
    /// created.
    pub fn new(config: &ProducerConfig) -> Result<Self, PipelineError> {
        let producer: FutureProducer = config
            .client_config()
            .create()
            .map_err(PipelineError::Kafka)?;
        Ok(Self {
            producer,
            topic: config.topic.clone(),
            send_timeout: Duration::from_millis(config.send_timeout_ms),
        })
    }

    /// Publish one record keyed by `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Malformed`] when the record cannot be
    /// serialized, or [`PipelineError::Kafka`] when delivery fails within
    /// the send timeout.
    pub async fn send_json<T: Serialize>(&self, key: &str, record: &T) -> Result<(), PipelineError> {
        let payload = serde_json::to_vec(record).map_err(PipelineError::Malformed)?;
        self.producer
            .send(
                FutureRecord::to(&self.topic).key(key).payload(&payload),
                self.send_timeout,
            )
            .await
            .map_err(|(err, _)| PipelineError::Kafka(err))?;
        debug!(topic = %self.topic, key, "record published");
        Ok(())
    }
}

/// Publishes accepted snapshots to the snapshot stream.
pub struct SnapshotPublisher {
    sink: KafkaSink,
}

impl SnapshotPublisher {
    /// # Errors
    ///
    /// Returns [`PipelineError::Kafka`] when the producer cannot be
    /// created.
    pub fn new(config: &ProducerConfig) -> Result<Self, PipelineError> {
        Ok(Self {
            sink: KafkaSink::new(config)?,
        })
    }
}

impl SnapshotSink for SnapshotPublisher {
    fn publish(&self, snapshot: Snapshot) -> impl Future<Output = Result<(), HubFlowError>> + Send {
        async move {
            self.sink
                .send_json(&snapshot.hub_id, &snapshot)
                .await
                .map_err(PipelineError::into_domain)
        }
    }
}

/// Publishes triggered device-action commands to the action stream.
pub struct ActionPublisher {
    sink: KafkaSink,
}

impl ActionPublisher {
    /// # Errors
    ///
    /// Returns [`PipelineError::Kafka`] when the producer cannot be
    /// created.
    pub fn new(config: &ProducerConfig) -> Result<Self, PipelineError> {
        Ok(Self {
            sink: KafkaSink::new(config)?,
        })
    }
}

impl ActionSink for ActionPublisher {
    fn publish(
        &self,
        command: ActionCommand,
    ) -> impl Future<Output = Result<(), HubFlowError>> + Send {
        async move {
            self.sink
                .send_json(&command.hub_id, &command)
                .await
                .map_err(PipelineError::into_domain)
        }
    }
}

//! Consumer offset pipeline: the polling and commit discipline shared by
//! every stream worker.
//!
//! Each worker owns one consumer bound to one topic and one consumer
//! group. Records are processed strictly in delivery order, one at a time;
//! the only suspension point is the bounded poll. Offsets are committed
//! manually: an asynchronous checkpoint every N records, a best-effort
//! asynchronous commit after each batch, and one final synchronous commit
//! when the worker stops.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use rdkafka::Offset;
use rdkafka::TopicPartitionList;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::error::KafkaError;
use rdkafka::message::{Message, OwnedMessage};
use tokio::sync::watch;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, error, info, warn};

use crate::config::ConsumerConfig;
use crate::error::PipelineError;

/// Decode a record payload into an event type.
///
/// # Errors
///
/// Returns [`PipelineError::Malformed`] when the payload does not match the
/// expected schema; the caller's worker treats this as fatal.
pub fn decode<T: serde::de::DeserializeOwned>(payload: &[u8]) -> Result<T, PipelineError> {
    serde_json::from_slice(payload).map_err(PipelineError::Malformed)
}

/// Processes one record payload from the worker's stream.
///
/// A handler owns whatever state its stream maintains (the aggregator, the
/// registry, the engine); the pipeline guarantees it is never invoked
/// concurrently.
pub trait RecordHandler {
    fn handle(&mut self, payload: &[u8]) -> impl Future<Output = Result<(), PipelineError>> + Send;
}

/// Tracks the candidate next-offset per topic partition, exactly like the
/// offset map a manual-commit consumer keeps between checkpoints.
#[derive(Debug, Default)]
pub struct OffsetTracker {
    next_offsets: HashMap<(String, i32), i64>,
    processed: u64,
}

impl OffsetTracker {
    /// Record one processed record: the candidate next-offset for its
    /// partition becomes `offset + 1`.
    pub fn track(&mut self, topic: &str, partition: i32, offset: i64) {
        self.next_offsets.insert((topic.to_string(), partition), offset + 1);
        self.processed += 1;
    }

    /// Number of records processed since the worker started.
    #[must_use]
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Whether any offset has been tracked yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.next_offsets.is_empty()
    }

    /// Render the tracked offsets as a commit list.
    ///
    /// # Errors
    ///
    /// Returns the underlying client error if the list cannot be built.
    pub fn commit_list(&self) -> Result<TopicPartitionList, KafkaError> {
        let mut list = TopicPartitionList::with_capacity(self.next_offsets.len());
        for ((topic, partition), next) in &self.next_offsets {
            list.add_partition_offset(topic, *partition, Offset::Offset(*next))?;
        }
        Ok(list)
    }
}

/// One stream worker: a consumer, its handler, and the offset discipline.
pub struct ConsumerPipeline<H> {
    consumer: StreamConsumer,
    handler: H,
    topic: String,
    poll_wait: Duration,
    commit_every: u64,
    max_batch: usize,
    tracker: OffsetTracker,
    shutdown: watch::Receiver<bool>,
}

impl<H: RecordHandler> ConsumerPipeline<H> {
    /// Create the consumer, subscribe to the configured topic, and bind the
    /// handler and shutdown signal.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Kafka`] when the consumer cannot be created
    /// or the subscription fails.
    pub fn new(
        config: &ConsumerConfig,
        handler: H,
        shutdown: watch::Receiver<bool>,
    ) -> Result<Self, PipelineError> {
        let consumer: StreamConsumer = config
            .client_config()
            .create()
            .map_err(PipelineError::Kafka)?;
        consumer
            .subscribe(&[config.topic.as_str()])
            .map_err(PipelineError::Kafka)?;
        info!(topic = %config.topic, group = %config.group_id, "subscribed");

        Ok(Self {
            consumer,
            handler,
            topic: config.topic.clone(),
            poll_wait: Duration::from_millis(config.poll_wait_ms),
            commit_every: config.commit_every.max(1),
            max_batch: config.max_batch.max(1),
            tracker: OffsetTracker::default(),
            shutdown,
        })
    }

    /// Run the worker until shutdown or a fatal error.
    ///
    /// Either way the loop exits through one final synchronous commit of
    /// the last known-good offsets.
    ///
    /// # Errors
    ///
    /// Returns the fatal processing error, or
    /// [`PipelineError::ShutdownCommit`] when the final commit fails.
    pub async fn run(mut self) -> Result<(), PipelineError> {
        info!(topic = %self.topic, "consumer loop started");
        let outcome = self.consume().await;
        match &outcome {
            Ok(()) => info!(topic = %self.topic, "consumer loop stopping"),
            Err(err) => error!(topic = %self.topic, error = %err, "consumer loop failed"),
        }

        let commit = self.commit(CommitMode::Sync).map_err(|err| match err {
            PipelineError::Kafka(source) => PipelineError::ShutdownCommit(source),
            other => other,
        });
        if commit.is_ok() {
            debug!(topic = %self.topic, "final offsets committed");
        }
        outcome.and(commit)
    }

    async fn consume(&mut self) -> Result<(), PipelineError> {
        loop {
            if *self.shutdown.borrow() {
                return Ok(());
            }

            let batch = self.next_batch().await;
            for message in &batch {
                self.dispatch(message).await?;
                if self.tracker.processed() % self.commit_every == 0 {
                    self.checkpoint();
                }
            }
            if !batch.is_empty() {
                self.checkpoint();
            }
        }
    }

    /// Drain records until the poll wait budget expires or the batch is
    /// full. An empty window is not an error; transient client errors end
    /// the window early and are retried on the next one.
    async fn next_batch(&mut self) -> Vec<OwnedMessage> {
        let deadline = Instant::now() + self.poll_wait;
        let mut batch = Vec::new();

        while batch.len() < self.max_batch {
            tokio::select! {
                _ = self.shutdown.changed() => break,
                polled = timeout_at(deadline, self.consumer.recv()) => match polled {
                    Err(_) => break,
                    Ok(Ok(message)) => batch.push(message.detach()),
                    Ok(Err(err)) => {
                        warn!(topic = %self.topic, error = %err, "poll failed");
                        tokio::time::sleep_until(deadline).await;
                        break;
                    }
                },
            }
        }
        batch
    }

    async fn dispatch(&mut self, message: &OwnedMessage) -> Result<(), PipelineError> {
        debug!(
            topic = message.topic(),
            partition = message.partition(),
            offset = message.offset(),
            "record received"
        );
        let payload = message.payload().ok_or(PipelineError::EmptyPayload)?;
        self.handler.handle(payload).await?;
        self.tracker
            .track(message.topic(), message.partition(), message.offset());
        Ok(())
    }

    /// Best-effort asynchronous checkpoint; failures are logged and left to
    /// the client's own retry policy.
    fn checkpoint(&self) {
        if let Err(err) = self.commit(CommitMode::Async) {
            warn!(topic = %self.topic, error = %err, "offset checkpoint failed");
        }
    }

    fn commit(&self, mode: CommitMode) -> Result<(), PipelineError> {
        if self.tracker.is_empty() {
            return Ok(());
        }
        let list = self.tracker.commit_list().map_err(PipelineError::Kafka)?;
        self.consumer
            .commit(&list, mode)
            .map_err(PipelineError::Kafka)
    }
}

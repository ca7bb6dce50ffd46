//! Kafka adapter error types.

use hubflow_domain::error::HubFlowError;

/// Errors raised by the consumer pipeline and the outbound publishers.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A record payload could not be decoded into its event type. This
    /// indicates a schema or version mismatch and is fatal to the owning
    /// worker: papering over it would silently drop data.
    #[error("malformed event payload")]
    Malformed(#[source] serde_json::Error),

    /// A record arrived without any payload.
    #[error("record carries no payload")]
    EmptyPayload,

    /// The rdkafka client returned an error.
    #[error("kafka client error")]
    Kafka(#[source] rdkafka::error::KafkaError),

    /// The final synchronous offset commit at shutdown failed.
    #[error("shutdown offset commit failed")]
    ShutdownCommit(#[source] rdkafka::error::KafkaError),

    /// A domain-level error (storage, publish, validation).
    #[error("domain error")]
    Domain(#[from] HubFlowError),
}

impl PipelineError {
    /// Convert into a [`HubFlowError::Publish`] for propagation across the
    /// sink port boundary.
    #[must_use]
    pub fn into_domain(self) -> HubFlowError {
        match self {
            Self::Domain(err) => err,
            other => HubFlowError::Publish(Box::new(other)),
        }
    }
}

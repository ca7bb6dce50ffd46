//! # hubflow-adapter-kafka-rdkafka
//!
//! Kafka transport adapter using [rdkafka](https://docs.rs/rdkafka).
//!
//! ## Responsibilities
//! - Implement the shared consumer offset pipeline: bounded polls, strict
//!   in-order processing, periodic asynchronous offset checkpoints, and a
//!   final synchronous commit on shutdown
//! - Implement the sink port traits defined in `hubflow-app::ports::sink`
//!   as JSON producers keyed by hub id
//! - Own all broker configuration
//!
//! ## Dependency rule
//! Depends on `hubflow-app` (for port traits) and `hubflow-domain` (for
//! domain types). The `app` and `domain` crates must never reference this
//! adapter.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod producer;

pub use config::{ConsumerConfig, ProducerConfig};
pub use error::PipelineError;
pub use pipeline::{ConsumerPipeline, OffsetTracker, RecordHandler, decode};
pub use producer::{ActionPublisher, SnapshotPublisher};

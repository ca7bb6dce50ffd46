//! # hubflowd — hubflow daemon
//!
//! Composition root that wires the stream workers together and runs the
//! telemetry core.
//!
//! ## Responsibilities
//! - Load configuration (TOML file, env vars)
//! - Construct the registry stores and outbound publishers (adapters)
//! - Construct application services, injecting stores via port traits
//! - Run one consumer pipeline per stream, each in its own consumer group
//! - Handle graceful shutdown (SIGINT): interrupt the polls, let each
//!   worker finish its batch and commit its final offsets
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod settings;
mod workers;

use std::sync::Arc;

use hubflow_adapter_kafka_rdkafka::{ActionPublisher, ConsumerPipeline, SnapshotPublisher};
use hubflow_adapter_storage_memory::{MemoryDeviceStore, MemoryScenarioStore};
use hubflow_app::aggregator::SnapshotAggregator;
use hubflow_app::engine::ScenarioEngine;
use hubflow_app::registry::HubRegistry;
use tokio::sync::watch;
use tracing::{error, info};

use crate::settings::Settings;
use crate::workers::{HubEventWorker, SensorEventWorker, SnapshotWorker};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let settings = Settings::load()?;
    info!(brokers = %settings.brokers, "starting hubflowd");

    let (shutdown, _) = watch::channel(false);

    // Registries shared between the hub worker (writer) and the evaluation
    // worker (reader).
    let scenarios = Arc::new(MemoryScenarioStore::default());
    let devices = Arc::new(MemoryDeviceStore::default());

    // Sensor events -> snapshots
    let snapshot_sink = SnapshotPublisher::new(&settings.producer(&settings.topics.snapshots))?;
    let sensor_pipeline = ConsumerPipeline::new(
        &settings.consumer(&settings.topics.sensors, &settings.groups.aggregator),
        SensorEventWorker::new(SnapshotAggregator::new(), snapshot_sink),
        shutdown.subscribe(),
    )?;

    // Hub events -> registries
    let hub_pipeline = ConsumerPipeline::new(
        &settings.consumer(&settings.topics.hubs, &settings.groups.registry),
        HubEventWorker::new(HubRegistry::new(Arc::clone(&scenarios), Arc::clone(&devices))),
        shutdown.subscribe(),
    )?;

    // Snapshots -> device actions
    let action_sink = ActionPublisher::new(&settings.producer(&settings.topics.actions))?;
    let snapshot_pipeline = ConsumerPipeline::new(
        &settings.consumer(&settings.topics.snapshots, &settings.groups.evaluator),
        SnapshotWorker::new(ScenarioEngine::new(Arc::clone(&scenarios)), action_sink),
        shutdown.subscribe(),
    )?;

    let handles = [
        ("sensor-events", tokio::spawn(sensor_pipeline.run())),
        ("hub-events", tokio::spawn(hub_pipeline.run())),
        ("snapshots", tokio::spawn(snapshot_pipeline.run())),
    ];

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    let _ = shutdown.send(true);

    for (stream, handle) in handles {
        match handle.await {
            Ok(Ok(())) => info!(stream, "worker stopped"),
            Ok(Err(err)) => error!(stream, error = %err, "worker failed"),
            Err(err) => error!(stream, error = %err, "worker panicked"),
        }
    }

    Ok(())
}

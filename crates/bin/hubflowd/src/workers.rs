//! The three stream workers: each binds one decoded record type to its
//! application service.

use std::future::Future;

use hubflow_adapter_kafka_rdkafka::pipeline::{RecordHandler, decode};
use hubflow_adapter_kafka_rdkafka::PipelineError;
use hubflow_app::aggregator::SnapshotAggregator;
use hubflow_app::engine::ScenarioEngine;
use hubflow_app::ports::{ActionSink, DeviceRepository, ScenarioRepository, SnapshotSink};
use hubflow_app::registry::HubRegistry;
use hubflow_domain::hub::HubEvent;
use hubflow_domain::sensor::SensorEvent;
use hubflow_domain::snapshot::Snapshot;

/// Folds the sensor-event stream into snapshots and publishes every
/// accepted one.
pub struct SensorEventWorker<S> {
    aggregator: SnapshotAggregator,
    snapshots: S,
}

impl<S: SnapshotSink> SensorEventWorker<S> {
    pub fn new(aggregator: SnapshotAggregator, snapshots: S) -> Self {
        Self {
            aggregator,
            snapshots,
        }
    }
}

impl<S: SnapshotSink + Send + Sync> RecordHandler for SensorEventWorker<S> {
    fn handle(&mut self, payload: &[u8]) -> impl Future<Output = Result<(), PipelineError>> + Send {
        async move {
            let event: SensorEvent = decode(payload)?;
            if let Some(snapshot) = self.aggregator.apply(&event) {
                self.snapshots.publish(snapshot).await?;
            }
            Ok(())
        }
    }
}

/// Applies the hub-event stream to the device and scenario registries.
pub struct HubEventWorker<S, D> {
    registry: HubRegistry<S, D>,
}

impl<S: ScenarioRepository, D: DeviceRepository> HubEventWorker<S, D> {
    pub fn new(registry: HubRegistry<S, D>) -> Self {
        Self { registry }
    }
}

impl<S, D> RecordHandler for HubEventWorker<S, D>
where
    S: ScenarioRepository + Send + Sync,
    D: DeviceRepository + Send + Sync,
{
    fn handle(&mut self, payload: &[u8]) -> impl Future<Output = Result<(), PipelineError>> + Send {
        async move {
            let event: HubEvent = decode(payload)?;
            self.registry.apply(&event).await?;
            Ok(())
        }
    }
}

/// Evaluates every emitted snapshot and publishes the triggered device
/// actions in order.
pub struct SnapshotWorker<S, A> {
    engine: ScenarioEngine<S>,
    actions: A,
}

impl<S: ScenarioRepository, A: ActionSink> SnapshotWorker<S, A> {
    pub fn new(engine: ScenarioEngine<S>, actions: A) -> Self {
        Self { engine, actions }
    }
}

impl<S, A> RecordHandler for SnapshotWorker<S, A>
where
    S: ScenarioRepository + Send + Sync,
    A: ActionSink + Send + Sync,
{
    fn handle(&mut self, payload: &[u8]) -> impl Future<Output = Result<(), PipelineError>> + Send {
        async move {
            let snapshot: Snapshot = decode(payload)?;
            for command in self.engine.evaluate(&snapshot).await? {
                self.actions.publish(command).await?;
            }
            Ok(())
        }
    }
}

//! Sink ports — outbound stream publishers.
//!
//! Publishing is fire-and-forget from the application's point of view: a
//! sink either accepts the record or reports a publish error, it never
//! blocks on downstream consumers.

use std::future::Future;
use std::sync::Arc;

use hubflow_domain::error::HubFlowError;
use hubflow_domain::scenario::ActionCommand;
use hubflow_domain::snapshot::Snapshot;

/// Publishes accepted snapshots to the snapshot stream.
pub trait SnapshotSink {
    fn publish(&self, snapshot: Snapshot) -> impl Future<Output = Result<(), HubFlowError>> + Send;
}

/// Publishes triggered device-action commands to the action stream.
pub trait ActionSink {
    fn publish(&self, command: ActionCommand)
    -> impl Future<Output = Result<(), HubFlowError>> + Send;
}

impl<T: SnapshotSink + Send + Sync> SnapshotSink for Arc<T> {
    fn publish(&self, snapshot: Snapshot) -> impl Future<Output = Result<(), HubFlowError>> + Send {
        (**self).publish(snapshot)
    }
}

impl<T: ActionSink + Send + Sync> ActionSink for Arc<T> {
    fn publish(
        &self,
        command: ActionCommand,
    ) -> impl Future<Output = Result<(), HubFlowError>> + Send {
        (**self).publish(command)
    }
}

//! Snapshot aggregator: folds the sensor-event stream into one
//! authoritative snapshot per hub.
//!
//! The aggregator is logically single-writer: all events for a hub arrive
//! through one ordered stream partition, so staleness detection only needs
//! a timestamp comparison, never reordering.

use std::collections::HashMap;

use hubflow_domain::sensor::SensorEvent;
use hubflow_domain::snapshot::{SensorState, Snapshot};
use tracing::debug;

/// Maintains the per-hub snapshots and applies the merge rule.
#[derive(Debug, Default)]
pub struct SnapshotAggregator {
    snapshots: HashMap<String, Snapshot>,
}

impl SnapshotAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one sensor event into the owning hub's snapshot.
    ///
    /// Returns an owned copy of the updated snapshot when the event was
    /// accepted, so downstream consumers can never observe later mutation.
    /// Returns `None` for stale or duplicate readings: an event is rejected
    /// when the sensor already holds a strictly newer state, or when the
    /// incoming payload equals the stored one. The equal-payload rule also
    /// rejects newer readings that carry no change, which keeps the merge
    /// idempotent under at-least-once delivery but means a no-change
    /// reading never advances the snapshot timestamp.
    pub fn apply(&mut self, event: &SensorEvent) -> Option<Snapshot> {
        let snapshot = self
            .snapshots
            .entry(event.hub_id.clone())
            .or_insert_with(|| Snapshot::new(event.hub_id.clone(), event.timestamp));

        if let Some(existing) = snapshot.sensors.get(&event.sensor_id) {
            if existing.timestamp > event.timestamp || existing.data == event.payload {
                debug!(
                    hub = %event.hub_id,
                    sensor = %event.sensor_id,
                    timestamp = %event.timestamp,
                    "stale or duplicate reading ignored"
                );
                return None;
            }
        }

        snapshot.sensors.insert(
            event.sensor_id.clone(),
            SensorState {
                timestamp: event.timestamp,
                data: event.payload.clone(),
            },
        );
        snapshot.timestamp = snapshot.timestamp.max(event.timestamp);
        debug!(
            hub = %event.hub_id,
            sensor = %event.sensor_id,
            timestamp = %event.timestamp,
            "sensor state updated"
        );
        Some(snapshot.clone())
    }

    /// The current snapshot for a hub, if any event was ever accepted.
    #[must_use]
    pub fn snapshot(&self, hub_id: &str) -> Option<&Snapshot> {
        self.snapshots.get(hub_id)
    }
}

//! Snapshot: the consolidated state of every sensor of one hub.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sensor::SensorPayload;
use crate::time::Timestamp;

/// The last accepted reading for one sensor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorState {
    pub timestamp: Timestamp,
    pub data: SensorPayload,
}

/// The latest known state of all sensors of one hub at a point in logical
/// time.
///
/// Owned and mutated exclusively by the snapshot aggregator; downstream
/// consumers only ever see an owned copy taken at emission time.
///
/// Invariant: `timestamp` equals the maximum timestamp among accepted
/// events for this hub and never regresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub hub_id: String,
    pub timestamp: Timestamp,
    pub sensors: HashMap<String, SensorState>,
}

impl Snapshot {
    /// Create an empty snapshot for a hub seen for the first time.
    #[must_use]
    pub fn new(hub_id: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            hub_id: hub_id.into(),
            timestamp,
            sensors: HashMap::new(),
        }
    }

    /// Look up the state of one sensor.
    #[must_use]
    pub fn sensor(&self, sensor_id: &str) -> Option<&SensorState> {
        self.sensors.get(sensor_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now;

    #[test]
    fn should_start_empty() {
        let snapshot = Snapshot::new("hub-1", now());
        assert_eq!(snapshot.hub_id, "hub-1");
        assert!(snapshot.sensors.is_empty());
    }

    #[test]
    fn should_find_sensor_state_by_id() {
        let ts = now();
        let mut snapshot = Snapshot::new("hub-1", ts);
        snapshot.sensors.insert(
            "sensor-1".to_string(),
            SensorState {
                timestamp: ts,
                data: SensorPayload::Switch { on: true },
            },
        );
        assert!(snapshot.sensor("sensor-1").is_some());
        assert!(snapshot.sensor("sensor-2").is_none());
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let ts = now();
        let mut snapshot = Snapshot::new("hub-1", ts);
        snapshot.sensors.insert(
            "sensor-1".to_string(),
            SensorState {
                timestamp: ts,
                data: SensorPayload::Humidity { percent: 55 },
            },
        );
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}

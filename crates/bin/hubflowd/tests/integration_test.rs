//! End-to-end smoke tests for the full telemetry core.
//!
//! Each test wires the complete processing stack (real in-memory stores,
//! real registry, real aggregator, real engine) and drives it with the JSON
//! records the stream workers would decode — no broker is involved.

use std::sync::Arc;

use hubflow_adapter_kafka_rdkafka::decode;
use hubflow_adapter_storage_memory::{MemoryDeviceStore, MemoryScenarioStore};
use hubflow_app::aggregator::SnapshotAggregator;
use hubflow_app::engine::ScenarioEngine;
use hubflow_app::ports::ScenarioRepository;
use hubflow_app::registry::HubRegistry;
use hubflow_domain::hub::HubEvent;
use hubflow_domain::scenario::ActionKind;
use hubflow_domain::sensor::SensorEvent;
use hubflow_domain::snapshot::Snapshot;

struct Core {
    registry: HubRegistry<Arc<MemoryScenarioStore>, Arc<MemoryDeviceStore>>,
    aggregator: SnapshotAggregator,
    engine: ScenarioEngine<Arc<MemoryScenarioStore>>,
    scenarios: Arc<MemoryScenarioStore>,
}

fn core() -> Core {
    let scenarios = Arc::new(MemoryScenarioStore::default());
    let devices = Arc::new(MemoryDeviceStore::default());
    Core {
        registry: HubRegistry::new(Arc::clone(&scenarios), Arc::clone(&devices)),
        aggregator: SnapshotAggregator::new(),
        engine: ScenarioEngine::new(Arc::clone(&scenarios)),
        scenarios,
    }
}

impl Core {
    async fn apply_hub_record(&self, payload: &[u8]) {
        let event: HubEvent = decode(payload).expect("hub record must decode");
        self.registry.apply(&event).await.expect("registry apply must succeed");
    }

    fn apply_sensor_record(&mut self, payload: &[u8]) -> Option<Snapshot> {
        let event: SensorEvent = decode(payload).expect("sensor record must decode");
        self.aggregator.apply(&event)
    }
}

fn light_on_scenario_record() -> Vec<u8> {
    serde_json::json!({
        "hub_id": "hub-1",
        "timestamp": "2026-01-01T00:00:00Z",
        "payload": {
            "type": "scenario_added",
            "name": "light-on",
            "conditions": [{
                "sensor_id": "sensor-1",
                "kind": "motion",
                "operation": "equals",
                "value": true
            }],
            "actions": [{"sensor_id": "dev-1", "kind": "activate"}]
        }
    })
    .to_string()
    .into_bytes()
}

fn motion_record(timestamp: &str, detected: bool) -> Vec<u8> {
    serde_json::json!({
        "hub_id": "hub-1",
        "sensor_id": "sensor-1",
        "timestamp": timestamp,
        "payload": {"type": "motion", "detected": detected}
    })
    .to_string()
    .into_bytes()
}

#[tokio::test]
async fn should_emit_action_for_motion_triggered_scenario() {
    let mut core = core();

    core.apply_hub_record(&serde_json::json!({
        "hub_id": "hub-1",
        "timestamp": "2026-01-01T00:00:00Z",
        "payload": {"type": "device_added", "device_id": "dev-1", "device_type": "switch_sensor"}
    }).to_string().into_bytes())
    .await;
    core.apply_hub_record(&light_on_scenario_record()).await;

    let snapshot = core
        .apply_sensor_record(&motion_record("2026-01-01T08:00:00Z", true))
        .expect("first reading must produce a snapshot");

    // Round-trip through the wire format, exactly as the evaluation worker
    // receives it.
    let wire: Snapshot = decode(&serde_json::to_vec(&snapshot).unwrap()).unwrap();
    let commands = core.engine.evaluate(&wire).await.unwrap();

    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].hub_id, "hub-1");
    assert_eq!(commands[0].scenario, "light-on");
    assert_eq!(commands[0].action.sensor_id, "dev-1");
    assert_eq!(commands[0].action.kind, ActionKind::Activate);
}

#[tokio::test]
async fn should_stay_silent_on_duplicate_delivery() {
    let mut core = core();
    core.apply_hub_record(&light_on_scenario_record()).await;

    let record = motion_record("2026-01-01T08:00:00Z", true);
    assert!(core.apply_sensor_record(&record).is_some());
    // At-least-once delivery replays the exact same record.
    assert!(core.apply_sensor_record(&record).is_none());
}

#[tokio::test]
async fn should_ignore_stale_reading_after_newer_one() {
    let mut core = core();

    let snapshot = core
        .apply_sensor_record(&motion_record("2026-01-01T09:00:00Z", true))
        .unwrap();
    assert!(core
        .apply_sensor_record(&motion_record("2026-01-01T08:00:00Z", false))
        .is_none());

    // The earlier reading must not have touched the state.
    let current = core.aggregator.snapshot("hub-1").unwrap();
    assert_eq!(current.sensor("sensor-1").unwrap().data, snapshot.sensor("sensor-1").unwrap().data);
}

#[tokio::test]
async fn should_stop_triggering_after_scenario_removed() {
    let mut core = core();
    core.apply_hub_record(&light_on_scenario_record()).await;

    let snapshot = core
        .apply_sensor_record(&motion_record("2026-01-01T08:00:00Z", true))
        .unwrap();
    assert_eq!(core.engine.evaluate(&snapshot).await.unwrap().len(), 1);

    core.apply_hub_record(&serde_json::json!({
        "hub_id": "hub-1",
        "timestamp": "2026-01-01T09:00:00Z",
        "payload": {"type": "scenario_removed", "name": "light-on"}
    }).to_string().into_bytes())
    .await;

    assert!(core.engine.evaluate(&snapshot).await.unwrap().is_empty());
    assert!(core.scenarios.get("hub-1", "light-on").await.unwrap().is_none());
}

#[tokio::test]
async fn should_replace_scenario_definition_on_re_add() {
    let mut core = core();
    core.apply_hub_record(&light_on_scenario_record()).await;

    // Same name, now requiring the motion detector to be clear.
    core.apply_hub_record(&serde_json::json!({
        "hub_id": "hub-1",
        "timestamp": "2026-01-01T01:00:00Z",
        "payload": {
            "type": "scenario_added",
            "name": "light-on",
            "conditions": [{
                "sensor_id": "sensor-1",
                "kind": "motion",
                "operation": "equals",
                "value": false
            }],
            "actions": [{"sensor_id": "dev-1", "kind": "deactivate"}]
        }
    }).to_string().into_bytes())
    .await;

    let snapshot = core
        .apply_sensor_record(&motion_record("2026-01-01T08:00:00Z", true))
        .unwrap();
    assert!(core.engine.evaluate(&snapshot).await.unwrap().is_empty());

    let snapshot = core
        .apply_sensor_record(&motion_record("2026-01-01T08:05:00Z", false))
        .unwrap();
    let commands = core.engine.evaluate(&snapshot).await.unwrap();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].action.kind, ActionKind::Deactivate);
}

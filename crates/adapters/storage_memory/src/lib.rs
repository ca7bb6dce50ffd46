//! # hubflow-adapter-storage-memory
//!
//! In-process registry store backed by [dashmap](https://docs.rs/dashmap).
//!
//! ## Responsibilities
//! - Implement `ScenarioRepository` and `DeviceRepository` from
//!   `hubflow-app::ports::storage`
//! - Shard entries per hub key so concurrent access to unrelated hubs
//!   never contends on one lock
//!
//! The registry is written by the hub-event worker and read by the
//! evaluation worker; both hold the same store behind an `Arc`. The
//! durable registry store is an external collaborator reached through the
//! same port traits.
//!
//! ## Dependency rule
//! Depends on `hubflow-app` (for port traits) and `hubflow-domain` (for
//! domain types). The `app` and `domain` crates must never reference this
//! adapter.

use std::collections::HashMap;
use std::future::Future;

use dashmap::DashMap;
use hubflow_app::ports::{DeviceRepository, ScenarioRepository};
use hubflow_domain::error::HubFlowError;
use hubflow_domain::hub::Device;
use hubflow_domain::scenario::Scenario;

/// Scenario registry keyed by hub, then by scenario name.
#[derive(Debug, Default)]
pub struct MemoryScenarioStore {
    hubs: DashMap<String, HashMap<String, Scenario>>,
}

impl ScenarioRepository for MemoryScenarioStore {
    fn put(&self, scenario: Scenario) -> impl Future<Output = Result<(), HubFlowError>> + Send {
        self.hubs
            .entry(scenario.hub_id.clone())
            .or_default()
            .insert(scenario.name.clone(), scenario);
        async { Ok(()) }
    }

    fn delete(
        &self,
        hub_id: &str,
        name: &str,
    ) -> impl Future<Output = Result<(), HubFlowError>> + Send {
        if let Some(mut scenarios) = self.hubs.get_mut(hub_id) {
            scenarios.remove(name);
        }
        async { Ok(()) }
    }

    fn get(
        &self,
        hub_id: &str,
        name: &str,
    ) -> impl Future<Output = Result<Option<Scenario>, HubFlowError>> + Send {
        let result = self
            .hubs
            .get(hub_id)
            .and_then(|scenarios| scenarios.get(name).cloned());
        async { Ok(result) }
    }

    fn list_for_hub(
        &self,
        hub_id: &str,
    ) -> impl Future<Output = Result<Vec<Scenario>, HubFlowError>> + Send {
        let result: Vec<Scenario> = self
            .hubs
            .get(hub_id)
            .map(|scenarios| scenarios.values().cloned().collect())
            .unwrap_or_default();
        async { Ok(result) }
    }
}

/// Device registry keyed by hub, then by device id.
#[derive(Debug, Default)]
pub struct MemoryDeviceStore {
    hubs: DashMap<String, HashMap<String, Device>>,
}

impl DeviceRepository for MemoryDeviceStore {
    fn put(
        &self,
        hub_id: &str,
        device: Device,
    ) -> impl Future<Output = Result<(), HubFlowError>> + Send {
        self.hubs
            .entry(hub_id.to_string())
            .or_default()
            .insert(device.id.clone(), device);
        async { Ok(()) }
    }

    fn delete(
        &self,
        hub_id: &str,
        device_id: &str,
    ) -> impl Future<Output = Result<(), HubFlowError>> + Send {
        if let Some(mut devices) = self.hubs.get_mut(hub_id) {
            devices.remove(device_id);
        }
        async { Ok(()) }
    }

    fn list_for_hub(
        &self,
        hub_id: &str,
    ) -> impl Future<Output = Result<Vec<Device>, HubFlowError>> + Send {
        let result: Vec<Device> = self
            .hubs
            .get(hub_id)
            .map(|devices| devices.values().cloned().collect())
            .unwrap_or_default();
        async { Ok(result) }
    }
}

//! Storage ports — repository traits for the hub registries.
//!
//! The durable registry store is an external collaborator; these traits are
//! the only surface the application sees. Entries are keyed by hub, and by
//! name or device id within the hub.

use std::future::Future;
use std::sync::Arc;

use hubflow_domain::error::HubFlowError;
use hubflow_domain::hub::Device;
use hubflow_domain::scenario::Scenario;

/// Repository for the scenarios registered per hub.
pub trait ScenarioRepository {
    /// Insert or replace a scenario keyed by `(hub_id, name)`.
    fn put(&self, scenario: Scenario) -> impl Future<Output = Result<(), HubFlowError>> + Send;

    /// Remove a scenario; absent entries are a no-op.
    fn delete(
        &self,
        hub_id: &str,
        name: &str,
    ) -> impl Future<Output = Result<(), HubFlowError>> + Send;

    /// Look up one scenario by name.
    fn get(
        &self,
        hub_id: &str,
        name: &str,
    ) -> impl Future<Output = Result<Option<Scenario>, HubFlowError>> + Send;

    /// All scenarios registered for a hub.
    fn list_for_hub(
        &self,
        hub_id: &str,
    ) -> impl Future<Output = Result<Vec<Scenario>, HubFlowError>> + Send;
}

/// Repository for the devices registered per hub.
pub trait DeviceRepository {
    /// Insert or replace a device keyed by `(hub_id, device.id)`.
    fn put(
        &self,
        hub_id: &str,
        device: Device,
    ) -> impl Future<Output = Result<(), HubFlowError>> + Send;

    /// Remove a device; absent entries are a no-op.
    fn delete(
        &self,
        hub_id: &str,
        device_id: &str,
    ) -> impl Future<Output = Result<(), HubFlowError>> + Send;

    /// All devices registered for a hub.
    fn list_for_hub(
        &self,
        hub_id: &str,
    ) -> impl Future<Output = Result<Vec<Device>, HubFlowError>> + Send;
}

impl<T: ScenarioRepository + Send + Sync> ScenarioRepository for Arc<T> {
    fn put(&self, scenario: Scenario) -> impl Future<Output = Result<(), HubFlowError>> + Send {
        (**self).put(scenario)
    }

    fn delete(
        &self,
        hub_id: &str,
        name: &str,
    ) -> impl Future<Output = Result<(), HubFlowError>> + Send {
        (**self).delete(hub_id, name)
    }

    fn get(
        &self,
        hub_id: &str,
        name: &str,
    ) -> impl Future<Output = Result<Option<Scenario>, HubFlowError>> + Send {
        (**self).get(hub_id, name)
    }

    fn list_for_hub(
        &self,
        hub_id: &str,
    ) -> impl Future<Output = Result<Vec<Scenario>, HubFlowError>> + Send {
        (**self).list_for_hub(hub_id)
    }
}

impl<T: DeviceRepository + Send + Sync> DeviceRepository for Arc<T> {
    fn put(
        &self,
        hub_id: &str,
        device: Device,
    ) -> impl Future<Output = Result<(), HubFlowError>> + Send {
        (**self).put(hub_id, device)
    }

    fn delete(
        &self,
        hub_id: &str,
        device_id: &str,
    ) -> impl Future<Output = Result<(), HubFlowError>> + Send {
        (**self).delete(hub_id, device_id)
    }

    fn list_for_hub(
        &self,
        hub_id: &str,
    ) -> impl Future<Output = Result<Vec<Device>, HubFlowError>> + Send {
        (**self).list_for_hub(hub_id)
    }
}

//! Hub registry: applies device and scenario registration events.

use hubflow_domain::error::HubFlowError;
use hubflow_domain::hub::{Device, HubEvent, HubPayload};
use hubflow_domain::scenario::Scenario;
use tracing::{debug, warn};

use crate::ports::{DeviceRepository, ScenarioRepository};

/// Maintains the device and scenario registries for every hub.
pub struct HubRegistry<S, D> {
    scenarios: S,
    devices: D,
}

impl<S, D> HubRegistry<S, D>
where
    S: ScenarioRepository,
    D: DeviceRepository,
{
    /// Create a new registry backed by the given repositories.
    pub fn new(scenarios: S, devices: D) -> Self {
        Self { scenarios, devices }
    }

    /// Apply one administrative event to the registries.
    ///
    /// Device insertion and removal use merge semantics: re-adding a known
    /// device or removing an absent one is a silent no-op. Scenario
    /// definitions that violate domain invariants are logged and skipped
    /// instead of failing the stream.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repositories.
    pub async fn apply(&self, event: &HubEvent) -> Result<(), HubFlowError> {
        match &event.payload {
            HubPayload::DeviceAdded {
                device_id,
                device_type,
            } => {
                debug!(hub = %event.hub_id, device = %device_id, "device registered");
                self.devices
                    .put(
                        &event.hub_id,
                        Device {
                            id: device_id.clone(),
                            device_type: *device_type,
                        },
                    )
                    .await
            }
            HubPayload::DeviceRemoved { device_id } => {
                debug!(hub = %event.hub_id, device = %device_id, "device removed");
                self.devices.delete(&event.hub_id, device_id).await
            }
            HubPayload::ScenarioAdded {
                name,
                conditions,
                actions,
            } => {
                let scenario = Scenario {
                    hub_id: event.hub_id.clone(),
                    name: name.clone(),
                    conditions: conditions.clone(),
                    actions: actions.clone(),
                };
                if let Err(error) = scenario.validate() {
                    warn!(
                        hub = %event.hub_id,
                        scenario = %name,
                        %error,
                        "invalid scenario definition skipped"
                    );
                    return Ok(());
                }
                for lint in scenario.condition_lints() {
                    warn!(
                        hub = %event.hub_id,
                        scenario = %name,
                        error = %lint,
                        "scenario condition can never be satisfied"
                    );
                }
                debug!(hub = %event.hub_id, scenario = %name, "scenario registered");
                self.scenarios.put(scenario).await
            }
            HubPayload::ScenarioRemoved { name } => {
                debug!(hub = %event.hub_id, scenario = %name, "scenario removed");
                self.scenarios.delete(&event.hub_id, name).await
            }
        }
    }
}

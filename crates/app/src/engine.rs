//! Scenario engine: evaluates registered scenarios against emitted
//! snapshots and collects the device actions of every triggered scenario.

use hubflow_domain::error::{EvaluationError, HubFlowError};
use hubflow_domain::scenario::{ActionCommand, Scenario};
use hubflow_domain::snapshot::Snapshot;
use hubflow_domain::time::now;
use tracing::{debug, warn};

use crate::ports::ScenarioRepository;

/// Evaluates every scenario of a hub against the hub's current snapshot.
pub struct ScenarioEngine<S> {
    scenarios: S,
}

impl<S: ScenarioRepository> ScenarioEngine<S> {
    /// Create a new engine reading scenarios from the given repository.
    pub fn new(scenarios: S) -> Self {
        Self { scenarios }
    }

    /// Evaluate all scenarios registered for the snapshot's hub.
    ///
    /// A scenario triggers iff every condition in its declared list holds.
    /// Scenarios that cannot be resolved against the snapshot (unknown
    /// sensor, incompatible operation) are reported and treated as not
    /// triggered; they never abort evaluation of the remaining scenarios.
    /// Triggered scenarios contribute all of their actions in declared
    /// order. Neither the snapshot nor the registry is mutated.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the scenario repository.
    pub async fn evaluate(&self, snapshot: &Snapshot) -> Result<Vec<ActionCommand>, HubFlowError> {
        let scenarios = self.scenarios.list_for_hub(&snapshot.hub_id).await?;
        let mut commands = Vec::new();

        for scenario in &scenarios {
            match triggered(scenario, snapshot) {
                Ok(true) => {
                    debug!(hub = %snapshot.hub_id, scenario = %scenario.name, "scenario triggered");
                    let fired_at = now();
                    commands.extend(scenario.actions.iter().map(|action| ActionCommand {
                        hub_id: snapshot.hub_id.clone(),
                        scenario: scenario.name.clone(),
                        action: action.clone(),
                        fired_at,
                    }));
                }
                Ok(false) => {}
                Err(error) => {
                    warn!(
                        hub = %snapshot.hub_id,
                        scenario = %scenario.name,
                        %error,
                        "scenario cannot be evaluated against this snapshot"
                    );
                }
            }
        }

        Ok(commands)
    }
}

/// Check the conjunction of a scenario's conditions against a snapshot.
fn triggered(scenario: &Scenario, snapshot: &Snapshot) -> Result<bool, EvaluationError> {
    for condition in &scenario.conditions {
        let state =
            snapshot
                .sensor(&condition.sensor_id)
                .ok_or_else(|| EvaluationError::UnknownSensor {
                    sensor_id: condition.sensor_id.clone(),
                })?;
        if !condition.evaluate(state)? {
            return Ok(false);
        }
    }
    Ok(true)
}

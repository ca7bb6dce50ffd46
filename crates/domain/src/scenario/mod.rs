//! Scenario: a named automation rule owned by one hub.
//!
//! A scenario is a conjunction of [`ScenarioCondition`]s over the hub's
//! sensor state. When every condition holds, the scenario emits its
//! [`DeviceAction`]s in declared order.

mod action;
mod condition;

pub use action::{ActionCommand, ActionKind, DeviceAction};
pub use condition::{ConditionOperation, ConditionValue, ScenarioCondition};

use serde::{Deserialize, Serialize};

use crate::error::{HubFlowError, ValidationError};

/// A named automation rule: all conditions must hold for the actions to
/// fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub hub_id: String,
    pub name: String,
    pub conditions: Vec<ScenarioCondition>,
    pub actions: Vec<DeviceAction>,
}

impl Scenario {
    /// Create a builder for constructing a [`Scenario`].
    #[must_use]
    pub fn builder() -> ScenarioBuilder {
        ScenarioBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HubFlowError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - `actions` is empty ([`ValidationError::NoActions`])
    pub fn validate(&self) -> Result<(), HubFlowError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.actions.is_empty() {
            return Err(ValidationError::NoActions.into());
        }
        Ok(())
    }

    /// Report configuration mistakes that do not prevent storing the
    /// scenario: ordering comparisons declared against boolean sensor
    /// kinds. Such conditions safely evaluate to false at runtime.
    #[must_use]
    pub fn condition_lints(&self) -> Vec<ValidationError> {
        self.conditions
            .iter()
            .filter(|condition| {
                !condition.kind.is_numeric() && condition.operation.is_ordering()
            })
            .map(|condition| ValidationError::NonNumericOperation {
                kind: condition.kind,
                operation: condition.operation,
            })
            .collect()
    }
}

/// Step-by-step builder for [`Scenario`].
#[derive(Debug, Default)]
pub struct ScenarioBuilder {
    hub_id: Option<String>,
    name: Option<String>,
    conditions: Vec<ScenarioCondition>,
    actions: Vec<DeviceAction>,
}

impl ScenarioBuilder {
    #[must_use]
    pub fn hub_id(mut self, hub_id: impl Into<String>) -> Self {
        self.hub_id = Some(hub_id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: ScenarioCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    #[must_use]
    pub fn action(mut self, action: DeviceAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Consume the builder, validate, and return a [`Scenario`].
    ///
    /// # Errors
    ///
    /// Returns [`HubFlowError::Validation`] if required fields are missing
    /// or empty.
    pub fn build(self) -> Result<Scenario, HubFlowError> {
        let scenario = Scenario {
            hub_id: self.hub_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            conditions: self.conditions,
            actions: self.actions,
        };
        scenario.validate()?;
        Ok(scenario)
    }
}

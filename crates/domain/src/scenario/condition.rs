//! Condition: a comparison between a sensor's current reading and a target
//! value.

use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;
use crate::sensor::SensorKind;
use crate::snapshot::SensorState;

/// How a condition compares the sensor reading with its target value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperation {
    Equals,
    LowerThan,
    GreaterThan,
}

impl ConditionOperation {
    /// Whether this operation orders values (and therefore requires a
    /// numeric sensor kind).
    #[must_use]
    pub fn is_ordering(self) -> bool {
        matches!(self, Self::LowerThan | Self::GreaterThan)
    }
}

impl std::fmt::Display for ConditionOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equals => f.write_str("equals"),
            Self::LowerThan => f.write_str("lower_than"),
            Self::GreaterThan => f.write_str("greater_than"),
        }
    }
}

/// The target value of a condition, typed per sensor kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Bool(bool),
    Int(i32),
}

impl std::fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
        }
    }
}

/// A single comparison against one sensor's current state.
///
/// Conditions in a scenario form a logical AND; their declared order is
/// preserved for diagnostics only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioCondition {
    pub sensor_id: String,
    pub kind: SensorKind,
    pub operation: ConditionOperation,
    pub value: ConditionValue,
}

impl ScenarioCondition {
    /// Compare the given sensor state against this condition.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] when the state cannot be compared at
    /// all: the reading is of a different kind, the target value does not
    /// match the reading's type, or an ordering comparison targets a
    /// boolean kind. Callers treat these as "not satisfied" and report
    /// them; they never abort evaluation of other scenarios.
    pub fn evaluate(&self, state: &SensorState) -> Result<bool, EvaluationError> {
        let actual = state.data.kind();
        if actual != self.kind {
            return Err(EvaluationError::KindMismatch {
                expected: self.kind,
                actual,
            });
        }
        match self.operation {
            ConditionOperation::Equals => match self.value {
                ConditionValue::Bool(expected) => state
                    .data
                    .as_bool()
                    .map(|reading| reading == expected)
                    .ok_or(EvaluationError::ValueTypeMismatch { kind: self.kind }),
                ConditionValue::Int(expected) => state
                    .data
                    .as_int()
                    .map(|reading| reading == expected)
                    .ok_or(EvaluationError::ValueTypeMismatch { kind: self.kind }),
            },
            ConditionOperation::LowerThan | ConditionOperation::GreaterThan => {
                let ConditionValue::Int(target) = self.value else {
                    return Err(EvaluationError::NonNumericOperation {
                        kind: self.kind,
                        operation: self.operation,
                    });
                };
                let reading = state.data.as_int().ok_or(EvaluationError::NonNumericOperation {
                    kind: self.kind,
                    operation: self.operation,
                })?;
                Ok(match self.operation {
                    ConditionOperation::LowerThan => reading < target,
                    ConditionOperation::GreaterThan => reading > target,
                    ConditionOperation::Equals => unreachable!(),
                })
            }
        }
    }
}

impl std::fmt::Display for ScenarioCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({}, {} {})",
            self.kind, self.sensor_id, self.operation, self.value
        )
    }
}

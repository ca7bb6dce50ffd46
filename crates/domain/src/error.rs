//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HubFlowError`]
//! at the port boundary. Adapter-specific failures travel through the boxed
//! `Storage`/`Publish` variants so the domain stays free of IO crates.

use crate::scenario::ConditionOperation;
use crate::sensor::SensorKind;

/// Top-level error type crossing port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum HubFlowError {
    /// A domain invariant was violated while constructing a value.
    #[error("validation failed")]
    Validation(#[from] ValidationError),

    /// A scenario condition could not be resolved against a snapshot.
    #[error("scenario evaluation failed")]
    Evaluation(#[from] EvaluationError),

    /// A repository adapter failed.
    #[error("storage failure")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An outbound stream publisher failed.
    #[error("publish failure")]
    Publish(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Violations of domain invariants, raised by `validate()` methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A scenario name must not be empty.
    #[error("name must not be empty")]
    EmptyName,

    /// A scenario must carry at least one action.
    #[error("at least one action is required")]
    NoActions,

    /// An ordering comparison was declared against a boolean sensor kind.
    #[error("{operation} cannot apply to {kind} readings")]
    NonNumericOperation {
        kind: SensorKind,
        operation: ConditionOperation,
    },
}

/// A scenario condition that cannot be resolved against the current
/// snapshot. Recoverable: the scenario is reported and treated as
/// not triggered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    /// The condition references a sensor the snapshot has never seen.
    #[error("sensor {sensor_id} is not present in the snapshot")]
    UnknownSensor { sensor_id: String },

    /// The sensor reported a different kind than the condition expects.
    #[error("condition expects {expected} but sensor reported {actual}")]
    KindMismatch {
        expected: SensorKind,
        actual: SensorKind,
    },

    /// The condition value cannot be compared with the sensor's readings.
    #[error("condition value does not match {kind} readings")]
    ValueTypeMismatch { kind: SensorKind },

    /// An ordering comparison was applied to a boolean sensor kind.
    #[error("{operation} is not valid for {kind} readings")]
    NonNumericOperation {
        kind: SensorKind,
        operation: ConditionOperation,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_validation_errors() {
        assert_eq!(ValidationError::EmptyName.to_string(), "name must not be empty");
        assert_eq!(
            ValidationError::NonNumericOperation {
                kind: SensorKind::Motion,
                operation: ConditionOperation::LowerThan,
            }
            .to_string(),
            "lower_than cannot apply to motion readings"
        );
    }

    #[test]
    fn should_display_unknown_sensor_error() {
        let err = EvaluationError::UnknownSensor {
            sensor_id: "s-1".to_string(),
        };
        assert_eq!(err.to_string(), "sensor s-1 is not present in the snapshot");
    }

    #[test]
    fn should_wrap_validation_error_into_hubflow_error() {
        let err: HubFlowError = ValidationError::NoActions.into();
        assert!(matches!(err, HubFlowError::Validation(ValidationError::NoActions)));
    }

    #[test]
    fn should_wrap_evaluation_error_into_hubflow_error() {
        let err: HubFlowError = EvaluationError::KindMismatch {
            expected: SensorKind::Temperature,
            actual: SensorKind::Motion,
        }
        .into();
        assert!(matches!(err, HubFlowError::Evaluation(_)));
    }
}

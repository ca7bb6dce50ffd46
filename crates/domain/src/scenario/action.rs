//! Action: the command emitted at a device when a scenario fires.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// What the command asks the device to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Activate,
    Deactivate,
    Inverse,
    SetValue,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Activate => f.write_str("activate"),
            Self::Deactivate => f.write_str("deactivate"),
            Self::Inverse => f.write_str("inverse"),
            Self::SetValue => f.write_str("set_value"),
        }
    }
}

/// One command directed at a device, declared as part of a scenario.
///
/// `value` is only meaningful for [`ActionKind::SetValue`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceAction {
    pub sensor_id: String,
    pub kind: ActionKind,
    #[serde(default)]
    pub value: Option<i32>,
}

impl std::fmt::Display for DeviceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value {
            Some(value) => write!(f, "{}({}, {value})", self.kind, self.sensor_id),
            None => write!(f, "{}({})", self.kind, self.sensor_id),
        }
    }
}

/// An outbound device-action record: one triggered scenario action,
/// addressed to the owning hub and stamped with the evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCommand {
    pub hub_id: String,
    pub scenario: String,
    pub action: DeviceAction,
    pub fired_at: Timestamp,
}

//! Hub events: administrative records describing what a hub is made of.
//!
//! Hubs announce their devices and their automation scenarios over a
//! dedicated stream, separate from telemetry readings.

use serde::{Deserialize, Serialize};

use crate::scenario::{DeviceAction, ScenarioCondition};
use crate::time::Timestamp;

/// The hardware classes a hub can register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    MotionSensor,
    TemperatureSensor,
    LightSensor,
    ClimateSensor,
    SwitchSensor,
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MotionSensor => f.write_str("motion_sensor"),
            Self::TemperatureSensor => f.write_str("temperature_sensor"),
            Self::LightSensor => f.write_str("light_sensor"),
            Self::ClimateSensor => f.write_str("climate_sensor"),
            Self::SwitchSensor => f.write_str("switch_sensor"),
        }
    }
}

/// A device registered with a hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub device_type: DeviceType,
}

/// The administrative record carried by a [`HubEvent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HubPayload {
    /// A device joined the hub. Re-adding a known device is a no-op.
    DeviceAdded {
        device_id: String,
        device_type: DeviceType,
    },
    /// A device left the hub. Removing an unknown device is a no-op.
    DeviceRemoved { device_id: String },
    /// A scenario was created or replaced, keyed by name within the hub.
    ScenarioAdded {
        name: String,
        conditions: Vec<ScenarioCondition>,
        actions: Vec<DeviceAction>,
    },
    /// A scenario was deleted. Removing an unknown name is a no-op.
    ScenarioRemoved { name: String },
}

/// An administrative event emitted by one hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubEvent {
    pub hub_id: String,
    pub timestamp: Timestamp,
    pub payload: HubPayload,
}

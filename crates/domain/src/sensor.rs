//! Sensor events: readings reported by the sensors attached to a hub.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// The six kinds of sensor a hub can report. Scenario conditions reference
/// the same set, so a condition can be checked against the kind of the
/// reading it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Motion,
    Luminosity,
    Switch,
    Co2Level,
    Humidity,
    Temperature,
}

impl SensorKind {
    /// Whether readings of this kind are integers (ordering comparisons are
    /// only defined for numeric kinds).
    #[must_use]
    pub fn is_numeric(self) -> bool {
        !matches!(self, Self::Motion | Self::Switch)
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Motion => f.write_str("motion"),
            Self::Luminosity => f.write_str("luminosity"),
            Self::Switch => f.write_str("switch"),
            Self::Co2Level => f.write_str("co2_level"),
            Self::Humidity => f.write_str("humidity"),
            Self::Temperature => f.write_str("temperature"),
        }
    }
}

/// One reading, tagged by sensor kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SensorPayload {
    /// Motion detector state.
    Motion { detected: bool },
    /// Ambient light level in lux.
    Luminosity { lux: i32 },
    /// Wall switch position.
    Switch { on: bool },
    /// CO2 concentration in ppm.
    Co2Level { ppm: i32 },
    /// Relative humidity in percent.
    Humidity { percent: i32 },
    /// Temperature in degrees Celsius.
    Temperature { celsius: i32 },
}

impl SensorPayload {
    /// The kind of sensor that produced this reading.
    #[must_use]
    pub fn kind(&self) -> SensorKind {
        match self {
            Self::Motion { .. } => SensorKind::Motion,
            Self::Luminosity { .. } => SensorKind::Luminosity,
            Self::Switch { .. } => SensorKind::Switch,
            Self::Co2Level { .. } => SensorKind::Co2Level,
            Self::Humidity { .. } => SensorKind::Humidity,
            Self::Temperature { .. } => SensorKind::Temperature,
        }
    }

    /// The boolean value of the reading, for boolean kinds.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Motion { detected } => Some(*detected),
            Self::Switch { on } => Some(*on),
            _ => None,
        }
    }

    /// The integer value of the reading, for numeric kinds.
    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Luminosity { lux } => Some(*lux),
            Self::Co2Level { ppm } => Some(*ppm),
            Self::Humidity { percent } => Some(*percent),
            Self::Temperature { celsius } => Some(*celsius),
            Self::Motion { .. } | Self::Switch { .. } => None,
        }
    }
}

/// A reading reported by one sensor of one hub. Immutable, produced once by
/// the ingress layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorEvent {
    pub hub_id: String,
    pub sensor_id: String,
    pub timestamp: Timestamp,
    pub payload: SensorPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_report_numeric_kinds() {
        assert!(SensorKind::Luminosity.is_numeric());
        assert!(SensorKind::Co2Level.is_numeric());
        assert!(SensorKind::Humidity.is_numeric());
        assert!(SensorKind::Temperature.is_numeric());
        assert!(!SensorKind::Motion.is_numeric());
        assert!(!SensorKind::Switch.is_numeric());
    }

    #[test]
    fn should_expose_kind_of_each_payload() {
        assert_eq!(SensorPayload::Motion { detected: true }.kind(), SensorKind::Motion);
        assert_eq!(SensorPayload::Luminosity { lux: 120 }.kind(), SensorKind::Luminosity);
        assert_eq!(SensorPayload::Switch { on: false }.kind(), SensorKind::Switch);
        assert_eq!(SensorPayload::Co2Level { ppm: 450 }.kind(), SensorKind::Co2Level);
        assert_eq!(SensorPayload::Humidity { percent: 60 }.kind(), SensorKind::Humidity);
        assert_eq!(
            SensorPayload::Temperature { celsius: 21 }.kind(),
            SensorKind::Temperature
        );
    }

    #[test]
    fn should_extract_bool_from_boolean_payloads_only() {
        assert_eq!(SensorPayload::Motion { detected: true }.as_bool(), Some(true));
        assert_eq!(SensorPayload::Switch { on: false }.as_bool(), Some(false));
        assert_eq!(SensorPayload::Temperature { celsius: 21 }.as_bool(), None);
    }

    #[test]
    fn should_extract_int_from_numeric_payloads_only() {
        assert_eq!(SensorPayload::Luminosity { lux: 120 }.as_int(), Some(120));
        assert_eq!(SensorPayload::Motion { detected: true }.as_int(), None);
    }

    #[test]
    fn should_serialize_payload_with_snake_case_tag() {
        let payload = SensorPayload::Co2Level { ppm: 450 };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "co2_level");
        assert_eq!(json["ppm"], 450);
    }

    #[test]
    fn should_roundtrip_sensor_event_through_serde_json() {
        let event = SensorEvent {
            hub_id: "hub-1".to_string(),
            sensor_id: "sensor-1".to_string(),
            timestamp: crate::time::now(),
            payload: SensorPayload::Temperature { celsius: 19 },
        };
        let json = serde_json::to_string(&event).unwrap();
        let parsed: SensorEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn should_reject_unknown_payload_tag() {
        let json = serde_json::json!({
            "hub_id": "hub-1",
            "sensor_id": "sensor-1",
            "timestamp": "2026-01-01T00:00:00Z",
            "payload": {"type": "pressure", "hpa": 1013}
        });
        let result: Result<SensorEvent, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }

    #[test]
    fn should_display_kind_names_in_snake_case() {
        assert_eq!(SensorKind::Co2Level.to_string(), "co2_level");
        assert_eq!(SensorKind::Motion.to_string(), "motion");
    }
}

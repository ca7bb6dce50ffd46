//! Daemon configuration: optional TOML file plus environment overrides.

use hubflow_adapter_kafka_rdkafka::{ConsumerConfig, ProducerConfig};
use serde::Deserialize;

/// Stream topic names, one per logical stream.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Topics {
    pub sensors: String,
    pub hubs: String,
    pub snapshots: String,
    pub actions: String,
}

impl Default for Topics {
    fn default() -> Self {
        Self {
            sensors: "telemetry.sensors.v1".to_string(),
            hubs: "telemetry.hubs.v1".to_string(),
            snapshots: "telemetry.snapshots.v1".to_string(),
            actions: "telemetry.actions.v1".to_string(),
        }
    }
}

/// Consumer group names, one per logical component so the components scale
/// and fail independently.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Groups {
    pub aggregator: String,
    pub registry: String,
    pub evaluator: String,
}

impl Default for Groups {
    fn default() -> Self {
        Self {
            aggregator: "hubflow-aggregator".to_string(),
            registry: "hubflow-registry".to_string(),
            evaluator: "hubflow-evaluator".to_string(),
        }
    }
}

/// Full daemon configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub brokers: String,
    pub topics: Topics,
    pub groups: Groups,
    pub poll_wait_ms: u64,
    pub commit_every: u64,
    pub max_batch: usize,
    pub send_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            brokers: "localhost:9092".to_string(),
            topics: Topics::default(),
            groups: Groups::default(),
            poll_wait_ms: 1000,
            commit_every: 10,
            max_batch: 500,
            send_timeout_ms: 5000,
        }
    }
}

/// Failures while loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot read configuration file")]
    Read(#[from] std::io::Error),
    #[error("cannot parse configuration file")]
    Parse(#[from] toml::de::Error),
}

impl Settings {
    /// Load settings from the file named by `HUBFLOW_CONFIG` (when set),
    /// then apply the `HUBFLOW_BROKERS` environment override.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the configured file cannot be read or
    /// parsed. A missing `HUBFLOW_CONFIG` variable is not an error.
    pub fn load() -> Result<Self, SettingsError> {
        let mut settings = match std::env::var("HUBFLOW_CONFIG") {
            Ok(path) => toml::from_str(&std::fs::read_to_string(path)?)?,
            Err(_) => Self::default(),
        };
        if let Ok(brokers) = std::env::var("HUBFLOW_BROKERS") {
            settings.brokers = brokers;
        }
        Ok(settings)
    }

    /// Consumer configuration for one stream.
    #[must_use]
    pub fn consumer(&self, topic: &str, group: &str) -> ConsumerConfig {
        ConsumerConfig {
            brokers: self.brokers.clone(),
            group_id: group.to_string(),
            topic: topic.to_string(),
            poll_wait_ms: self.poll_wait_ms,
            commit_every: self.commit_every,
            max_batch: self.max_batch,
            ..ConsumerConfig::default()
        }
    }

    /// Producer configuration for one outbound topic.
    #[must_use]
    pub fn producer(&self, topic: &str) -> ProducerConfig {
        ProducerConfig {
            brokers: self.brokers.clone(),
            topic: topic.to_string(),
            send_timeout_ms: self.send_timeout_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_original_topic_names() {
        let settings = Settings::default();
        assert_eq!(settings.topics.sensors, "telemetry.sensors.v1");
        assert_eq!(settings.topics.hubs, "telemetry.hubs.v1");
        assert_eq!(settings.topics.snapshots, "telemetry.snapshots.v1");
        assert_eq!(settings.topics.actions, "telemetry.actions.v1");
    }

    #[test]
    fn should_give_each_component_its_own_group() {
        let groups = Groups::default();
        assert_ne!(groups.aggregator, groups.registry);
        assert_ne!(groups.registry, groups.evaluator);
        assert_ne!(groups.aggregator, groups.evaluator);
    }

    #[test]
    fn should_deserialize_partial_toml_with_defaults() {
        let toml = r#"
            brokers = "kafka-1:9092"

            [topics]
            sensors = "staging.sensors"
        "#;
        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(settings.brokers, "kafka-1:9092");
        assert_eq!(settings.topics.sensors, "staging.sensors");
        assert_eq!(settings.topics.hubs, "telemetry.hubs.v1");
        assert_eq!(settings.commit_every, 10);
    }

    #[test]
    fn should_build_consumer_config_for_stream() {
        let settings = Settings::default();
        let config = settings.consumer(&settings.topics.sensors, &settings.groups.aggregator);
        assert_eq!(config.topic, "telemetry.sensors.v1");
        assert_eq!(config.group_id, "hubflow-aggregator");
        assert_eq!(config.brokers, settings.brokers);
        assert_eq!(config.poll_wait_ms, 1000);
    }

    #[test]
    fn should_build_producer_config_for_topic() {
        let settings = Settings::default();
        let config = settings.producer(&settings.topics.actions);
        assert_eq!(config.topic, "telemetry.actions.v1");
        assert_eq!(config.send_timeout_ms, 5000);
    }
}

//! MQTT bridge configuration.

use serde::Deserialize;

/// Configuration for the device-side MQTT broker.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// Whether the bridge is started at all.
    pub enabled: bool,
    /// MQTT broker hostname or IP address.
    pub broker_host: String,
    /// MQTT broker port.
    pub broker_port: u16,
    /// MQTT client identifier.
    pub client_id: String,
    /// Topic prefix; the channel name is appended as the last level.
    pub base_topic: String,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u16,
}

impl MqttConfig {
    /// Topic carrying the messages of `channel`.
    #[must_use]
    pub fn topic_for(&self, channel: &str) -> String {
        format!("{}/{channel}", self.base_topic.trim_end_matches('/'))
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            broker_host: "localhost".to_string(),
            broker_port: 1883,
            client_id: "pottydog".to_string(),
            base_topic: "pottydog".to_string(),
            keep_alive_secs: 30,
        }
    }
}

//! # pottydog-adapter-mqtt
//!
//! MQTT adapter: relays what the door sensor publishes on the device broker
//! into the in-process channel hub, where browser subscriptions pick it up.
//!
//! ## Responsibilities
//! - Connect to an MQTT broker and (re)subscribe to `<base_topic>/<channel>`
//! - Decode each publish as a JSON payload and forward it as a `ChannelMessage`
//! - Log and drop payloads that are not JSON
//!
//! Reconnection is left to rumqttc: polling continues after a short pause.
//!
//! ## Dependency rule
//! Same as other adapters: depends on `pottydog-app` and `pottydog-domain`.

mod bridge;
mod config;
mod error;

pub use bridge::MqttBridge;
pub use config::MqttConfig;
pub use error::MqttError;

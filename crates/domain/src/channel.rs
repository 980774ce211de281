//! Channel messages carried by the real-time relay.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// The single shared channel the door sensor publishes on.
pub const DEFAULT_CHANNEL: &str = "Channel-Barcelona";

/// Prefix of the identifier a dashboard session subscribes with.
pub const DASHBOARD_UUID_PREFIX: &str = "dashboard-";

/// Identifier a dashboard subscribes with for the given user.
#[must_use]
pub fn dashboard_uuid(username: &str) -> String {
    format!("{DASHBOARD_UUID_PREFIX}{username}")
}

/// A payload published on a named channel.
///
/// The payload is opaque JSON: motion events and permission notices share
/// the same channel and consumers pick what they understand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMessage {
    pub channel: String,
    pub payload: serde_json::Value,
    pub published_at: Timestamp,
}

impl ChannelMessage {
    /// Wrap a payload for `channel`, stamped with the current time.
    #[must_use]
    pub fn new(channel: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            channel: channel.into(),
            payload,
            published_at: crate::time::now(),
        }
    }
}

/// Notice sent on the channel when an admin changes a user's permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "update_token")]
pub struct PermissionsChanged {
    pub message: String,
    pub can_read: bool,
    pub can_write: bool,
}

impl PermissionsChanged {
    #[must_use]
    pub fn new(can_read: bool, can_write: bool) -> Self {
        Self {
            message: "Your permissions have been changed".to_string(),
            can_read,
            can_write,
        }
    }

    /// JSON payload as published on the channel.
    #[must_use]
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "update_token",
            "message": self.message,
            "can_read": self.can_read,
            "can_write": self.can_write,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_prefix_username_for_dashboard_uuid() {
        assert_eq!(dashboard_uuid("alice"), "dashboard-alice");
    }

    #[test]
    fn should_build_update_token_payload() {
        let payload = PermissionsChanged::new(true, false).to_payload();
        assert_eq!(payload["type"], "update_token");
        assert_eq!(payload["message"], "Your permissions have been changed");
        assert_eq!(payload["can_read"], true);
        assert_eq!(payload["can_write"], false);
    }

    #[test]
    fn should_match_serde_representation_with_payload() {
        let notice = PermissionsChanged::new(false, true);
        let via_serde = serde_json::to_value(&notice).unwrap();
        assert_eq!(via_serde, notice.to_payload());
        let back: PermissionsChanged = serde_json::from_value(via_serde).unwrap();
        assert_eq!(back, notice);
    }
}

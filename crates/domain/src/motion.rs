//! Motion tags reported by the door sensor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status value describing what the sensor saw at the door.
///
/// The set is closed: anything else arriving on the channel is not a
/// motion tag and is dropped by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionTag {
    /// No movement for a while.
    Inactive,
    /// The dog is moving around the door.
    Detected,
    /// The dog has been waiting at the door long enough to need to go out.
    Potty,
}

impl MotionTag {
    /// Every known tag, in severity order.
    pub const ALL: [Self; 3] = [Self::Inactive, Self::Detected, Self::Potty];

    /// Wire name of the tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Detected => "detected",
            Self::Potty => "potty",
        }
    }
}

impl fmt::Display for MotionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known motion tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMotionTag;

impl fmt::Display for UnknownMotionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown motion tag")
    }
}

impl std::error::Error for UnknownMotionTag {}

impl FromStr for MotionTag {
    type Err = UnknownMotionTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inactive" => Ok(Self::Inactive),
            "detected" => Ok(Self::Detected),
            "potty" => Ok(Self::Potty),
            _ => Err(UnknownMotionTag),
        }
    }
}

/// A sensor message as published on the channel.
///
/// Only `motion` matters to the dashboard. It is kept as a raw string so
/// that unrecognised tags survive decoding and can be dropped by the lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionEvent {
    pub motion: String,
    /// Seconds since the Unix epoch, as stamped by the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}

impl MotionEvent {
    /// Extract a motion event from an arbitrary channel payload.
    ///
    /// Returns `None` when the payload has no string `motion` field
    /// (e.g. permission-change notices sharing the channel).
    #[must_use]
    pub fn from_payload(payload: &serde_json::Value) -> Option<Self> {
        let motion = payload.get("motion")?.as_str()?.to_string();
        let timestamp = payload.get("timestamp").and_then(serde_json::Value::as_f64);
        Some(Self { motion, timestamp })
    }

    /// The parsed tag, if the event carries a known one.
    #[must_use]
    pub fn tag(&self) -> Option<MotionTag> {
        self.motion.parse().ok()
    }
}

//! Auth grants: the server's per-user decision for viewing the tracker.

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// Read/write rights on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChannelPermissions {
    pub read: bool,
    pub write: bool,
}

/// Response body of `POST /get_pubnub_token`.
///
/// A missing `token` means no device subscription can be opened for this
/// user; `can_read = false` means one could, but the user may not view it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthGrant {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub can_read: bool,
    #[serde(default)]
    pub message: String,
}

/// What the dashboard should do with a grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantDecision {
    /// No token: show the server's message and stop.
    Unregistered { message: String },
    /// Token present but no read access.
    Unauthorized,
    /// Subscribe with this token, identified by the username.
    Authorized { token: String, username: String },
}

impl AuthGrant {
    /// A successful grant.
    #[must_use]
    pub fn granted(token: String, user_id: UserId, username: String, can_read: bool) -> Self {
        Self {
            token: Some(token),
            user_id: Some(user_id),
            username,
            can_read,
            message: "Access granted".to_string(),
        }
    }

    /// A refusal carrying a user-facing message.
    #[must_use]
    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Decide the dashboard transition. Token presence is checked first.
    #[must_use]
    pub fn decide(self) -> GrantDecision {
        match self.token {
            None => GrantDecision::Unregistered {
                message: self.message,
            },
            Some(_) if !self.can_read => GrantDecision::Unauthorized,
            Some(token) => GrantDecision::Authorized {
                token,
                username: self.username,
            },
        }
    }
}

/// Claims carried by a channel access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Owning user id.
    pub sub: String,
    /// The only client identifier allowed to use the token.
    pub uuid: String,
    /// Channel the token is scoped to.
    pub channel: String,
    pub read: bool,
    pub write: bool,
    /// Issued at (unix seconds).
    pub iat: i64,
    /// Expiration (unix seconds).
    pub exp: i64,
}

impl AccessClaims {
    #[must_use]
    pub fn permissions(&self) -> ChannelPermissions {
        ChannelPermissions {
            read: self.read,
            write: self.write,
        }
    }

    /// Whether these claims let `uuid` subscribe to `channel`.
    #[must_use]
    pub fn allows_subscribe(&self, channel: &str, uuid: &str) -> bool {
        self.read && self.channel == channel && self.uuid == uuid
    }
}

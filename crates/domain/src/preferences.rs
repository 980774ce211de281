//! Per-user website preferences.

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// Display and alert preferences, one row per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub user_id: UserId,
    pub light_mode: bool,
    pub disabled_alerts: bool,
}

impl Preferences {
    /// Defaults created alongside a new account.
    #[must_use]
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            light_mode: false,
            disabled_alerts: false,
        }
    }
}

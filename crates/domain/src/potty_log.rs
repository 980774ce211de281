//! Potty logs: manual entries recorded by the owner from the dashboard.

use serde::{Deserialize, Serialize};

use crate::error::{PottyError, ValidationError};
use crate::id::{PottyLogId, UserId};
use crate::time::{Timestamp, now};

/// Notes stored when the owner leaves the description empty.
pub const DEFAULT_NOTES: &str = "N/A";

/// Display format of the most recent log time on the dashboard.
pub const LAST_LOG_FORMAT: &str = "%b %d, %Y - %H:%M";

/// A recorded potty break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PottyLog {
    pub id: PottyLogId,
    pub user_id: UserId,
    pub potty_type: String,
    pub notes: String,
    pub logged_at: Timestamp,
}

impl PottyLog {
    /// Create a log stamped now.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingPottyType`] when `potty_type` is empty.
    pub fn record(
        user_id: UserId,
        potty_type: &str,
        notes: Option<&str>,
    ) -> Result<Self, PottyError> {
        if potty_type.trim().is_empty() {
            return Err(ValidationError::MissingPottyType.into());
        }
        Ok(Self {
            id: PottyLogId::new(),
            user_id,
            potty_type: potty_type.to_string(),
            notes: notes
                .filter(|n| !n.is_empty())
                .unwrap_or(DEFAULT_NOTES)
                .to_string(),
            logged_at: now(),
        })
    }

    /// `logged_at` in dashboard format, e.g. `Mar 09, 2024 - 14:05`.
    #[must_use]
    pub fn formatted_time(&self) -> String {
        self.logged_at.format(LAST_LOG_FORMAT).to_string()
    }
}

/// Dashboard summary for the current day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PottySummary {
    pub activity_count: usize,
    pub last_potty_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn should_default_notes_when_empty() {
        let log = PottyLog::record(UserId::new(), "pee", Some("")).unwrap();
        assert_eq!(log.notes, "N/A");
        let log = PottyLog::record(UserId::new(), "pee", None).unwrap();
        assert_eq!(log.notes, "N/A");
    }

    #[test]
    fn should_keep_provided_notes() {
        let log = PottyLog::record(UserId::new(), "poo", Some("after walk")).unwrap();
        assert_eq!(log.notes, "after walk");
    }

    #[test]
    fn should_require_potty_type() {
        let result = PottyLog::record(UserId::new(), "  ", None);
        assert!(matches!(
            result,
            Err(PottyError::Validation(ValidationError::MissingPottyType))
        ));
    }

    #[test]
    fn should_format_time_for_dashboard() {
        let mut log = PottyLog::record(UserId::new(), "pee", None).unwrap();
        log.logged_at = chrono::Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(log.formatted_time(), "Mar 09, 2024 - 14:05");
    }
}

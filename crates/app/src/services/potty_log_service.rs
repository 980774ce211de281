//! Potty log service: manual logs and the dashboard summary.

use chrono::NaiveDate;

use pottydog_domain::error::PottyError;
use pottydog_domain::id::UserId;
use pottydog_domain::potty_log::{PottyLog, PottySummary};
use pottydog_domain::time::{day_bounds, today};

use crate::ports::PottyLogRepository;

/// Logs of one user for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub logs: Vec<PottyLog>,
}

/// Application service for potty logs.
pub struct PottyLogService<LR> {
    repo: LR,
}

impl<LR: PottyLogRepository> PottyLogService<LR> {
    pub fn new(repo: LR) -> Self {
        Self { repo }
    }

    /// Record a potty break now. Empty notes are stored as `N/A`.
    ///
    /// # Errors
    ///
    /// Returns [`PottyError::Validation`] when `potty_type` is empty, or a
    /// storage error.
    pub async fn log(
        &self,
        user_id: UserId,
        potty_type: &str,
        notes: Option<&str>,
    ) -> Result<PottyLog, PottyError> {
        let log = PottyLog::record(user_id, potty_type, notes)?;
        let log = self.repo.create(log).await?;
        tracing::info!(user_id = %user_id, potty_type = %log.potty_type, "potty logged");
        Ok(log)
    }

    /// Today's log count and the time of the most recent log ever.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub async fn summary(&self, user_id: UserId) -> Result<PottySummary, PottyError> {
        let (from, to) = day_bounds(today());
        let activity_count = self.repo.find_in_range(user_id, from, to).await?.len();
        let last_potty_time = self
            .repo
            .latest_for_user(user_id)
            .await?
            .map(|log| log.formatted_time());
        Ok(PottySummary {
            activity_count,
            last_potty_time,
        })
    }

    /// Logs for `date`, or for today when `None`.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub async fn activity(
        &self,
        user_id: UserId,
        date: Option<NaiveDate>,
    ) -> Result<DailyActivity, PottyError> {
        let date = date.unwrap_or_else(today);
        let (from, to) = day_bounds(date);
        let logs = self.repo.find_in_range(user_id, from, to).await?;
        Ok(DailyActivity { date, logs })
    }
}

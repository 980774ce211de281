//! Settings service: profile and preference edits.

use pottydog_domain::error::{NotFoundError, PottyError};
use pottydog_domain::id::UserId;
use pottydog_domain::preferences::Preferences;
use pottydog_domain::user::{ProfileChange, ProfileChangeOutcome, User};

use crate::ports::{PreferencesRepository, UserRepository};

/// Application service behind the settings page.
pub struct SettingsService<UR, PR> {
    users: UR,
    preferences: PR,
}

impl<UR: UserRepository, PR: PreferencesRepository> SettingsService<UR, PR> {
    pub fn new(users: UR, preferences: PR) -> Self {
        Self { users, preferences }
    }

    /// Stored preferences of a user.
    ///
    /// # Errors
    ///
    /// Returns [`PottyError::NotFound`] when no row exists, or a storage error.
    pub async fn preferences(&self, user_id: UserId) -> Result<Preferences, PottyError> {
        self.preferences
            .get(user_id)
            .await?
            .ok_or_else(|| preferences_not_found(user_id))
    }

    /// Apply a username/dog-name edit; unchanged or rejected fields are skipped.
    ///
    /// Nothing is written when no field changes.
    ///
    /// # Errors
    ///
    /// Returns [`PottyError::NotFound`] for an unknown user, or a storage error.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        change: &ProfileChange,
    ) -> Result<(User, ProfileChangeOutcome), PottyError> {
        let mut user = self.users.get_by_id(user_id).await?.ok_or_else(|| {
            PottyError::from(NotFoundError {
                entity: "User",
                id: user_id.to_string(),
            })
        })?;

        let outcome = user.apply_profile_change(change);
        if !outcome.any() {
            return Ok((user, outcome));
        }
        let user = self.users.update(user).await?;
        tracing::info!(user_id = %user_id, "profile updated");
        Ok((user, outcome))
    }

    /// Overwrite both preference flags.
    ///
    /// # Errors
    ///
    /// Returns [`PottyError::NotFound`] when the user has no preferences row,
    /// or a storage error.
    pub async fn update_preferences(
        &self,
        user_id: UserId,
        light_mode: bool,
        disabled_alerts: bool,
    ) -> Result<Preferences, PottyError> {
        let mut preferences = self.preferences(user_id).await?;
        preferences.light_mode = light_mode;
        preferences.disabled_alerts = disabled_alerts;
        self.preferences.update(preferences).await
    }
}

fn preferences_not_found(user_id: UserId) -> PottyError {
    NotFoundError {
        entity: "Preferences",
        id: user_id.to_string(),
    }
    .into()
}

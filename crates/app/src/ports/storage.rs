//! Storage port: repository traits for persistence.

use std::future::Future;

use pottydog_domain::error::PottyError;
use pottydog_domain::id::UserId;
use pottydog_domain::potty_log::PottyLog;
use pottydog_domain::preferences::Preferences;
use pottydog_domain::time::Timestamp;
use pottydog_domain::user::User;

/// Repository for persisting and querying [`User`]s.
pub trait UserRepository {
    /// Create a new user in storage.
    fn create(&self, user: User) -> impl Future<Output = Result<User, PottyError>> + Send;

    /// Get a user by its unique identifier.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, PottyError>> + Send;

    /// Get a user by email address.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, PottyError>> + Send;

    /// All users that are not administrators, ordered by username.
    fn list_non_admin(&self) -> impl Future<Output = Result<Vec<User>, PottyError>> + Send;

    /// Update an existing user.
    fn update(&self, user: User) -> impl Future<Output = Result<User, PottyError>> + Send;
}

/// Repository for per-user [`Preferences`].
pub trait PreferencesRepository {
    /// Create the preferences row for a user.
    fn create(
        &self,
        preferences: Preferences,
    ) -> impl Future<Output = Result<Preferences, PottyError>> + Send;

    /// Get the preferences row of a user.
    fn get(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Preferences>, PottyError>> + Send;

    /// Overwrite the preferences row of a user.
    fn update(
        &self,
        preferences: Preferences,
    ) -> impl Future<Output = Result<Preferences, PottyError>> + Send;
}

/// Repository for [`PottyLog`] entries.
pub trait PottyLogRepository {
    /// Persist a new log.
    fn create(&self, log: PottyLog) -> impl Future<Output = Result<PottyLog, PottyError>> + Send;

    /// The most recent log of a user.
    fn latest_for_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<PottyLog>, PottyError>> + Send;

    /// Logs of a user with `from <= logged_at < to`, oldest first.
    fn find_in_range(
        &self,
        user_id: UserId,
        from: Timestamp,
        to: Timestamp,
    ) -> impl Future<Output = Result<Vec<PottyLog>, PottyError>> + Send;
}

//! `SQLite` implementation of [`PreferencesRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use pottydog_app::ports::PreferencesRepository;
use pottydog_domain::error::PottyError;
use pottydog_domain::id::UserId;
use pottydog_domain::preferences::Preferences;

use crate::error::StorageError;

struct Wrapper(Preferences);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let user_id: String = row.try_get("user_id")?;
        let user_id =
            UserId::from_str(&user_id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Preferences {
            user_id,
            light_mode: row.try_get("light_mode")?,
            disabled_alerts: row.try_get("disabled_alerts")?,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO preferences (user_id, light_mode, disabled_alerts) VALUES (?, ?, ?)";
const SELECT_BY_USER: &str = "SELECT * FROM preferences WHERE user_id = ?";
const UPDATE: &str = "UPDATE preferences SET light_mode = ?, disabled_alerts = ? WHERE user_id = ?";

/// `SQLite`-backed preferences repository.
#[derive(Clone)]
pub struct SqlitePreferencesRepository {
    pool: SqlitePool,
}

impl SqlitePreferencesRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PreferencesRepository for SqlitePreferencesRepository {
    fn create(
        &self,
        preferences: Preferences,
    ) -> impl Future<Output = Result<Preferences, PottyError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(preferences.user_id.to_string())
                .bind(preferences.light_mode)
                .bind(preferences.disabled_alerts)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(preferences)
        }
    }

    fn get(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Preferences>, PottyError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_USER)
                .bind(user_id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn update(
        &self,
        preferences: Preferences,
    ) -> impl Future<Output = Result<Preferences, PottyError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(preferences.light_mode)
                .bind(preferences.disabled_alerts)
                .bind(preferences.user_id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(preferences)
        }
    }
}

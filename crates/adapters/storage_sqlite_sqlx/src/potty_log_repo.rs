//! `SQLite` implementation of [`PottyLogRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use pottydog_app::ports::PottyLogRepository;
use pottydog_domain::error::PottyError;
use pottydog_domain::id::{PottyLogId, UserId};
use pottydog_domain::potty_log::PottyLog;
use pottydog_domain::time::Timestamp;

use crate::error::StorageError;
use crate::time;

struct Wrapper(PottyLog);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;
        let logged_at: String = row.try_get("logged_at")?;

        let id = PottyLogId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let user_id =
            UserId::from_str(&user_id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(PottyLog {
            id,
            user_id,
            potty_type: row.try_get("potty_type")?,
            notes: row.try_get("notes")?,
            logged_at: time::decode(&logged_at)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO potty_logs (id, user_id, potty_type, notes, logged_at)
    VALUES (?, ?, ?, ?, ?)
";
const SELECT_LATEST: &str =
    "SELECT * FROM potty_logs WHERE user_id = ? ORDER BY logged_at DESC LIMIT 1";
const SELECT_RANGE: &str = r"
    SELECT * FROM potty_logs
    WHERE user_id = ? AND logged_at >= ? AND logged_at < ?
    ORDER BY logged_at
";

/// `SQLite`-backed potty log repository.
#[derive(Clone)]
pub struct SqlitePottyLogRepository {
    pool: SqlitePool,
}

impl SqlitePottyLogRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PottyLogRepository for SqlitePottyLogRepository {
    fn create(&self, log: PottyLog) -> impl Future<Output = Result<PottyLog, PottyError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(log.id.to_string())
                .bind(log.user_id.to_string())
                .bind(&log.potty_type)
                .bind(&log.notes)
                .bind(time::encode(log.logged_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(log)
        }
    }

    fn latest_for_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<PottyLog>, PottyError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_LATEST)
                .bind(user_id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn find_in_range(
        &self,
        user_id: UserId,
        from: Timestamp,
        to: Timestamp,
    ) -> impl Future<Output = Result<Vec<PottyLog>, PottyError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RANGE)
                .bind(user_id.to_string())
                .bind(time::encode(from))
                .bind(time::encode(to))
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}

//! `SQLite` implementation of [`UserRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use pottydog_app::ports::UserRepository;
use pottydog_domain::error::{PottyError, ValidationError};
use pottydog_domain::id::UserId;
use pottydog_domain::user::User;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`User`].
struct Wrapper(User);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<User> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let id = UserId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(User {
            id,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            dog_name: row.try_get("dog_name")?,
            password_hash: row.try_get("password_hash")?,
            can_read: row.try_get("can_read")?,
            can_write: row.try_get("can_write")?,
            is_admin: row.try_get("is_admin")?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO users (id, username, email, dog_name, password_hash, can_read, can_write, is_admin)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM users WHERE id = ?";
const SELECT_BY_EMAIL: &str = "SELECT * FROM users WHERE email = ?";
const SELECT_NON_ADMIN: &str = "SELECT * FROM users WHERE is_admin = 0 ORDER BY username";
const UPDATE: &str = r"
    UPDATE users
    SET username = ?, email = ?, dog_name = ?, password_hash = ?, can_read = ?, can_write = ?, is_admin = ?
    WHERE id = ?
";

/// A concurrent registration may pass the email check and still lose the insert.
fn insert_error(err: sqlx::Error) -> PottyError {
    match &err {
        sqlx::Error::Database(db)
            if db.is_unique_violation() && db.message().contains("users.email") =>
        {
            ValidationError::EmailTaken.into()
        }
        _ => StorageError::from(err).into(),
    }
}

/// `SQLite`-backed user repository.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    fn create(&self, user: User) -> impl Future<Output = Result<User, PottyError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(user.id.to_string())
                .bind(&user.username)
                .bind(&user.email)
                .bind(&user.dog_name)
                .bind(&user.password_hash)
                .bind(user.can_read)
                .bind(user.can_write)
                .bind(user.is_admin)
                .execute(&pool)
                .await
                .map_err(insert_error)?;

            Ok(user)
        }
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, PottyError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, PottyError>> + Send {
        let pool = self.pool.clone();
        let email = email.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_EMAIL)
                .bind(email)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn list_non_admin(&self) -> impl Future<Output = Result<Vec<User>, PottyError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_NON_ADMIN)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, user: User) -> impl Future<Output = Result<User, PottyError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&user.username)
                .bind(&user.email)
                .bind(&user.dog_name)
                .bind(&user.password_hash)
                .bind(user.can_read)
                .bind(user.can_write)
                .bind(user.is_admin)
                .bind(user.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(user)
        }
    }
}

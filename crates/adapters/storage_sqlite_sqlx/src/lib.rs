//! # pottydog-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `pottydog-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `pottydog-app` (for port traits) and `pottydog-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod pool;
mod potty_log_repo;
mod preferences_repo;
mod time;
mod user_repo;

pub use error::StorageError;
pub use pool::{Config, Database};
pub use potty_log_repo::SqlitePottyLogRepository;
pub use preferences_repo::SqlitePreferencesRepository;
pub use user_repo::SqliteUserRepository;

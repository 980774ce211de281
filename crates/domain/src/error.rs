//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`PottyError`]
//! via `#[from]` or a dedicated `From` impl. No `String` variants.

use std::error::Error as StdError;

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum PottyError {
    /// A domain invariant was violated by user input.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A looked-up record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The caller is not allowed to perform the operation.
    #[error("access denied")]
    Denied(#[from] AccessDenied),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn StdError + Send + Sync>),

    /// The token issuer or the pub/sub transport failed.
    #[error("transport error")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),
}

/// Rejected user input. The display text is shown to end users as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields!")]
    MissingRequiredFields,

    #[error("Username must be 50 characters or fewer.")]
    UsernameTooLong,

    #[error("Dog name must be 25 characters or fewer.")]
    DogNameTooLong,

    #[error("Invalid email format.")]
    InvalidEmail,

    #[error(
        "Password must be at least 8 characters long and include at least one uppercase letter, one lowercase letter, one digit, and one special character."
    )]
    WeakPassword,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("An account with this email already exists.")]
    EmailTaken,

    #[error("Please enter a potty type!")]
    MissingPottyType,

    #[error("Invalid date, expected YYYY-MM-DD.")]
    InvalidDate,

    #[error("Invalid identifier.")]
    InvalidId,
}

/// A record of kind `entity` with identifier `id` was not found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// Why an operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("You are not authorised to use this page!")]
    NotAdmin,

    #[error("You do not have read access! Please contact the admin to have permissions changed!")]
    NoReadAccess,

    #[error("access token rejected")]
    InvalidToken,
}

//! Access adapter error types.

use pottydog_domain::error::{AccessDenied, PottyError};

/// Errors specific to the access adapter.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// Signing a token failed.
    #[error("failed to sign access token")]
    Sign(#[source] jsonwebtoken::errors::Error),

    /// A presented token is malformed, forged or expired.
    #[error("access token rejected")]
    Rejected(#[source] jsonwebtoken::errors::Error),

    /// Hashing a password failed.
    #[error("failed to hash password: {0}")]
    Hash(argon2::password_hash::Error),
}

impl From<AccessError> for PottyError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Rejected(_) => AccessDenied::InvalidToken.into(),
            other => PottyError::Transport(Box::new(other)),
        }
    }
}

//! Access port: channel tokens and password hashing.

use pottydog_domain::error::PottyError;
use pottydog_domain::grant::{AccessClaims, ChannelPermissions};
use pottydog_domain::id::UserId;

/// What a new access token should allow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequest {
    pub user_id: UserId,
    pub uuid: String,
    pub channel: String,
    pub permissions: ChannelPermissions,
    pub ttl_minutes: u32,
}

/// Issues and verifies channel access tokens.
pub trait AccessTokenIssuer {
    /// Issue a signed token for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`PottyError::Transport`] if the token cannot be produced.
    fn issue(&self, request: &AccessRequest) -> Result<String, PottyError>;

    /// Verify a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns [`PottyError::Denied`] if the token is malformed, forged or expired.
    fn verify(&self, token: &str) -> Result<AccessClaims, PottyError>;
}

/// One-way password hashing.
pub trait PasswordHasher {
    /// Hash a plain-text password with a fresh salt.
    ///
    /// # Errors
    ///
    /// Returns [`PottyError::Transport`] if hashing fails.
    fn hash(&self, password: &str) -> Result<String, PottyError>;

    /// Whether `password` matches the stored `hash`. Malformed hashes never match.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

impl<T: AccessTokenIssuer> AccessTokenIssuer for std::sync::Arc<T> {
    fn issue(&self, request: &AccessRequest) -> Result<String, PottyError> {
        (**self).issue(request)
    }

    fn verify(&self, token: &str) -> Result<AccessClaims, PottyError> {
        (**self).verify(token)
    }
}

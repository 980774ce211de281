//! Grant service: per-user access to the real-time channel.

use pottydog_domain::channel::dashboard_uuid;
use pottydog_domain::error::{AccessDenied, NotFoundError, PottyError};
use pottydog_domain::grant::{AccessClaims, AuthGrant};
use pottydog_domain::id::UserId;

use crate::ports::{AccessRequest, AccessTokenIssuer, UserRepository};

/// Issues and checks channel access tokens for dashboard sessions.
///
/// Every token is scoped to one channel and to the `dashboard-<username>`
/// identifier of the session it was issued for, carrying the user's stored
/// read/write permissions at issue time.
pub struct GrantService<UR, TI> {
    users: UR,
    issuer: TI,
    channel: String,
    ttl_minutes: u32,
}

impl<UR: UserRepository, TI: AccessTokenIssuer> GrantService<UR, TI> {
    pub fn new(users: UR, issuer: TI, channel: impl Into<String>, ttl_minutes: u32) -> Self {
        Self {
            users,
            issuer,
            channel: channel.into(),
            ttl_minutes,
        }
    }

    /// The channel tokens are scoped to.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Build the grant for a logged-in user.
    ///
    /// A token is issued even when the user may not read; the dashboard
    /// uses `can_read` to tell the user why they see nothing.
    ///
    /// # Errors
    ///
    /// - [`PottyError::NotFound`] when the user no longer exists
    /// - [`PottyError::Transport`] when the token cannot be issued
    /// - a storage error from the repository
    pub async fn grant(&self, user_id: UserId) -> Result<AuthGrant, PottyError> {
        let user = self.users.get_by_id(user_id).await?.ok_or_else(|| {
            PottyError::from(NotFoundError {
                entity: "User",
                id: user_id.to_string(),
            })
        })?;

        let request = AccessRequest {
            user_id: user.id,
            uuid: dashboard_uuid(&user.username),
            channel: self.channel.clone(),
            permissions: user.permissions(),
            ttl_minutes: self.ttl_minutes,
        };
        let token = self.issuer.issue(&request)?;
        tracing::debug!(user_id = %user.id, uuid = %request.uuid, "channel token issued");

        Ok(AuthGrant::granted(
            token,
            user.id,
            user.username,
            user.can_read,
        ))
    }

    /// Check that `token` lets `uuid` subscribe to `channel`.
    ///
    /// # Errors
    ///
    /// - [`AccessDenied::InvalidToken`] for a bad token or one scoped elsewhere
    /// - [`AccessDenied::NoReadAccess`] when the token does not grant read
    pub fn verify_subscription(
        &self,
        token: &str,
        channel: &str,
        uuid: &str,
    ) -> Result<AccessClaims, PottyError> {
        let claims = self.issuer.verify(token)?;
        if claims.channel != channel || claims.uuid != uuid {
            return Err(AccessDenied::InvalidToken.into());
        }
        if !claims.allows_subscribe(channel, uuid) {
            return Err(AccessDenied::NoReadAccess.into());
        }
        Ok(claims)
    }
}

//! Permission service: administrators granting channel rights.

use pottydog_domain::channel::{ChannelMessage, PermissionsChanged};
use pottydog_domain::error::{AccessDenied, NotFoundError, PottyError};
use pottydog_domain::grant::ChannelPermissions;
use pottydog_domain::id::UserId;
use pottydog_domain::user::User;

use crate::ports::{ChannelPublisher, UserRepository};

/// Result of a bulk permission update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionUpdate {
    /// Number of users whose permissions actually changed.
    pub changed: usize,
    /// Every non-admin user after the update.
    pub members: Vec<User>,
}

impl PermissionUpdate {
    /// Confirmation shown on the admin dashboard.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self.changed {
            0 => "No changes were made!",
            1 => "Successfully changed permissions of selected user!",
            _ => "Successfully changed permissions of selected users!",
        }
    }
}

/// Application service behind the admin dashboard.
pub struct PermissionService<UR, CP> {
    users: UR,
    publisher: CP,
    channel: String,
}

impl<UR: UserRepository, CP: ChannelPublisher> PermissionService<UR, CP> {
    pub fn new(users: UR, publisher: CP, channel: impl Into<String>) -> Self {
        Self {
            users,
            publisher,
            channel: channel.into(),
        }
    }

    /// Re-check against storage that `user_id` is an administrator.
    ///
    /// # Errors
    ///
    /// Returns [`PottyError::NotFound`] for an unknown user and
    /// [`AccessDenied::NotAdmin`] for a non-administrator.
    pub async fn require_admin(&self, user_id: UserId) -> Result<User, PottyError> {
        let user = self.users.get_by_id(user_id).await?.ok_or_else(|| {
            PottyError::from(NotFoundError {
                entity: "User",
                id: user_id.to_string(),
            })
        })?;
        if !user.is_admin {
            return Err(AccessDenied::NotAdmin.into());
        }
        Ok(user)
    }

    /// All non-admin users, as listed on the admin dashboard.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub async fn list_members(&self) -> Result<Vec<User>, PottyError> {
        self.users.list_non_admin().await
    }

    /// Set every non-admin user's permissions to `requested(id)`.
    ///
    /// Only users whose permissions differ are written, and each of them
    /// triggers one [`PermissionsChanged`] notice on the channel.
    ///
    /// # Errors
    ///
    /// Returns a storage or publish error; users processed before the
    /// failure keep their new permissions.
    pub async fn update_permissions<F>(&self, requested: F) -> Result<PermissionUpdate, PottyError>
    where
        F: Fn(UserId) -> ChannelPermissions,
    {
        let mut changed = 0;
        for mut user in self.users.list_non_admin().await? {
            let wanted = requested(user.id);
            if wanted == user.permissions() {
                continue;
            }
            user.can_read = wanted.read;
            user.can_write = wanted.write;
            let user = self.users.update(user).await?;
            changed += 1;

            let notice = PermissionsChanged::new(wanted.read, wanted.write);
            self.publisher
                .publish(ChannelMessage::new(&self.channel, notice.to_payload()))
                .await?;
            tracing::info!(
                user_id = %user.id,
                can_read = wanted.read,
                can_write = wanted.write,
                "permissions changed"
            );
        }

        let members = self.users.list_non_admin().await?;
        Ok(PermissionUpdate { changed, members })
    }
}

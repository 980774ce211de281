//! Shared application state for axum handlers.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use pottydog_app::channel_hub::InProcessChannelHub;
use pottydog_app::ports::{
    AccessTokenIssuer, PasswordHasher, PottyLogRepository, PreferencesRepository, UserRepository,
};
use pottydog_app::services::account_service::AccountService;
use pottydog_app::services::grant_service::GrantService;
use pottydog_app::services::permission_service::PermissionService;
use pottydog_app::services::potty_log_service::PottyLogService;
use pottydog_app::services::settings_service::SettingsService;

use crate::session::SessionStore;

/// Publisher handed to services that notify the channel.
pub type HubPublisher = Arc<InProcessChannelHub>;

/// Application state shared across all axum handlers.
///
/// Generic over the user, preferences and potty-log repositories, the token
/// issuer and the password hasher to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`: only the `Arc` wrappers are cloned.
pub struct AppState<UR, PR, LR, TI, PH> {
    /// Registration and login.
    pub accounts: Arc<AccountService<UR, PR, PH>>,
    /// Channel access tokens.
    pub grants: Arc<GrantService<UR, TI>>,
    /// Admin permission management.
    pub permissions: Arc<PermissionService<UR, HubPublisher>>,
    /// Manual potty logs.
    pub potty_logs: Arc<PottyLogService<LR>>,
    /// Profile and preferences.
    pub settings: Arc<SettingsService<UR, PR>>,
    /// Fan-out point the channel stream subscribes to.
    pub hub: HubPublisher,
    /// Logged-in browser sessions.
    pub sessions: Arc<SessionStore>,
    /// Cancelled when the server starts shutting down; ends open streams.
    pub shutdown: CancellationToken,
}

impl<UR, PR, LR, TI, PH> Clone for AppState<UR, PR, LR, TI, PH> {
    fn clone(&self) -> Self {
        Self {
            accounts: Arc::clone(&self.accounts),
            grants: Arc::clone(&self.grants),
            permissions: Arc::clone(&self.permissions),
            potty_logs: Arc::clone(&self.potty_logs),
            settings: Arc::clone(&self.settings),
            hub: Arc::clone(&self.hub),
            sessions: Arc::clone(&self.sessions),
            shutdown: self.shutdown.clone(),
        }
    }
}

/// Everything needed to build an [`AppState`].
pub struct Services<UR, PR, LR, TI, PH> {
    pub accounts: AccountService<UR, PR, PH>,
    pub grants: GrantService<UR, TI>,
    pub permissions: PermissionService<UR, HubPublisher>,
    pub potty_logs: PottyLogService<LR>,
    pub settings: SettingsService<UR, PR>,
}

impl<UR, PR, LR, TI, PH> AppState<UR, PR, LR, TI, PH>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PreferencesRepository + Send + Sync + 'static,
    LR: PottyLogRepository + Send + Sync + 'static,
    TI: AccessTokenIssuer + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        services: Services<UR, PR, LR, TI, PH>,
        hub: HubPublisher,
        sessions: SessionStore,
    ) -> Self {
        Self {
            accounts: Arc::new(services.accounts),
            grants: Arc::new(services.grants),
            permissions: Arc::new(services.permissions),
            potty_logs: Arc::new(services.potty_logs),
            settings: Arc::new(services.settings),
            hub,
            sessions: Arc::new(sessions),
            shutdown: CancellationToken::new(),
        }
    }

    /// Use `shutdown` to end long-lived responses when the server stops.
    #[must_use]
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }
}

//! JSON and streaming endpoints used by the browser client.

#[allow(clippy::missing_errors_doc)]
pub mod grant;
#[allow(clippy::missing_errors_doc)]
pub mod stream;

use axum::Router;
use axum::routing::get;

use pottydog_app::ports::{
    AccessTokenIssuer, PasswordHasher, PottyLogRepository, PreferencesRepository, UserRepository,
};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<UR, PR, LR, TI, PH>() -> Router<AppState<UR, PR, LR, TI, PH>>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PreferencesRepository + Send + Sync + 'static,
    LR: PottyLogRepository + Send + Sync + 'static,
    TI: AccessTokenIssuer + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    Router::new().route(
        "/channels/{channel}/stream",
        get(stream::stream::<UR, PR, LR, TI, PH>),
    )
}

//! Server-side rendered HTML pages.
//!
//! Forms use POST and either redirect on success or re-render the page with
//! the message and status code of the failure.

#[allow(clippy::missing_errors_doc)]
pub mod admin;
#[allow(clippy::missing_errors_doc)]
pub mod auth;
pub mod home;
#[allow(clippy::missing_errors_doc)]
pub mod settings;
#[allow(clippy::missing_errors_doc)]
pub mod tracker;

use askama::Template;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};

use pottydog_app::ports::{
    AccessTokenIssuer, PasswordHasher, PottyLogRepository, PreferencesRepository, UserRepository,
};

use crate::error::PageError;
use crate::state::AppState;

/// Build the sub-router for SSR HTML pages.
pub fn routes<UR, PR, LR, TI, PH>() -> Router<AppState<UR, PR, LR, TI, PH>>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PreferencesRepository + Send + Sync + 'static,
    LR: PottyLogRepository + Send + Sync + 'static,
    TI: AccessTokenIssuer + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(home::index::<UR, PR, LR, TI, PH>))
        .route("/protected", get(home::protected))
        .route("/unavailable", get(home::unavailable))
        // Accounts
        .route(
            "/register",
            get(auth::register_page).post(auth::register::<UR, PR, LR, TI, PH>),
        )
        .route(
            "/login",
            get(auth::login_page).post(auth::login::<UR, PR, LR, TI, PH>),
        )
        .route(
            "/admin-login",
            get(auth::admin_login_page).post(auth::admin_login::<UR, PR, LR, TI, PH>),
        )
        .route("/logout", post(auth::logout::<UR, PR, LR, TI, PH>))
        // Tracker
        .route("/dashboard", get(tracker::dashboard::<UR, PR, LR, TI, PH>))
        .route(
            "/dashboard/potty-logs",
            post(tracker::create_log::<UR, PR, LR, TI, PH>),
        )
        .route(
            "/potty-activity",
            get(tracker::activity::<UR, PR, LR, TI, PH>),
        )
        // Administration
        .route(
            "/admin-dashboard",
            get(admin::dashboard::<UR, PR, LR, TI, PH>),
        )
        .route(
            "/admin-dashboard/permissions",
            post(admin::update_permissions::<UR, PR, LR, TI, PH>),
        )
        // Settings
        .route("/settings", get(settings::page::<UR, PR, LR, TI, PH>))
        .route(
            "/settings/credentials",
            post(settings::update_credentials::<UR, PR, LR, TI, PH>),
        )
        .route(
            "/settings/preferences",
            post(settings::update_preferences::<UR, PR, LR, TI, PH>),
        )
}

/// Render `page` with `status`, falling back to the 500 page.
pub(crate) fn render<T: Template>(status: StatusCode, page: &T) -> Response {
    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to render page");
            PageError::server_error().into_response()
        }
    }
}

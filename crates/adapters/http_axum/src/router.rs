//! Axum router assembly.

use std::path::PathBuf;

use axum::Router;
use axum::extract::Request;
use axum::routing::{get, post};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use pottydog_app::ports::{
    AccessTokenIssuer, PasswordHasher, PottyLogRepository, PreferencesRepository, UserRepository,
};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Merges the HTML pages at `/`, the token endpoint, the channel streams
/// under `/api` and, when `static_dir` is set, the assets under `/static`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level, without the query string.
pub fn build<UR, PR, LR, TI, PH>(
    state: AppState<UR, PR, LR, TI, PH>,
    static_dir: Option<PathBuf>,
) -> Router
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PreferencesRepository + Send + Sync + 'static,
    LR: PottyLogRepository + Send + Sync + 'static,
    TI: AccessTokenIssuer + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    let mut router: Router<AppState<UR, PR, LR, TI, PH>> = Router::new()
        .route("/health", get(health_check))
        .route(
            "/get_pubnub_token",
            post(crate::api::grant::issue::<UR, PR, LR, TI, PH>),
        )
        .nest("/api", crate::api::routes())
        .merge(crate::pages::routes());

    if let Some(dir) = static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}

/// Span of one request. The query is left out: stream URLs carry the access token.
fn request_span(request: &Request) -> tracing::Span {
    tracing::debug_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        version = ?request.version(),
    )
}

async fn health_check() -> &'static str {
    "OK"
}

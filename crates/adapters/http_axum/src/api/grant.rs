//! `POST /get_pubnub_token`: the channel access grant of the logged-in user.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;

use pottydog_app::ports::{
    AccessTokenIssuer, PasswordHasher, PottyLogRepository, PreferencesRepository, UserRepository,
};
use pottydog_domain::error::PottyError;
use pottydog_domain::grant::AuthGrant;

use crate::state::AppState;

const USER_GONE: &str = "Could not generate token! Please try again.";
const ISSUE_FAILED: &str = "Could not generate token. Please try again.";

fn refused(status: StatusCode, message: &str) -> Response {
    (status, Json(AuthGrant::refused(message))).into_response()
}

/// Every outcome is a JSON [`AuthGrant`]; only a 200 carries a token.
pub async fn issue<UR, PR, LR, TI, PH>(
    State(state): State<AppState<UR, PR, LR, TI, PH>>,
    jar: CookieJar,
) -> Response
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PreferencesRepository + Send + Sync + 'static,
    LR: PottyLogRepository + Send + Sync + 'static,
    TI: AccessTokenIssuer + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    let Some(session) = state.sessions.current(&jar) else {
        return refused(StatusCode::UNAUTHORIZED, "Unauthorized");
    };

    match state.grants.grant(session.user_id).await {
        Ok(grant) => (StatusCode::OK, Json(grant)).into_response(),
        Err(PottyError::NotFound(_)) => refused(StatusCode::NOT_FOUND, USER_GONE),
        Err(PottyError::Transport(err)) => {
            tracing::error!(error = %err, user_id = %session.user_id, "token issuance failed");
            refused(StatusCode::UNAUTHORIZED, ISSUE_FAILED)
        }
        Err(err) => {
            tracing::error!(error = %err, user_id = %session.user_id, "grant lookup failed");
            refused(StatusCode::INTERNAL_SERVER_ERROR, ISSUE_FAILED)
        }
    }
}

//! Landing page and static informational pages.

use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use pottydog_app::ports::{
    AccessTokenIssuer, PasswordHasher, PottyLogRepository, PreferencesRepository, UserRepository,
};

use super::render;
use crate::error::{PageError, ProtectedTemplate};
use crate::state::AppState;

/// Who is greeted on the landing page.
pub struct Greeting {
    pub username: String,
    pub dog_name: Option<String>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub greeting: Option<Greeting>,
}

#[derive(Template)]
#[template(path = "unavailable.html")]
pub struct UnavailableTemplate;

/// `GET /`: landing page.
///
/// A session whose user was deleted is dropped and sent back to login.
pub async fn index<UR, PR, LR, TI, PH>(
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
        return render(StatusCode::OK, &IndexTemplate { greeting: None });
    };

    match state.accounts.find_user(session.user_id).await {
        Ok(Some(_)) => render(
            StatusCode::OK,
            &IndexTemplate {
                greeting: Some(Greeting {
                    username: session.username,
                    dog_name: session.dog_name,
                }),
            },
        ),
        Ok(None) => {
            tracing::info!(user_id = %session.user_id, "session for deleted user dropped");
            (state.sessions.end(jar), Redirect::to("/login")).into_response()
        }
        Err(err) => PageError::from(err).into_response(),
    }
}

/// `GET /protected`: bare status page.
pub async fn protected() -> Response {
    render(
        StatusCode::OK,
        &ProtectedTemplate {
            status_code: None,
            title: "Protected".to_string(),
            message: "You need the right permissions to see this content.".to_string(),
        },
    )
}

/// `GET /unavailable`: placeholder for features not built yet.
pub async fn unavailable() -> Response {
    render(StatusCode::OK, &UnavailableTemplate)
}

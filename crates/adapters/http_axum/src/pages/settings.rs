//! Settings page: profile edits and display preferences.

use askama::Template;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use pottydog_app::ports::{
    AccessTokenIssuer, PasswordHasher, PottyLogRepository, PreferencesRepository, UserRepository,
};
use pottydog_domain::error::PottyError;
use pottydog_domain::user::ProfileChange;

use super::render;
use crate::error::PageError;
use crate::session::Session;
use crate::state::AppState;

#[derive(Template, Default)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub username: String,
    pub dog_name: String,
    pub light_mode: bool,
    pub disabled_alerts: bool,
    pub profile_success: Option<String>,
    pub preferences_success: Option<String>,
    pub error: Option<String>,
}

impl From<&Session> for SettingsTemplate {
    fn from(session: &Session) -> Self {
        Self {
            username: session.username.clone(),
            dog_name: session.dog_name.clone().unwrap_or_default(),
            light_mode: session.light_mode,
            disabled_alerts: session.disabled_alerts,
            ..Self::default()
        }
    }
}

/// Checkboxes are only sent when ticked.
#[derive(Debug, Default, Deserialize)]
pub struct PreferencesForm {
    pub light_mode: Option<String>,
    pub disabled_alerts: Option<String>,
}

/// `GET /settings`
pub async fn page<UR, PR, LR, TI, PH>(
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
    match state.sessions.current(&jar) {
        Some(session) => render(StatusCode::OK, &SettingsTemplate::from(&session)),
        None => Redirect::to("/login").into_response(),
    }
}

/// `POST /settings/credentials`
pub async fn update_credentials<UR, PR, LR, TI, PH>(
    State(state): State<AppState<UR, PR, LR, TI, PH>>,
    jar: CookieJar,
    Form(change): Form<ProfileChange>,
) -> Response
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PreferencesRepository + Send + Sync + 'static,
    LR: PottyLogRepository + Send + Sync + 'static,
    TI: AccessTokenIssuer + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    let Some(session) = state.sessions.current(&jar) else {
        return Redirect::to("/login").into_response();
    };

    match state.settings.update_profile(session.user_id, &change).await {
        Ok((user, outcome)) => {
            let message = if outcome.any() {
                "Succesfully saved changes!"
            } else {
                "No changes were made!"
            };
            state.sessions.update(&jar, |s| {
                s.username.clone_from(&user.username);
                s.dog_name.clone_from(&user.dog_name);
            });
            let mut page = SettingsTemplate::from(&session);
            page.username = user.username;
            page.dog_name = user.dog_name.unwrap_or_default();
            page.profile_success = Some(message.to_string());
            render(StatusCode::OK, &page)
        }
        Err(PottyError::NotFound(_)) => Redirect::to("/login").into_response(),
        Err(err) => PageError::from(err).into_response(),
    }
}

/// `POST /settings/preferences`
pub async fn update_preferences<UR, PR, LR, TI, PH>(
    State(state): State<AppState<UR, PR, LR, TI, PH>>,
    jar: CookieJar,
    Form(form): Form<PreferencesForm>,
) -> Response
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PreferencesRepository + Send + Sync + 'static,
    LR: PottyLogRepository + Send + Sync + 'static,
    TI: AccessTokenIssuer + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    let Some(session) = state.sessions.current(&jar) else {
        return Redirect::to("/login").into_response();
    };

    let light_mode = form.light_mode.is_some();
    let disabled_alerts = form.disabled_alerts.is_some();
    match state
        .settings
        .update_preferences(session.user_id, light_mode, disabled_alerts)
        .await
    {
        Ok(preferences) => {
            state.sessions.update(&jar, |s| {
                s.light_mode = preferences.light_mode;
                s.disabled_alerts = preferences.disabled_alerts;
            });
            let mut page = SettingsTemplate::from(&session);
            page.light_mode = preferences.light_mode;
            page.disabled_alerts = preferences.disabled_alerts;
            page.preferences_success = Some("Successfully saved preferences!".to_string());
            render(StatusCode::OK, &page)
        }
        Err(PottyError::NotFound(_)) => {
            let mut page = SettingsTemplate::from(&session);
            page.error = Some("Error fetching preferences. Please try again!".to_string());
            render(StatusCode::NOT_FOUND, &page)
        }
        Err(err) => PageError::from(err).into_response(),
    }
}

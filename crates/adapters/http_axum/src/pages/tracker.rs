//! Owner dashboard, manual potty logs and the daily activity page.

use askama::Template;
use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use chrono::NaiveDate;
use serde::Deserialize;

use pottydog_app::ports::{
    AccessTokenIssuer, PasswordHasher, PottyLogRepository, PreferencesRepository, UserRepository,
};
use pottydog_domain::error::{AccessDenied, PottyError, ValidationError};
use pottydog_domain::potty_log::PottySummary;
use pottydog_domain::status::{
    CARD_ELEMENT_ID, IMAGE_ELEMENT_ID, PLACEHOLDER_ELEMENT_ID, TEXT_ELEMENT_ID,
};

use super::render;
use crate::error::PageError;
use crate::session::Session;
use crate::state::AppState;

const ACTIVITY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Ids of the status widget elements, shared with the browser client.
pub struct WidgetIds {
    pub card: &'static str,
    pub image: &'static str,
    pub text: &'static str,
    pub placeholder: &'static str,
}

const WIDGET_IDS: WidgetIds = WidgetIds {
    card: CARD_ELEMENT_ID,
    image: IMAGE_ELEMENT_ID,
    text: TEXT_ELEMENT_ID,
    placeholder: PLACEHOLDER_ELEMENT_ID,
};

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub username: String,
    pub dog_name: String,
    pub can_read: bool,
    pub can_write: bool,
    pub light_mode: bool,
    pub activity_count: usize,
    pub last_potty_time: Option<String>,
    pub channel: String,
    pub widget: WidgetIds,
    pub error: Option<String>,
}

impl DashboardTemplate {
    fn new(session: Session, summary: PottySummary, channel: &str) -> Self {
        Self {
            username: session.username,
            dog_name: session.dog_name.unwrap_or_default(),
            can_read: session.can_read,
            can_write: session.can_write,
            light_mode: session.light_mode,
            activity_count: summary.activity_count,
            last_potty_time: summary.last_potty_time,
            channel: channel.to_string(),
            widget: WIDGET_IDS,
            error: None,
        }
    }
}

/// One row of the activity table.
pub struct ActivityRow {
    pub time: String,
    pub potty_type: String,
    pub notes: String,
}

#[derive(Template)]
#[template(path = "potty_activity.html")]
pub struct PottyActivityTemplate {
    pub username: String,
    pub light_mode: bool,
    pub date: String,
    pub rows: Vec<ActivityRow>,
}

/// Form body of `POST /dashboard/potty-logs`.
#[derive(Debug, Deserialize)]
pub struct PottyLogForm {
    #[serde(default)]
    pub potty_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub date: Option<String>,
}

/// Parse `YYYY-MM-DD`; an absent or empty value means today.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] for any other shape.
pub fn parse_activity_date(raw: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, ACTIVITY_DATE_FORMAT)
            .map(Some)
            .map_err(|_| ValidationError::InvalidDate),
    }
}

/// `GET /dashboard`
pub async fn dashboard<UR, PR, LR, TI, PH>(
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
        return Redirect::to("/login").into_response();
    };

    match state.potty_logs.summary(session.user_id).await {
        Ok(summary) => render(
            StatusCode::OK,
            &DashboardTemplate::new(session, summary, state.grants.channel()),
        ),
        Err(err) => PageError::from(err).into_response(),
    }
}

/// `POST /dashboard/potty-logs`
pub async fn create_log<UR, PR, LR, TI, PH>(
    State(state): State<AppState<UR, PR, LR, TI, PH>>,
    jar: CookieJar,
    Form(form): Form<PottyLogForm>,
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

    let result = state
        .potty_logs
        .log(
            session.user_id,
            &form.potty_type,
            form.description.as_deref(),
        )
        .await;

    match result {
        Ok(_) => Redirect::to("/dashboard").into_response(),
        Err(PottyError::Validation(err)) => {
            let summary = match state.potty_logs.summary(session.user_id).await {
                Ok(summary) => summary,
                Err(err) => return PageError::from(err).into_response(),
            };
            let mut page = DashboardTemplate::new(session, summary, state.grants.channel());
            page.error = Some(err.to_string());
            render(StatusCode::BAD_REQUEST, &page)
        }
        Err(err) => PageError::from(err).into_response(),
    }
}

/// `GET /potty-activity?date=YYYY-MM-DD`
pub async fn activity<UR, PR, LR, TI, PH>(
    State(state): State<AppState<UR, PR, LR, TI, PH>>,
    jar: CookieJar,
    Query(query): Query<ActivityQuery>,
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
    if !session.can_read {
        return PageError::new(
            StatusCode::UNAUTHORIZED,
            "Unauthorised!",
            AccessDenied::NoReadAccess.to_string(),
        )
        .into_response();
    }

    let date = match parse_activity_date(query.date.as_deref()) {
        Ok(date) => date,
        Err(err) => return PageError::from(PottyError::from(err)).into_response(),
    };

    match state.potty_logs.activity(session.user_id, date).await {
        Ok(activity) => {
            let rows = activity
                .logs
                .into_iter()
                .map(|log| ActivityRow {
                    time: log.logged_at.format("%H:%M").to_string(),
                    potty_type: log.potty_type,
                    notes: log.notes,
                })
                .collect();
            render(
                StatusCode::OK,
                &PottyActivityTemplate {
                    username: session.username,
                    light_mode: session.light_mode,
                    date: activity.date.format(ACTIVITY_DATE_FORMAT).to_string(),
                    rows,
                },
            )
        }
        Err(err) => PageError::from(err).into_response(),
    }
}

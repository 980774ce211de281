//! Registration, login, admin login and logout.

use askama::Template;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use pottydog_app::ports::{
    AccessTokenIssuer, PasswordHasher, PottyLogRepository, PreferencesRepository, UserRepository,
};
use pottydog_domain::error::{AccessDenied, PottyError};
use pottydog_domain::user::Registration;

use super::render;
use crate::error::PageError;
use crate::session::Session;
use crate::state::AppState;

const MISSING_PREFERENCES: &str = "Could not get all info. Please try again!";
const ADMIN_BAD_CREDENTIALS: &str = "Incorrect email or password!";

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin_login.html")]
pub struct AdminLoginTemplate {
    pub error: Option<String>,
}

/// Form body of both login pages.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn register_page() -> Response {
    render(StatusCode::OK, &RegisterTemplate { error: None })
}

/// `POST /register`
pub async fn register<UR, PR, LR, TI, PH>(
    State(state): State<AppState<UR, PR, LR, TI, PH>>,
    Form(form): Form<Registration>,
) -> Response
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PreferencesRepository + Send + Sync + 'static,
    LR: PottyLogRepository + Send + Sync + 'static,
    TI: AccessTokenIssuer + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    match state.accounts.register(&form).await {
        Ok(_) => Redirect::to("/login").into_response(),
        Err(PottyError::Validation(err)) => render(
            StatusCode::BAD_REQUEST,
            &RegisterTemplate {
                error: Some(err.to_string()),
            },
        ),
        Err(err) => PageError::from(err).into_response(),
    }
}

pub async fn login_page() -> Response {
    render(StatusCode::OK, &LoginTemplate { error: None })
}

/// `POST /login`
pub async fn login<UR, PR, LR, TI, PH>(
    State(state): State<AppState<UR, PR, LR, TI, PH>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PreferencesRepository + Send + Sync + 'static,
    LR: PottyLogRepository + Send + Sync + 'static,
    TI: AccessTokenIssuer + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    let failure = |status: StatusCode, message: String| {
        render(
            status,
            &LoginTemplate {
                error: Some(message),
            },
        )
    };

    match state.accounts.login(&form.email, &form.password).await {
        Ok(outcome) => {
            let jar = state.sessions.start(jar, Session::for_owner(&outcome));
            (jar, Redirect::to("/dashboard")).into_response()
        }
        Err(PottyError::Validation(err)) => failure(StatusCode::BAD_REQUEST, err.to_string()),
        Err(PottyError::Denied(err)) => failure(StatusCode::UNAUTHORIZED, err.to_string()),
        Err(PottyError::NotFound(_)) => {
            failure(StatusCode::NOT_FOUND, MISSING_PREFERENCES.to_string())
        }
        Err(err) => PageError::from(err).into_response(),
    }
}

pub async fn admin_login_page() -> Response {
    render(StatusCode::OK, &AdminLoginTemplate { error: None })
}

/// `POST /admin-login`
pub async fn admin_login<UR, PR, LR, TI, PH>(
    State(state): State<AppState<UR, PR, LR, TI, PH>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PreferencesRepository + Send + Sync + 'static,
    LR: PottyLogRepository + Send + Sync + 'static,
    TI: AccessTokenIssuer + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    let failure = |status: StatusCode, message: String| {
        render(
            status,
            &AdminLoginTemplate {
                error: Some(message),
            },
        )
    };

    match state.accounts.admin_login(&form.email, &form.password).await {
        Ok(admin) => {
            let jar = state.sessions.start(jar, Session::for_admin(&admin));
            (jar, Redirect::to("/admin-dashboard")).into_response()
        }
        Err(PottyError::Validation(err)) => failure(StatusCode::BAD_REQUEST, err.to_string()),
        Err(PottyError::Denied(AccessDenied::InvalidCredentials)) => {
            failure(StatusCode::UNAUTHORIZED, ADMIN_BAD_CREDENTIALS.to_string())
        }
        Err(PottyError::Denied(err)) => failure(StatusCode::UNAUTHORIZED, err.to_string()),
        Err(err) => PageError::from(err).into_response(),
    }
}

/// `POST /logout`
pub async fn logout<UR, PR, LR, TI, PH>(
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
    (state.sessions.end(jar), Redirect::to("/")).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::{StatusCode, header};
    use tower::ServiceExt;

    use crate::pages::test_support::{body_text, fixture, location, post_form};
    use crate::router::build;
    use crate::session::SESSION_COOKIE;

    #[tokio::test]
    async fn should_redirect_to_login_when_registration_valid() {
        let fx = fixture();
        let users = fx.users.clone();
        let body = "username=alice&email=alice%40example.com&dog_name=Rex&password=Secret1%21&confirm_password=Secret1%21";

        let response = build(fx.state, None)
            .oneshot(post_form("/register", body, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        assert_eq!(users.0.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_show_message_when_passwords_differ() {
        let fx = fixture();
        let body = "username=alice&email=alice%40example.com&password=Secret1%21&confirm_password=Other1%21";

        let response = build(fx.state, None)
            .oneshot(post_form("/register", body, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("Passwords do not match."));
    }

    #[tokio::test]
    async fn should_start_session_when_login_succeeds() {
        let fx = fixture();
        fx.owner("alice", "alice@example.com", true);

        let response = build(fx.state, None)
            .oneshot(post_form(
                "/login",
                "email=alice%40example.com&password=Secret1%21",
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/dashboard");
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(cookie.starts_with(SESSION_COOKIE));
        assert!(cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn should_return_unauthorized_when_password_wrong() {
        let fx = fixture();
        fx.owner("alice", "alice@example.com", true);

        let response = build(fx.state, None)
            .oneshot(post_form(
                "/login",
                "email=alice%40example.com&password=nope",
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response).await.contains("Invalid email or password."));
    }

    #[tokio::test]
    async fn should_return_not_found_when_preferences_missing() {
        let fx = fixture();
        let user = fx.owner("alice", "alice@example.com", true);
        fx.prefs.0.lock().unwrap().remove(&user.id);

        let response = build(fx.state, None)
            .oneshot(post_form(
                "/login",
                "email=alice%40example.com&password=Secret1%21",
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(
            body_text(response)
                .await
                .contains("Could not get all info. Please try again!")
        );
    }

    #[tokio::test]
    async fn should_refuse_admin_login_when_not_admin() {
        let fx = fixture();
        fx.owner("alice", "alice@example.com", true);

        let response = build(fx.state, None)
            .oneshot(post_form(
                "/admin-login",
                "email=alice%40example.com&password=Secret1%21",
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(
            body_text(response)
                .await
                .contains("You are not authorised to use this page!")
        );
    }

    #[tokio::test]
    async fn should_redirect_admin_to_admin_dashboard() {
        let fx = fixture();
        fx.admin();

        let response = build(fx.state, None)
            .oneshot(post_form(
                "/admin-login",
                "email=root%40example.com&password=Secret1%21",
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin-dashboard");
    }

    #[tokio::test]
    async fn should_clear_session_on_logout() {
        let fx = fixture();
        let user = fx.owner("alice", "alice@example.com", true);
        let cookie = fx.cookie_for(&user, false);
        let sessions = std::sync::Arc::clone(&fx.state.sessions);

        let response = build(fx.state, None)
            .oneshot(post_form("/logout", "", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
        assert!(sessions.is_empty());
    }
}

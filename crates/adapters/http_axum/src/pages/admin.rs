//! Administrator dashboard: member list and permission edits.

use std::collections::HashMap;

use askama::Template;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use pottydog_app::ports::{
    AccessTokenIssuer, PasswordHasher, PottyLogRepository, PreferencesRepository, UserRepository,
};
use pottydog_domain::error::PottyError;
use pottydog_domain::grant::ChannelPermissions;
use pottydog_domain::user::User;

use super::render;
use crate::error::PageError;
use crate::state::AppState;

/// One member row with its checkbox names.
pub struct MemberRow {
    pub id: String,
    pub username: String,
    pub can_read: bool,
    pub can_write: bool,
}

impl From<User> for MemberRow {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            can_read: user.can_read,
            can_write: user.can_write,
        }
    }
}

#[derive(Template)]
#[template(path = "admin_dashboard.html")]
pub struct AdminDashboardTemplate {
    pub members: Vec<MemberRow>,
    pub success: Option<String>,
}

impl AdminDashboardTemplate {
    fn new(members: Vec<User>, success: Option<String>) -> Self {
        Self {
            members: members.into_iter().map(MemberRow::from).collect(),
            success,
        }
    }
}

fn access_denied() -> Response {
    PageError::new(
        StatusCode::UNAUTHORIZED,
        "Access denied!",
        "You do not have the right permissions to access this page!",
    )
    .into_response()
}

/// Map a failed admin re-check to the page the browser should see.
fn refuse(err: PottyError) -> Response {
    match err {
        PottyError::Denied(_) => access_denied(),
        PottyError::NotFound(_) => Redirect::to("/admin-login").into_response(),
        err => PageError::from(err).into_response(),
    }
}

/// Checkbox presence decides each member's permissions.
pub fn requested_permissions(
    form: &HashMap<String, String>,
) -> impl Fn(pottydog_domain::id::UserId) -> ChannelPermissions + '_ {
    move |id| ChannelPermissions {
        read: form.contains_key(&format!("read_{id}")),
        write: form.contains_key(&format!("write_{id}")),
    }
}

/// `GET /admin-dashboard`
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
        return Redirect::to("/admin-login").into_response();
    };
    if let Err(err) = state.permissions.require_admin(session.user_id).await {
        return refuse(err);
    }

    match state.permissions.list_members().await {
        Ok(members) => render(
            StatusCode::OK,
            &AdminDashboardTemplate::new(members, None),
        ),
        Err(err) => PageError::from(err).into_response(),
    }
}

/// `POST /admin-dashboard/permissions`
pub async fn update_permissions<UR, PR, LR, TI, PH>(
    State(state): State<AppState<UR, PR, LR, TI, PH>>,
    jar: CookieJar,
    Form(form): Form<HashMap<String, String>>,
) -> Response
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PreferencesRepository + Send + Sync + 'static,
    LR: PottyLogRepository + Send + Sync + 'static,
    TI: AccessTokenIssuer + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    let Some(session) = state.sessions.current(&jar).filter(|s| s.is_admin) else {
        return Redirect::to("/admin-login").into_response();
    };
    if let Err(err) = state.permissions.require_admin(session.user_id).await {
        return refuse(err);
    }

    match state
        .permissions
        .update_permissions(requested_permissions(&form))
        .await
    {
        Ok(update) => {
            let message = update.message().to_string();
            render(
                StatusCode::OK,
                &AdminDashboardTemplate::new(update.members, Some(message)),
            )
        }
        Err(err) => PageError::from(err).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use crate::pages::test_support::{body_text, fixture, get, location, post_form};
    use crate::router::build;

    #[tokio::test]
    async fn should_redirect_to_admin_login_when_no_session() {
        let fx = fixture();
        let response = build(fx.state, None)
            .oneshot(get("/admin-dashboard", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin-login");
    }

    #[tokio::test]
    async fn should_deny_owner_on_admin_dashboard() {
        let fx = fixture();
        let user = fx.owner("alice", "alice@example.com", true);
        let cookie = fx.cookie_for(&user, false);

        let response = build(fx.state, None)
            .oneshot(get("/admin-dashboard", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response).await.contains("Access denied!"));
    }

    #[tokio::test]
    async fn should_deny_forged_admin_flag() {
        let fx = fixture();
        let user = fx.owner("alice", "alice@example.com", true);
        let cookie = fx.cookie_for(&user, true);

        let response = build(fx.state, None)
            .oneshot(post_form("/admin-dashboard/permissions", "", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_list_members_for_admin() {
        let fx = fixture();
        let admin = fx.admin();
        fx.owner("alice", "alice@example.com", true);
        let cookie = fx.cookie_for(&admin, true);

        let response = build(fx.state, None)
            .oneshot(get("/admin-dashboard", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("alice"));
        assert!(!body.contains("root@example.com"));
    }

    #[tokio::test]
    async fn should_publish_one_notice_per_changed_member() {
        let fx = fixture();
        let admin = fx.admin();
        let alice = fx.owner("alice", "alice@example.com", false);
        fx.owner("bob", "bob@example.com", false);
        let cookie = fx.cookie_for(&admin, true);
        let mut rx = fx.hub.subscribe();
        let users = fx.users.clone();

        let body = format!("read_{}=on&write_{}=on", alice.id, alice.id);
        let response = build(fx.state, None)
            .oneshot(post_form(
                "/admin-dashboard/permissions",
                &body,
                Some(&cookie),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            body_text(response)
                .await
                .contains("Successfully changed permissions of selected user!")
        );
        let stored = users.0.lock().unwrap().get(&alice.id).cloned().unwrap();
        assert!(stored.can_read && stored.can_write);

        let notice = rx.try_recv().unwrap();
        assert_eq!(notice.channel, "Channel-Barcelona");
        assert_eq!(notice.payload["type"], "update_token");
        assert!(rx.try_recv().is_err());
    }
}

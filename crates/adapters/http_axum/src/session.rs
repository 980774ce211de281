//! Cookie sessions for logged-in browsers.
//!
//! The cookie only carries a random session id; the identity lives in an
//! in-memory [`SessionStore`] and expires after a fixed lifetime.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use pottydog_app::services::account_service::LoginOutcome;
use pottydog_domain::id::UserId;
use pottydog_domain::user::User;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "pottydog_session";

/// What a logged-in browser is known as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub username: String,
    pub dog_name: Option<String>,
    pub can_read: bool,
    pub can_write: bool,
    pub light_mode: bool,
    pub disabled_alerts: bool,
    pub is_admin: bool,
}

impl Session {
    /// Session of an owner after a successful login.
    #[must_use]
    pub fn for_owner(outcome: &LoginOutcome) -> Self {
        let user = &outcome.user;
        Self {
            user_id: user.id,
            username: user.username.clone(),
            dog_name: user.dog_name.clone(),
            can_read: user.can_read,
            can_write: user.can_write,
            light_mode: outcome.preferences.light_mode,
            disabled_alerts: outcome.preferences.disabled_alerts,
            is_admin: false,
        }
    }

    /// Session of an administrator after a successful admin login.
    #[must_use]
    pub fn for_admin(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            dog_name: user.dog_name.clone(),
            can_read: user.can_read,
            can_write: user.can_write,
            light_mode: false,
            disabled_alerts: false,
            is_admin: true,
        }
    }
}

struct Entry {
    session: Session,
    expires_at: Instant,
}

/// In-memory session table keyed by cookie value.
pub struct SessionStore {
    entries: RwLock<HashMap<String, Entry>>,
    ttl: Duration,
    secure_cookies: bool,
}

impl SessionStore {
    /// Sessions live for `ttl`; cookies are marked `Secure` when `secure_cookies`.
    #[must_use]
    pub fn new(ttl: Duration, secure_cookies: bool) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            secure_cookies,
        }
    }

    /// Store `session` under a fresh id and set the cookie.
    ///
    /// Expired sessions of browsers that never came back are dropped first.
    #[must_use]
    pub fn start(&self, jar: CookieJar, session: Session) -> CookieJar {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let now = Instant::now();
        let entry = Entry {
            session,
            expires_at: now + self.ttl,
        };
        {
            let mut entries = self
                .entries
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            entries.retain(|_, entry| entry.expires_at > now);
            entries.insert(id.clone(), entry);
        }

        let cookie = Cookie::build((SESSION_COOKIE, id))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies);
        jar.add(cookie)
    }

    /// Session referenced by the request cookie, if it exists and has not expired.
    #[must_use]
    pub fn current(&self, jar: &CookieJar) -> Option<Session> {
        let id = jar.get(SESSION_COOKIE)?.value().to_string();
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match entries.get(&id) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.session.clone()),
            Some(_) => {
                entries.remove(&id);
                None
            }
            None => None,
        }
    }

    /// Modify the session referenced by the request cookie.
    pub fn update(&self, jar: &CookieJar, apply: impl FnOnce(&mut Session)) {
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return;
        };
        if let Some(entry) = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(cookie.value())
        {
            apply(&mut entry.session);
        }
    }

    /// Forget the session and clear the cookie.
    #[must_use]
    pub fn end(&self, jar: CookieJar) -> CookieJar {
        if let Some(cookie) = jar.get(SESSION_COOKIE) {
            self.entries
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(cookie.value());
        }
        jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
    }

    /// Drop every expired session, returning how many were removed.
    pub fn prune_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    /// Number of stored sessions, expired ones not yet pruned included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

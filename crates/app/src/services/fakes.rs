//! In-memory port implementations shared by the service tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use pottydog_domain::channel::ChannelMessage;
use pottydog_domain::error::{AccessDenied, PottyError};
use pottydog_domain::grant::AccessClaims;
use pottydog_domain::id::UserId;
use pottydog_domain::potty_log::PottyLog;
use pottydog_domain::preferences::Preferences;
use pottydog_domain::time::Timestamp;
use pottydog_domain::user::User;

use crate::ports::{
    AccessRequest, AccessTokenIssuer, ChannelPublisher, PasswordHasher, PottyLogRepository,
    PreferencesRepository, UserRepository,
};

#[derive(Default)]
pub struct InMemoryUserRepo {
    pub store: Mutex<HashMap<UserId, User>>,
}

impl UserRepository for InMemoryUserRepo {
    fn create(&self, user: User) -> impl Future<Output = Result<User, PottyError>> + Send {
        self.store.lock().unwrap().insert(user.id, user.clone());
        async { Ok(user) }
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, PottyError>> + Send {
        let result = self.store.lock().unwrap().get(&id).cloned();
        async { Ok(result) }
    }

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, PottyError>> + Send {
        let result = self
            .store
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned();
        async { Ok(result) }
    }

    fn list_non_admin(&self) -> impl Future<Output = Result<Vec<User>, PottyError>> + Send {
        let mut result: Vec<User> = self
            .store
            .lock()
            .unwrap()
            .values()
            .filter(|u| !u.is_admin)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.username.cmp(&b.username));
        async { Ok(result) }
    }

    fn update(&self, user: User) -> impl Future<Output = Result<User, PottyError>> + Send {
        self.store.lock().unwrap().insert(user.id, user.clone());
        async { Ok(user) }
    }
}

#[derive(Default)]
pub struct InMemoryPreferencesRepo {
    pub store: Mutex<HashMap<UserId, Preferences>>,
}

impl PreferencesRepository for InMemoryPreferencesRepo {
    fn create(
        &self,
        preferences: Preferences,
    ) -> impl Future<Output = Result<Preferences, PottyError>> + Send {
        self.store
            .lock()
            .unwrap()
            .insert(preferences.user_id, preferences);
        async move { Ok(preferences) }
    }

    fn get(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Preferences>, PottyError>> + Send {
        let result = self.store.lock().unwrap().get(&user_id).copied();
        async move { Ok(result) }
    }

    fn update(
        &self,
        preferences: Preferences,
    ) -> impl Future<Output = Result<Preferences, PottyError>> + Send {
        self.store
            .lock()
            .unwrap()
            .insert(preferences.user_id, preferences);
        async move { Ok(preferences) }
    }
}

#[derive(Default)]
pub struct InMemoryPottyLogRepo {
    pub store: Mutex<Vec<PottyLog>>,
}

impl PottyLogRepository for InMemoryPottyLogRepo {
    fn create(&self, log: PottyLog) -> impl Future<Output = Result<PottyLog, PottyError>> + Send {
        self.store.lock().unwrap().push(log.clone());
        async { Ok(log) }
    }

    fn latest_for_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<PottyLog>, PottyError>> + Send {
        let result = self
            .store
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == user_id)
            .max_by_key(|l| l.logged_at)
            .cloned();
        async { Ok(result) }
    }

    fn find_in_range(
        &self,
        user_id: UserId,
        from: Timestamp,
        to: Timestamp,
    ) -> impl Future<Output = Result<Vec<PottyLog>, PottyError>> + Send {
        let mut result: Vec<PottyLog> = self
            .store
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == user_id && l.logged_at >= from && l.logged_at < to)
            .cloned()
            .collect();
        result.sort_by_key(|l| l.logged_at);
        async { Ok(result) }
    }
}

/// Records every published message.
#[derive(Default)]
pub struct RecordingPublisher {
    pub published: Mutex<Vec<ChannelMessage>>,
}

impl ChannelPublisher for RecordingPublisher {
    fn publish(
        &self,
        message: ChannelMessage,
    ) -> impl Future<Output = Result<(), PottyError>> + Send {
        self.published.lock().unwrap().push(message);
        async { Ok(()) }
    }
}

/// Reversible "hash" so tests can check what was stored.
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, PottyError> {
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash.strip_prefix("hashed:") == Some(password)
    }
}

/// Encodes claims as JSON instead of signing them.
#[derive(Default)]
pub struct JsonTokenIssuer {
    pub fail_issue: bool,
}

impl AccessTokenIssuer for JsonTokenIssuer {
    fn issue(&self, request: &AccessRequest) -> Result<String, PottyError> {
        if self.fail_issue {
            return Err(PottyError::Transport("signer unavailable".into()));
        }
        let claims = AccessClaims {
            sub: request.user_id.to_string(),
            uuid: request.uuid.clone(),
            channel: request.channel.clone(),
            read: request.permissions.read,
            write: request.permissions.write,
            iat: 0,
            exp: i64::from(request.ttl_minutes) * 60,
        };
        Ok(serde_json::to_string(&claims).unwrap())
    }

    fn verify(&self, token: &str) -> Result<AccessClaims, PottyError> {
        serde_json::from_str(token).map_err(|_| AccessDenied::InvalidToken.into())
    }
}

//! Account service: registration, login and admin login.

use pottydog_domain::error::{AccessDenied, NotFoundError, PottyError, ValidationError};
use pottydog_domain::grant::ChannelPermissions;
use pottydog_domain::id::UserId;
use pottydog_domain::preferences::Preferences;
use pottydog_domain::user::{Registration, User};

use crate::ports::{PasswordHasher, PreferencesRepository, UserRepository};

/// A successful owner login: the account and its stored preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub user: User,
    pub preferences: Preferences,
}

/// Administrator account created at startup when configured.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Application service for account lifecycle.
pub struct AccountService<UR, PR, PH> {
    users: UR,
    preferences: PR,
    hasher: PH,
}

impl<UR, PR, PH> AccountService<UR, PR, PH>
where
    UR: UserRepository,
    PR: PreferencesRepository,
    PH: PasswordHasher,
{
    pub fn new(users: UR, preferences: PR, hasher: PH) -> Self {
        Self {
            users,
            preferences,
            hasher,
        }
    }

    /// Register a new owner account.
    ///
    /// New accounts hold no channel permissions until an administrator
    /// grants them. A default preferences row is created alongside.
    ///
    /// # Errors
    ///
    /// Returns [`PottyError::Validation`] for the first registration rule
    /// broken (including [`ValidationError::EmailTaken`]), or a storage error.
    pub async fn register(&self, registration: &Registration) -> Result<User, PottyError> {
        registration.validate()?;

        if self
            .users
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(ValidationError::EmailTaken.into());
        }

        let hash = self.hasher.hash(&registration.password)?;
        let mut builder = User::builder()
            .username(&registration.username)
            .email(&registration.email)
            .password_hash(hash);
        if let Some(dog_name) = registration.dog_name() {
            builder = builder.dog_name(dog_name);
        }

        let user = self.users.create(builder.build()?).await?;
        self.preferences
            .create(Preferences::for_user(user.id))
            .await?;
        tracing::info!(user_id = %user.id, "account registered");
        Ok(user)
    }

    /// Authenticate an owner by email and password.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MissingRequiredFields`] when a field is empty
    /// - [`AccessDenied::InvalidCredentials`] for an unknown email or wrong password
    /// - [`PottyError::NotFound`] when the account has no preferences row
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, PottyError> {
        let user = self.authenticate(email, password).await?;
        let preferences = self.preferences.get(user.id).await?.ok_or_else(|| {
            PottyError::from(NotFoundError {
                entity: "Preferences",
                id: user.id.to_string(),
            })
        })?;
        Ok(LoginOutcome { user, preferences })
    }

    /// Authenticate an administrator.
    ///
    /// # Errors
    ///
    /// Same as [`Self::login`] for bad input, plus [`AccessDenied::NotAdmin`]
    /// when the credentials are right but the account is not an administrator.
    pub async fn admin_login(&self, email: &str, password: &str) -> Result<User, PottyError> {
        let user = self.authenticate(email, password).await?;
        if !user.is_admin {
            tracing::warn!(user_id = %user.id, "non-admin attempted admin login");
            return Err(AccessDenied::NotAdmin.into());
        }
        Ok(user)
    }

    /// Look up an account, failing when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`PottyError::NotFound`] or a storage error.
    pub async fn get_user(&self, id: UserId) -> Result<User, PottyError> {
        self.users.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "User",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Look up an account.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub async fn find_user(&self, id: UserId) -> Result<Option<User>, PottyError> {
        self.users.get_by_id(id).await
    }

    /// Ensure the configured administrator exists.
    ///
    /// An existing account with the same email is promoted; otherwise a new
    /// administrator with full channel rights is created.
    ///
    /// # Errors
    ///
    /// Returns a validation, hashing or storage error.
    pub async fn bootstrap_admin(&self, admin: &AdminBootstrap) -> Result<User, PottyError> {
        if let Some(mut existing) = self.users.find_by_email(&admin.email).await? {
            if existing.is_admin {
                return Ok(existing);
            }
            existing.is_admin = true;
            tracing::info!(user_id = %existing.id, "promoted account to admin");
            return self.users.update(existing).await;
        }

        let user = User::builder()
            .username(&admin.username)
            .email(&admin.email)
            .password_hash(self.hasher.hash(&admin.password)?)
            .permissions(ChannelPermissions {
                read: true,
                write: true,
            })
            .admin(true)
            .build()?;
        let user = self.users.create(user).await?;
        self.preferences
            .create(Preferences::for_user(user.id))
            .await?;
        tracing::info!(user_id = %user.id, "admin account created");
        Ok(user)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<User, PottyError> {
        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingRequiredFields.into());
        }
        match self.users.find_by_email(email).await? {
            Some(user) if self.hasher.verify(password, &user.password_hash) => Ok(user),
            _ => Err(AccessDenied::InvalidCredentials.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::{InMemoryPreferencesRepo, InMemoryUserRepo, PlainHasher};

    type Service = AccountService<InMemoryUserRepo, InMemoryPreferencesRepo, PlainHasher>;

    fn make_service() -> Service {
        AccountService::new(
            InMemoryUserRepo::default(),
            InMemoryPreferencesRepo::default(),
            PlainHasher,
        )
    }

    fn registration() -> Registration {
        Registration {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            dog_name: Some("Rex".to_string()),
            password: "Secret1!".to_string(),
            confirm_password: Some("Secret1!".to_string()),
        }
    }

    #[tokio::test]
    async fn should_register_without_permissions_and_with_default_preferences() {
        let svc = make_service();
        let user = svc.register(&registration()).await.unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.dog_name.as_deref(), Some("Rex"));
        assert!(!user.can_read);
        assert!(!user.can_write);
        assert!(!user.is_admin);
        assert_eq!(user.password_hash, "hashed:Secret1!");

        let prefs = svc.preferences.get(user.id).await.unwrap().unwrap();
        assert_eq!(prefs, Preferences::for_user(user.id));
    }

    #[tokio::test]
    async fn should_store_no_dog_name_when_left_empty() {
        let svc = make_service();
        let mut input = registration();
        input.dog_name = Some(String::new());
        let user = svc.register(&input).await.unwrap();
        assert!(user.dog_name.is_none());
    }

    #[tokio::test]
    async fn should_reject_registration_when_email_taken() {
        let svc = make_service();
        svc.register(&registration()).await.unwrap();

        let result = svc.register(&registration()).await;
        assert!(matches!(
            result,
            Err(PottyError::Validation(ValidationError::EmailTaken))
        ));
    }

    #[tokio::test]
    async fn should_reject_registration_when_passwords_differ() {
        let svc = make_service();
        let mut input = registration();
        input.confirm_password = Some("Other1!x".to_string());

        let result = svc.register(&input).await;
        assert!(matches!(
            result,
            Err(PottyError::Validation(ValidationError::PasswordMismatch))
        ));
        assert!(svc.users.store.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_login_with_correct_credentials() {
        let svc = make_service();
        let user = svc.register(&registration()).await.unwrap();

        let outcome = svc.login("alice@example.com", "Secret1!").await.unwrap();
        assert_eq!(outcome.user.id, user.id);
        assert!(!outcome.preferences.light_mode);
    }

    #[tokio::test]
    async fn should_deny_login_when_password_wrong_or_email_unknown() {
        let svc = make_service();
        svc.register(&registration()).await.unwrap();

        let wrong = svc.login("alice@example.com", "Wrong1!xx").await;
        assert!(matches!(
            wrong,
            Err(PottyError::Denied(AccessDenied::InvalidCredentials))
        ));
        let unknown = svc.login("bob@example.com", "Secret1!").await;
        assert!(matches!(
            unknown,
            Err(PottyError::Denied(AccessDenied::InvalidCredentials))
        ));
    }

    #[tokio::test]
    async fn should_require_both_login_fields() {
        let svc = make_service();
        let result = svc.login("", "Secret1!").await;
        assert!(matches!(
            result,
            Err(PottyError::Validation(ValidationError::MissingRequiredFields))
        ));
    }

    #[tokio::test]
    async fn should_fail_login_when_preferences_missing() {
        let svc = make_service();
        let user = svc.register(&registration()).await.unwrap();
        svc.preferences.store.lock().unwrap().remove(&user.id);

        let result = svc.login("alice@example.com", "Secret1!").await;
        assert!(matches!(result, Err(PottyError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_refuse_admin_login_for_owner() {
        let svc = make_service();
        svc.register(&registration()).await.unwrap();

        let result = svc.admin_login("alice@example.com", "Secret1!").await;
        assert!(matches!(
            result,
            Err(PottyError::Denied(AccessDenied::NotAdmin))
        ));
    }

    #[tokio::test]
    async fn should_bootstrap_admin_once() {
        let svc = make_service();
        let admin = AdminBootstrap {
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            password: "Admin1!pass".to_string(),
        };

        let first = svc.bootstrap_admin(&admin).await.unwrap();
        let second = svc.bootstrap_admin(&admin).await.unwrap();
        assert_eq!(first.id, second.id);
        assert!(first.is_admin);

        let logged_in = svc
            .admin_login("admin@example.com", "Admin1!pass")
            .await
            .unwrap();
        assert_eq!(logged_in.id, first.id);
    }

    #[tokio::test]
    async fn should_promote_existing_account_on_bootstrap() {
        let svc = make_service();
        let owner = svc.register(&registration()).await.unwrap();
        let admin = AdminBootstrap {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "ignored".to_string(),
        };

        let promoted = svc.bootstrap_admin(&admin).await.unwrap();
        assert_eq!(promoted.id, owner.id);
        assert!(promoted.is_admin);
    }

    #[tokio::test]
    async fn should_return_not_found_when_user_missing() {
        let svc = make_service();
        let result = svc.get_user(UserId::new()).await;
        assert!(matches!(result, Err(PottyError::NotFound(_))));
        assert!(svc.find_user(UserId::new()).await.unwrap().is_none());
    }
}

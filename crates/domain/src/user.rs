//! Users: dog owners and administrators.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{PottyError, ValidationError};
use crate::grant::ChannelPermissions;
use crate::id::UserId;

/// Maximum username length accepted at registration.
pub const MAX_USERNAME_LEN: usize = 50;
/// Maximum dog name length accepted at registration.
pub const MAX_DOG_NAME_LEN: usize = 25;
/// Profile edits must stay strictly below this length.
pub const MAX_PROFILE_FIELD_LEN: usize = 50;
/// Minimum password length.
pub const MIN_PASSWORD_LEN: usize = 8;

const PASSWORD_SPECIALS: &str = "@$!%*?&";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub dog_name: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub can_read: bool,
    pub can_write: bool,
    pub is_admin: bool,
}

impl User {
    /// Create a builder for constructing a [`User`].
    #[must_use]
    pub fn builder() -> UserBuilder {
        UserBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PottyError::Validation`] when a required field is empty.
    pub fn validate(&self) -> Result<(), PottyError> {
        if self.username.is_empty() || self.email.is_empty() || self.password_hash.is_empty() {
            return Err(ValidationError::MissingRequiredFields.into());
        }
        Ok(())
    }

    #[must_use]
    pub fn permissions(&self) -> ChannelPermissions {
        ChannelPermissions {
            read: self.can_read,
            write: self.can_write,
        }
    }

    /// Apply a profile edit. A field changes only when the new value is
    /// non-empty, differs from the current one and is shorter than
    /// [`MAX_PROFILE_FIELD_LEN`].
    pub fn apply_profile_change(&mut self, change: &ProfileChange) -> ProfileChangeOutcome {
        let mut outcome = ProfileChangeOutcome::default();

        if let Some(username) =
            accepted_profile_value(change.username.as_deref(), Some(self.username.as_str()))
        {
            self.username = username.to_string();
            outcome.username_changed = true;
        }
        if let Some(dog_name) =
            accepted_profile_value(change.dog_name.as_deref(), self.dog_name.as_deref())
        {
            self.dog_name = Some(dog_name.to_string());
            outcome.dog_name_changed = true;
        }

        outcome
    }
}

fn accepted_profile_value<'a>(new: Option<&'a str>, current: Option<&str>) -> Option<&'a str> {
    let new = new.filter(|v| !v.is_empty())?;
    if Some(new) == current || new.chars().count() >= MAX_PROFILE_FIELD_LEN {
        return None;
    }
    Some(new)
}

/// Requested username/dog-name edit from the settings page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileChange {
    pub username: Option<String>,
    pub dog_name: Option<String>,
}

/// Which fields a [`ProfileChange`] actually modified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileChangeOutcome {
    pub username_changed: bool,
    pub dog_name_changed: bool,
}

impl ProfileChangeOutcome {
    #[must_use]
    pub fn any(self) -> bool {
        self.username_changed || self.dog_name_changed
    }
}

/// Step-by-step builder for [`User`].
#[derive(Debug, Default)]
pub struct UserBuilder {
    id: Option<UserId>,
    username: Option<String>,
    email: Option<String>,
    dog_name: Option<String>,
    password_hash: Option<String>,
    can_read: bool,
    can_write: bool,
    is_admin: bool,
}

impl UserBuilder {
    #[must_use]
    pub fn id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn dog_name(mut self, dog_name: impl Into<String>) -> Self {
        self.dog_name = Some(dog_name.into());
        self
    }

    #[must_use]
    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    #[must_use]
    pub fn permissions(mut self, permissions: ChannelPermissions) -> Self {
        self.can_read = permissions.read;
        self.can_write = permissions.write;
        self
    }

    #[must_use]
    pub fn admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }

    /// Consume the builder, validate, and return a [`User`].
    ///
    /// # Errors
    ///
    /// Returns [`PottyError::Validation`] if a required field is missing.
    pub fn build(self) -> Result<User, PottyError> {
        let user = User {
            id: self.id.unwrap_or_default(),
            username: self.username.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            dog_name: self.dog_name.filter(|name| !name.is_empty()),
            password_hash: self.password_hash.unwrap_or_default(),
            can_read: self.can_read,
            can_write: self.can_write,
            is_admin: self.is_admin,
        };
        user.validate()?;
        Ok(user)
    }
}

/// Registration form input, before hashing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Registration {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub dog_name: Option<String>,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: Option<String>,
}

impl Registration {
    /// Apply the registration rules in order, returning the first failure.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] describing the first rule broken.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingRequiredFields);
        }
        if self.username.chars().count() > MAX_USERNAME_LEN {
            return Err(ValidationError::UsernameTooLong);
        }
        if self
            .dog_name()
            .is_some_and(|name| name.chars().count() > MAX_DOG_NAME_LEN)
        {
            return Err(ValidationError::DogNameTooLong);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if !is_strong_password(&self.password) {
            return Err(ValidationError::WeakPassword);
        }
        if let Some(confirm) = self.confirm_password.as_deref().filter(|c| !c.is_empty()) {
            if confirm != self.password {
                return Err(ValidationError::PasswordMismatch);
            }
        }
        Ok(())
    }

    /// The dog name, treating an empty field as absent.
    #[must_use]
    pub fn dog_name(&self) -> Option<&str> {
        self.dog_name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Standard `local@domain.tld` shape.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// At least 8 characters from `[A-Za-z0-9@$!%*?&]`, with one lowercase,
/// one uppercase, one digit and one special character.
#[must_use]
pub fn is_strong_password(password: &str) -> bool {
    let allowed = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c);
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().all(allowed)
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> Registration {
        Registration {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            dog_name: Some("Fido".to_string()),
            password: "Str0ng!Pass".to_string(),
            confirm_password: Some("Str0ng!Pass".to_string()),
        }
    }

    fn user() -> User {
        User::builder()
            .username("alice")
            .email("alice@example.com")
            .dog_name("Fido")
            .password_hash("hash")
            .build()
            .unwrap()
    }

    #[test]
    fn should_accept_valid_registration() {
        assert_eq!(registration().validate(), Ok(()));
    }

    #[test]
    fn should_require_username_email_and_password() {
        let mut reg = registration();
        reg.email = String::new();
        assert_eq!(reg.validate(), Err(ValidationError::MissingRequiredFields));
    }

    #[test]
    fn should_reject_username_longer_than_fifty() {
        let mut reg = registration();
        reg.username = "a".repeat(51);
        assert_eq!(reg.validate(), Err(ValidationError::UsernameTooLong));
        reg.username = "a".repeat(50);
        assert_eq!(reg.validate(), Ok(()));
    }

    #[test]
    fn should_reject_dog_name_longer_than_twenty_five() {
        let mut reg = registration();
        reg.dog_name = Some("d".repeat(26));
        assert_eq!(reg.validate(), Err(ValidationError::DogNameTooLong));
    }

    #[test]
    fn should_treat_empty_dog_name_as_absent() {
        let mut reg = registration();
        reg.dog_name = Some(String::new());
        assert_eq!(reg.dog_name(), None);
        assert_eq!(reg.validate(), Ok(()));
    }

    #[test]
    fn should_reject_malformed_email() {
        let mut reg = registration();
        reg.email = "alice@localhost".to_string();
        assert_eq!(reg.validate(), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn should_reject_weak_passwords() {
        for weak in ["nouppercase1!", "NOLOWERCASE1!", "NoDigits!!", "NoSpecial11", "Has space1!"] {
            let mut reg = registration();
            reg.password = weak.to_string();
            reg.confirm_password = None;
            assert_eq!(
                reg.validate(),
                Err(ValidationError::WeakPassword),
                "password {weak:?}"
            );
        }
    }

    #[test]
    fn should_reject_password_shorter_than_eight() {
        assert!(!is_strong_password("Ab1!xyz"));
        assert!(is_strong_password("Ab1!xyzw"));
    }

    #[test]
    fn should_reject_mismatched_confirmation() {
        let mut reg = registration();
        reg.confirm_password = Some("Other!Pass1".to_string());
        assert_eq!(reg.validate(), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn should_skip_confirmation_check_when_not_provided() {
        let mut reg = registration();
        reg.confirm_password = None;
        assert_eq!(reg.validate(), Ok(()));
    }

    #[test]
    fn should_build_user_without_permissions_by_default() {
        let user = user();
        assert!(!user.can_read);
        assert!(!user.can_write);
        assert!(!user.is_admin);
    }

    #[test]
    fn should_fail_build_when_email_missing() {
        let result = User::builder().username("bob").password_hash("h").build();
        assert!(matches!(
            result,
            Err(PottyError::Validation(ValidationError::MissingRequiredFields))
        ));
    }

    #[test]
    fn should_not_serialize_password_hash() {
        let json = serde_json::to_value(user()).unwrap();
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn should_apply_only_changed_profile_fields() {
        let mut user = user();
        let outcome = user.apply_profile_change(&ProfileChange {
            username: Some("alice".to_string()),
            dog_name: Some("Rex".to_string()),
        });
        assert!(!outcome.username_changed);
        assert!(outcome.dog_name_changed);
        assert_eq!(user.dog_name.as_deref(), Some("Rex"));
    }

    #[test]
    fn should_ignore_empty_and_too_long_profile_values() {
        let mut user = user();
        let outcome = user.apply_profile_change(&ProfileChange {
            username: Some("u".repeat(50)),
            dog_name: Some(String::new()),
        });
        assert!(!outcome.any());
        assert_eq!(user.username, "alice");
    }
}

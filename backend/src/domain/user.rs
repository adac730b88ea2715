//! User accounts and the values they are built from.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;
use super::auth::NewPassword;
use super::validation::{FieldErrors, MAX_TEXT_LEN};

/// Name given to accounts created without one.
pub const DEFAULT_ACCOUNT_NAME: &str = "Unknown User";

/// Validation errors returned by [`EmailAddress::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailValidationError {
    Empty,
    TooLong { max: usize },
    Malformed,
}

impl fmt::Display for EmailValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "email is required"),
            Self::TooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::Malformed => write!(f, "email must be a valid email address"),
        }
    }
}

impl std::error::Error for EmailValidationError {}

impl EmailValidationError {
    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "required",
            Self::TooLong { .. } => "too_long",
            Self::Malformed => "invalid_email",
        }
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Syntactically valid email address, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "juan.delacruz@example.gov")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an address.
    ///
    /// # Examples
    /// ```
    /// use office_admin::domain::EmailAddress;
    ///
    /// assert!(EmailAddress::new(" ana@example.gov ").is_ok());
    /// assert!(EmailAddress::new("ana@").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if trimmed.chars().count() > MAX_TEXT_LEN {
            return Err(EmailValidationError::TooLong { max: MAX_TEXT_LEN });
        }
        if !email_regex().is_match(trimmed) {
            return Err(EmailValidationError::Malformed);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Stored bcrypt hash. The debug output never shows the hash itself.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already computed hash.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Role derived from the account's admin flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Admin,
    User,
}

/// A user account as seen by the domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub is_admin: bool,
}

impl UserAccount {
    /// Role implied by the admin flag.
    pub fn role(&self) -> Role {
        if self.is_admin { Role::Admin } else { Role::User }
    }
}

/// An account together with its stored password hash.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub account: UserAccount,
    pub password_hash: PasswordHash,
}

/// Values required to insert an account.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
    pub is_admin: bool,
}

/// Partial update applied to an account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountChanges {
    pub name: Option<String>,
    pub email: Option<EmailAddress>,
    pub password_hash: Option<PasswordHash>,
}

/// Account form used by administrators.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

/// Account form after field validation.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDraft {
    pub name: String,
    pub email: EmailAddress,
    /// Always present for new accounts; optional on update.
    pub password: Option<NewPassword>,
}

impl UserForm {
    /// Validate the form. The password is mandatory only when `creating`.
    pub fn validate(&self, creating: bool) -> Result<UserDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors
            .optional("name", self.name.as_deref(), MAX_TEXT_LEN)
            .unwrap_or_else(|| DEFAULT_ACCOUNT_NAME.to_owned());
        let email = match EmailAddress::new(self.email.as_deref().unwrap_or_default()) {
            Ok(email) => Some(email),
            Err(err) => {
                errors.push("email", err.code(), err.to_string());
                None
            }
        };
        let password = NewPassword::collect(
            &mut errors,
            self.password.as_deref(),
            self.password_confirmation.as_deref(),
            creating,
        );
        let Some(email) = email else {
            return Err(errors);
        };
        errors.finish(UserDraft {
            name,
            email,
            password,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", EmailValidationError::Empty)]
    #[case("   ", EmailValidationError::Empty)]
    #[case("no-at-sign", EmailValidationError::Malformed)]
    #[case("a@b", EmailValidationError::Malformed)]
    #[case("a b@example.gov", EmailValidationError::Malformed)]
    fn email_rejects_invalid_input(#[case] raw: &str, #[case] expected: EmailValidationError) {
        assert_eq!(EmailAddress::new(raw), Err(expected));
    }

    #[rstest]
    fn email_rejects_overlong_addresses() {
        let raw = format!("{}@example.gov", "a".repeat(250));
        assert_eq!(
            EmailAddress::new(raw),
            Err(EmailValidationError::TooLong { max: MAX_TEXT_LEN })
        );
    }

    #[rstest]
    fn email_is_trimmed() {
        let email = EmailAddress::new("  ana@example.gov ").expect("valid email");
        assert_eq!(email.as_ref(), "ana@example.gov");
    }

    #[rstest]
    #[case(true, Role::Admin)]
    #[case(false, Role::User)]
    fn role_follows_admin_flag(#[case] is_admin: bool, #[case] expected: Role) {
        let account = UserAccount {
            id: UserId::new(1),
            name: "Ana Reyes".to_owned(),
            email: EmailAddress::new("ana@example.gov").expect("valid email"),
            is_admin,
        };
        assert_eq!(account.role(), expected);
    }

    #[rstest]
    fn blank_name_falls_back_to_default() {
        let form = UserForm {
            name: Some("  ".to_owned()),
            email: Some("clerk@example.gov".to_owned()),
            password: Some("password123".to_owned()),
            password_confirmation: Some("password123".to_owned()),
        };
        let draft = form.validate(true).expect("valid form");
        assert_eq!(draft.name, DEFAULT_ACCOUNT_NAME);
    }

    #[rstest]
    #[case(true, true)]
    #[case(false, false)]
    fn password_required_only_on_create(#[case] creating: bool, #[case] expect_error: bool) {
        let form = UserForm {
            email: Some("clerk@example.gov".to_owned()),
            ..UserForm::default()
        };
        assert_eq!(form.validate(creating).is_err(), expect_error);
    }

    #[rstest]
    fn password_hash_debug_is_redacted() {
        let hash = PasswordHash::new("$2b$10$abcdefghijklmnopqrstuv");
        assert_eq!(format!("{hash:?}"), "PasswordHash(..)");
    }
}

//! Authentication primitives: login credentials and new-password rules.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::validation::FieldErrors;

/// Minimum length accepted for new passwords.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` must be non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use office_admin::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin@example.gov ", "secret").unwrap();
/// assert_eq!(creds.email(), "admin@example.gov");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used to look the account up.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// A new plaintext password that passed the length and confirmation rules.
#[derive(Clone, PartialEq, Eq)]
pub struct NewPassword(Zeroizing<String>);

impl NewPassword {
    /// Plaintext to hand to the password hasher.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Validate a password and its confirmation, recording failures against
    /// the `password` field.
    ///
    /// Returns `None` when the password is absent and not `required`, or
    /// when validation failed.
    pub fn collect(
        errors: &mut FieldErrors,
        password: Option<&str>,
        confirmation: Option<&str>,
        required: bool,
    ) -> Option<Self> {
        let Some(password) = password.filter(|value| !value.is_empty()) else {
            if required {
                errors.push("password", "required", "password is required");
            }
            return None;
        };

        if password.chars().count() < PASSWORD_MIN_LEN {
            errors.push(
                "password",
                "too_short",
                format!("password must be at least {PASSWORD_MIN_LEN} characters"),
            );
            return None;
        }
        if confirmation != Some(password) {
            errors.push(
                "password",
                "confirmation_mismatch",
                "password confirmation does not match",
            );
            return None;
        }
        Some(Self(Zeroizing::new(password.to_owned())))
    }
}

impl fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NewPassword(..)")
    }
}

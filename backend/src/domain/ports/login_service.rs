//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials and to reload the account behind a session
//! without importing the backing infrastructure. HTTP handler tests
//! substitute [`FixtureLoginService`] instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, LoginCredentials, UserAccount, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated account.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserAccount, Error>;

    /// Reload the account a session refers to; `None` once it is deleted.
    async fn current_user(&self, id: UserId) -> Result<Option<UserAccount>, Error>;
}

/// Email accepted by [`FixtureLoginService`] for the administrator.
pub const FIXTURE_ADMIN_EMAIL: &str = "admin@example.gov";
/// Email accepted by [`FixtureLoginService`] for a regular account.
pub const FIXTURE_CLERK_EMAIL: &str = "clerk@example.gov";
/// Password accepted by [`FixtureLoginService`] for both accounts.
pub const FIXTURE_PASSWORD: &str = "password";

/// Deterministic authenticator with one admin and one regular account.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

impl FixtureLoginService {
    fn accounts() -> Result<[UserAccount; 2], Error> {
        let email = |raw: &str| {
            EmailAddress::new(raw)
                .map_err(|err| Error::internal(format!("invalid fixture email: {err}")))
        };
        Ok([
            UserAccount {
                id: UserId::new(1),
                name: "Office Administrator".to_owned(),
                email: email(FIXTURE_ADMIN_EMAIL)?,
                is_admin: true,
            },
            UserAccount {
                id: UserId::new(2),
                name: "Records Clerk".to_owned(),
                email: email(FIXTURE_CLERK_EMAIL)?,
                is_admin: false,
            },
        ])
    }
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserAccount, Error> {
        let account = Self::accounts()?
            .into_iter()
            .find(|account| account.email.as_ref() == credentials.email());
        match account {
            Some(account) if credentials.password() == FIXTURE_PASSWORD => Ok(account),
            _ => Err(Error::unauthorized("invalid credentials")),
        }
    }

    async fn current_user(&self, id: UserId) -> Result<Option<UserAccount>, Error> {
        Ok(Self::accounts()?
            .into_iter()
            .find(|account| account.id == id))
    }
}

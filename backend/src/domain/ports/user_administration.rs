//! Driving port for administering user accounts.

use async_trait::async_trait;

use crate::domain::{AccountProfile, Error, UserAccount, UserForm, UserId};

/// Account management use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAdministration: Send + Sync {
    /// Every account.
    async fn list(&self) -> Result<Vec<UserAccount>, Error>;

    /// Create an account from a submitted form.
    async fn create(&self, form: &UserForm) -> Result<UserAccount, Error>;

    /// Account profile with its employee sheet and assigned assets.
    async fn profile(&self, id: UserId) -> Result<AccountProfile, Error>;

    /// Update an account from a submitted form.
    async fn update(&self, id: UserId, form: &UserForm) -> Result<UserAccount, Error>;

    /// Delete an account.
    async fn delete(&self, id: UserId) -> Result<(), Error>;
}

/// Empty account directory for handler tests that never reach it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserAdministration;

#[async_trait]
impl UserAdministration for FixtureUserAdministration {
    async fn list(&self) -> Result<Vec<UserAccount>, Error> {
        Ok(Vec::new())
    }

    async fn create(&self, _form: &UserForm) -> Result<UserAccount, Error> {
        Err(Error::service_unavailable("user administration is not configured"))
    }

    async fn profile(&self, id: UserId) -> Result<AccountProfile, Error> {
        Err(Error::not_found(format!("user {id} not found")))
    }

    async fn update(&self, id: UserId, _form: &UserForm) -> Result<UserAccount, Error> {
        Err(Error::not_found(format!("user {id} not found")))
    }

    async fn delete(&self, id: UserId) -> Result<(), Error> {
        Err(Error::not_found(format!("user {id} not found")))
    }
}

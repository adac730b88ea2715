//! Port abstraction for user account persistence and its errors.
use async_trait::async_trait;

use crate::domain::{AccountChanges, NewUser, UserAccount, UserCredentials, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The email is already used by another account.
        DuplicateEmail { message: String } => "user email already registered: {message}",
    }
}

/// Lookups and writes over the `users` table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch an account and its password hash by exact email.
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Fetch an account by exact email.
    async fn find_by_email(&self, email: &str)
    -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Every account ordered by id.
    async fn list(&self) -> Result<Vec<UserAccount>, UserPersistenceError>;

    /// Whether another account (not `except`) already uses `email`.
    async fn email_taken(
        &self,
        email: &str,
        except: Option<UserId>,
    ) -> Result<bool, UserPersistenceError>;

    /// Insert an account.
    async fn insert(&self, user: &NewUser) -> Result<UserAccount, UserPersistenceError>;

    /// Apply `changes`; `None` when the account does not exist.
    async fn update(
        &self,
        id: UserId,
        changes: &AccountChanges,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Delete an account; `false` when it did not exist.
    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError>;
}

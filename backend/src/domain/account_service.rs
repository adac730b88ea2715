//! Account services: authentication and user administration.
//!
//! One service backs both the [`LoginService`] and [`UserAdministration`]
//! driving ports because they share the user repository and the password
//! hasher.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::repository_errors::{
    map_asset_error, map_employee_error, map_hasher_error, map_user_error,
};
use crate::domain::ports::{
    AssetRepository, EmployeeRepository, LoginService, PasswordHasher, UserAdministration,
    UserRepository,
};
use crate::domain::{
    AccountChanges, AccountProfile, Error, FieldErrors, LoginCredentials, NewUser, UserAccount,
    UserForm, UserId,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";
const BOOTSTRAP_ADMIN_NAME: &str = "Administrator";

/// Service implementing the account driving ports.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    employees: Arc<dyn EmployeeRepository>,
    assets: Arc<dyn AssetRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AccountService {
    /// Create a service over the given repositories.
    pub fn new(
        users: Arc<dyn UserRepository>,
        employees: Arc<dyn EmployeeRepository>,
        assets: Arc<dyn AssetRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            employees,
            assets,
            hasher,
        }
    }

    /// Create an administrator account for `email` unless one already exists.
    ///
    /// Returns the new account, or `None` when the address was already
    /// registered. An existing non-admin account is left untouched.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the address or password fails the
    /// account rules, and a service error when persistence fails.
    pub async fn ensure_admin(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserAccount>, Error> {
        let form = UserForm {
            name: Some(BOOTSTRAP_ADMIN_NAME.to_owned()),
            email: Some(email.to_owned()),
            password: Some(password.to_owned()),
            password_confirmation: Some(password.to_owned()),
        };
        let draft = form.validate(true)?;
        if let Some(existing) = self
            .users
            .find_by_email(draft.email.as_ref())
            .await
            .map_err(map_user_error)?
        {
            if !existing.is_admin {
                warn!(user_id = %existing.id, "bootstrap address belongs to a non-admin account");
            }
            return Ok(None);
        }
        let Some(password) = draft.password else {
            return Err(Error::invalid_request("password is required"));
        };

        let password_hash = self
            .hasher
            .hash(password.expose())
            .await
            .map_err(map_hasher_error)?;
        let account = self
            .users
            .insert(&NewUser {
                name: draft.name,
                email: draft.email,
                password_hash,
                is_admin: true,
            })
            .await
            .map_err(map_user_error)?;
        info!(user_id = %account.id, "bootstrap administrator created");
        Ok(Some(account))
    }

    fn not_found(id: UserId) -> Error {
        Error::not_found(format!("user {id} not found"))
    }

    async fn ensure_email_free(&self, email: &str, except: Option<UserId>) -> Result<(), Error> {
        let taken = self
            .users
            .email_taken(email, except)
            .await
            .map_err(map_user_error)?;
        if taken {
            let mut errors = FieldErrors::new();
            errors.push("email", "taken", "email has already been taken");
            return Err(errors.into());
        }
        Ok(())
    }
}

#[async_trait]
impl LoginService for AccountService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserAccount, Error> {
        let Some(found) = self
            .users
            .find_credentials_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &found.password_hash)
            .await
            .map_err(map_hasher_error)?;
        if !verified {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(found.account)
    }

    async fn current_user(&self, id: UserId) -> Result<Option<UserAccount>, Error> {
        self.users.find_by_id(id).await.map_err(map_user_error)
    }
}

#[async_trait]
impl UserAdministration for AccountService {
    async fn list(&self) -> Result<Vec<UserAccount>, Error> {
        self.users.list().await.map_err(map_user_error)
    }

    async fn create(&self, form: &UserForm) -> Result<UserAccount, Error> {
        let draft = form.validate(true)?;
        self.ensure_email_free(draft.email.as_ref(), None).await?;
        let Some(password) = draft.password else {
            return Err(Error::invalid_request("password is required"));
        };

        let password_hash = self
            .hasher
            .hash(password.expose())
            .await
            .map_err(map_hasher_error)?;
        let account = self
            .users
            .insert(&NewUser {
                name: draft.name,
                email: draft.email,
                password_hash,
                is_admin: false,
            })
            .await
            .map_err(map_user_error)?;
        info!(user_id = %account.id, "user account created");
        Ok(account)
    }

    async fn profile(&self, id: UserId) -> Result<AccountProfile, Error> {
        let account = self
            .users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Self::not_found(id))?;
        let employee = self
            .employees
            .find_by_email(account.email.as_ref())
            .await
            .map_err(map_employee_error)?;
        let assets = match &employee {
            Some(record) => self
                .assets
                .assigned_to(record.employee.id)
                .await
                .map_err(map_asset_error)?,
            None => Vec::new(),
        };
        Ok(AccountProfile::new(account, employee, assets))
    }

    async fn update(&self, id: UserId, form: &UserForm) -> Result<UserAccount, Error> {
        let draft = form.validate(false)?;
        self.ensure_email_free(draft.email.as_ref(), Some(id)).await?;

        let password_hash = match &draft.password {
            Some(password) => Some(
                self.hasher
                    .hash(password.expose())
                    .await
                    .map_err(map_hasher_error)?,
            ),
            None => None,
        };
        let changes = AccountChanges {
            name: Some(draft.name),
            email: Some(draft.email),
            password_hash,
        };
        self.users
            .update(id, &changes)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn delete(&self, id: UserId) -> Result<(), Error> {
        let deleted = self.users.delete(id).await.map_err(map_user_error)?;
        if !deleted {
            return Err(Self::not_found(id));
        }
        info!(user_id = %id, "user account deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;

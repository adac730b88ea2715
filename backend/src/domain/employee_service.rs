//! Employee directory service.
//!
//! Validation and cross-table checks happen here; the repositories receive
//! fully validated plans and execute each one in a single transaction.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use super::repository_errors::{
    map_archive_error, map_asset_error, map_employee_error, map_hasher_error,
    map_organisation_error, map_user_error,
};
use crate::domain::ports::{
    ArchiveRepository, AssetRepository, EmployeeDirectory, EmployeeRepository,
    OrganisationRepository, PasswordHasher, UserRepository,
};
use crate::domain::{
    AccountChanges, AccountPlan, ArchivedEmployeeId, EmailAddress, EmployeeChanges,
    EmployeeDetails, EmployeeFields, EmployeeForm, EmployeeId, EmployeeRecord,
    EmployeeRestorePlan, Error, FieldErrors, FormMode, NewEmployee, NewUser, PasswordHash,
    UserId,
};

/// Service implementing the [`EmployeeDirectory`] driving port.
#[derive(Clone)]
pub struct EmployeeService {
    employees: Arc<dyn EmployeeRepository>,
    users: Arc<dyn UserRepository>,
    organisation: Arc<dyn OrganisationRepository>,
    assets: Arc<dyn AssetRepository>,
    archive: Arc<dyn ArchiveRepository>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

/// Repositories the employee service reads and writes.
#[derive(Clone)]
pub struct EmployeeServiceDeps {
    pub employees: Arc<dyn EmployeeRepository>,
    pub users: Arc<dyn UserRepository>,
    pub organisation: Arc<dyn OrganisationRepository>,
    pub assets: Arc<dyn AssetRepository>,
    pub archive: Arc<dyn ArchiveRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
}

impl EmployeeService {
    /// Create the service from its repositories and a clock for archive
    /// timestamps.
    pub fn new(deps: EmployeeServiceDeps, clock: Arc<dyn Clock>) -> Self {
        Self {
            employees: deps.employees,
            users: deps.users,
            organisation: deps.organisation,
            assets: deps.assets,
            archive: deps.archive,
            hasher: deps.hasher,
            clock,
        }
    }

    fn not_found(id: EmployeeId) -> Error {
        Error::not_found(format!("employee {id} not found"))
    }

    async fn check_references(
        &self,
        fields: &EmployeeFields,
        errors: &mut FieldErrors,
    ) -> Result<(), Error> {
        let check = self
            .organisation
            .check_references(fields.position_id, fields.assignment_id, fields.org_unit_id)
            .await
            .map_err(map_organisation_error)?;
        if !check.position {
            errors.push("positionId", "unknown", "positionId does not match a position");
        }
        if !check.assignment_place {
            errors.push(
                "assignmentId",
                "unknown",
                "assignmentId does not match an assignment place",
            );
        }
        if !check.org_unit {
            errors.push("orgUnitId", "unknown", "orgUnitId does not match an org unit");
        }
        Ok(())
    }

    /// The email must be unused by other employees and by accounts other
    /// than the employee's own.
    async fn check_email(
        &self,
        email: &EmailAddress,
        employee: Option<EmployeeId>,
        account: Option<UserId>,
        errors: &mut FieldErrors,
    ) -> Result<(), Error> {
        let employee_clash = self
            .employees
            .email_taken(email.as_ref(), employee)
            .await
            .map_err(map_employee_error)?;
        let account_clash = self
            .users
            .email_taken(email.as_ref(), account)
            .await
            .map_err(map_user_error)?;
        if employee_clash || account_clash {
            errors.push("email", "taken", "email has already been taken");
        }
        Ok(())
    }

    async fn hash(&self, password: &str) -> Result<PasswordHash, Error> {
        self.hasher.hash(password).await.map_err(map_hasher_error)
    }

    async fn load(&self, id: EmployeeId) -> Result<EmployeeRecord, Error> {
        self.employees
            .find(id)
            .await
            .map_err(map_employee_error)?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn plan_restore(&self, id: ArchivedEmployeeId) -> Result<EmployeeRestorePlan, Error> {
        let archived = self
            .archive
            .find_archived_employee(id)
            .await
            .map_err(map_archive_error)?
            .ok_or_else(|| Error::not_found(format!("archived employee {id} not found")))?;
        let employee = &archived.employee;

        let references = self
            .organisation
            .check_references(
                employee.position_id,
                employee.assignment_id,
                employee.org_unit_id,
            )
            .await
            .map_err(map_organisation_error)?;
        if !references.assignment_place || !references.org_unit {
            return Err(Error::conflict(
                "the employee's assignment place or org unit no longer exists",
            ));
        }
        let restore_position = if references.position {
            None
        } else {
            let archived_position = self
                .archive
                .find_archived_position_by_original(employee.position_id)
                .await
                .map_err(map_archive_error)?
                .ok_or_else(|| {
                    Error::conflict(format!(
                        "position {} no longer exists",
                        employee.position_id
                    ))
                })?;
            Some(archived_position.id)
        };

        let email_in_use = self
            .employees
            .email_taken(&employee.email, None)
            .await
            .map_err(map_employee_error)?;
        if email_in_use {
            return Err(Error::conflict(format!(
                "email {} is already used by an active employee",
                employee.email
            )));
        }

        let account = match self
            .users
            .find_by_email(&employee.email)
            .await
            .map_err(map_user_error)?
        {
            Some(existing) => AccountPlan::Existing(existing.id),
            None => {
                let email = EmailAddress::new(&employee.email).map_err(|err| {
                    Error::conflict(format!("archived email cannot be restored: {err}"))
                })?;
                // Random secret: the account stays locked until an
                // administrator sets a password.
                let password_hash = self.hash(&Uuid::new_v4().to_string()).await?;
                AccountPlan::Create(NewUser {
                    name: employee.full_name(),
                    email,
                    password_hash,
                    is_admin: false,
                })
            }
        };

        Ok(EmployeeRestorePlan {
            archived_id: archived.id,
            restore_position,
            account,
        })
    }
}

#[async_trait]
impl EmployeeDirectory for EmployeeService {
    async fn list(&self) -> Result<Vec<EmployeeRecord>, Error> {
        self.employees.list().await.map_err(map_employee_error)
    }

    async fn create(&self, form: &EmployeeForm) -> Result<EmployeeRecord, Error> {
        let draft = form.validate(FormMode::Create)?;
        let (Some(email), Some(password)) = (draft.email, draft.password) else {
            return Err(Error::invalid_request("email and password are required"));
        };

        let mut errors = FieldErrors::new();
        self.check_references(&draft.fields, &mut errors).await?;
        self.check_email(&email, None, None, &mut errors).await?;
        errors.finish(())?;

        let password_hash = self.hash(password.expose()).await?;
        let new_employee = NewEmployee {
            account: NewUser {
                name: draft.fields.full_name(),
                email: email.clone(),
                password_hash,
                is_admin: false,
            },
            fields: draft.fields,
            email,
            other_info: draft.other_info,
        };
        let id = self
            .employees
            .create(&new_employee)
            .await
            .map_err(map_employee_error)?;
        info!(employee_id = %id, "employee created");
        self.load(id).await
    }

    async fn view(&self, id: EmployeeId) -> Result<EmployeeDetails, Error> {
        let record = self.load(id).await?;
        let assets = self
            .assets
            .assigned_to(id)
            .await
            .map_err(map_asset_error)?;
        Ok(EmployeeDetails { record, assets })
    }

    async fn update(&self, id: EmployeeId, form: &EmployeeForm) -> Result<EmployeeRecord, Error> {
        let existing = self.load(id).await?;
        let draft = form.validate(FormMode::Update)?;

        let mut errors = FieldErrors::new();
        self.check_references(&draft.fields, &mut errors).await?;
        if let Some(email) = &draft.email {
            self.check_email(email, Some(id), existing.employee.user_id, &mut errors)
                .await?;
        }
        errors.finish(())?;

        let password_hash = match &draft.password {
            Some(password) => Some(self.hash(password.expose()).await?),
            None => None,
        };
        let changes = EmployeeChanges {
            account: AccountChanges {
                name: Some(draft.fields.full_name()),
                email: draft.email.clone(),
                password_hash,
            },
            fields: draft.fields,
            email: draft.email,
            other_info: draft.other_info,
        };
        let updated = self
            .employees
            .update(id, &changes)
            .await
            .map_err(map_employee_error)?;
        if !updated {
            return Err(Self::not_found(id));
        }
        self.load(id).await
    }

    async fn delete(&self, id: EmployeeId) -> Result<(), Error> {
        let deleted = self
            .employees
            .delete(id)
            .await
            .map_err(map_employee_error)?;
        if !deleted {
            return Err(Self::not_found(id));
        }
        info!(employee_id = %id, "employee deleted");
        Ok(())
    }

    async fn archive(&self, id: EmployeeId) -> Result<ArchivedEmployeeId, Error> {
        let archived_id = self
            .archive
            .archive_employee(id, self.clock.utc())
            .await
            .map_err(map_archive_error)?
            .ok_or_else(|| Self::not_found(id))?;
        info!(employee_id = %id, archived_id = %archived_id, "employee archived");
        Ok(archived_id)
    }

    async fn unarchive(&self, id: ArchivedEmployeeId) -> Result<EmployeeRecord, Error> {
        let plan = self.plan_restore(id).await?;
        let employee_id = self
            .archive
            .restore_employee(&plan)
            .await
            .map_err(map_archive_error)?;
        info!(employee_id = %employee_id, archived_id = %id, "employee restored");
        self.load(employee_id).await
    }
}

#[cfg(test)]
#[path = "employee_service_tests.rs"]
mod tests;

//! Driving port for the employee directory.

use async_trait::async_trait;

use crate::domain::{
    ArchivedEmployeeId, EmployeeDetails, EmployeeForm, EmployeeId, EmployeeRecord, Error,
};

/// Employee use-cases, including moving employees to and from the archive.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    async fn list(&self) -> Result<Vec<EmployeeRecord>, Error>;

    /// Create the employee together with its user account.
    async fn create(&self, form: &EmployeeForm) -> Result<EmployeeRecord, Error>;

    /// One employee with its assigned assets.
    async fn view(&self, id: EmployeeId) -> Result<EmployeeDetails, Error>;

    async fn update(&self, id: EmployeeId, form: &EmployeeForm) -> Result<EmployeeRecord, Error>;

    async fn delete(&self, id: EmployeeId) -> Result<(), Error>;

    /// Move an employee into the archive.
    async fn archive(&self, id: EmployeeId) -> Result<ArchivedEmployeeId, Error>;

    /// Restore an archived employee under its original id.
    async fn unarchive(&self, id: ArchivedEmployeeId) -> Result<EmployeeRecord, Error>;
}

/// Empty employee directory for handler tests that never reach it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEmployeeDirectory;

fn missing(id: impl std::fmt::Display) -> Error {
    Error::not_found(format!("employee {id} not found"))
}

#[async_trait]
impl EmployeeDirectory for FixtureEmployeeDirectory {
    async fn list(&self) -> Result<Vec<EmployeeRecord>, Error> {
        Ok(Vec::new())
    }

    async fn create(&self, _form: &EmployeeForm) -> Result<EmployeeRecord, Error> {
        Err(Error::service_unavailable("employee directory is not configured"))
    }

    async fn view(&self, id: EmployeeId) -> Result<EmployeeDetails, Error> {
        Err(missing(id))
    }

    async fn update(&self, id: EmployeeId, _form: &EmployeeForm) -> Result<EmployeeRecord, Error> {
        Err(missing(id))
    }

    async fn delete(&self, id: EmployeeId) -> Result<(), Error> {
        Err(missing(id))
    }

    async fn archive(&self, id: EmployeeId) -> Result<ArchivedEmployeeId, Error> {
        Err(missing(id))
    }

    async fn unarchive(&self, id: ArchivedEmployeeId) -> Result<EmployeeRecord, Error> {
        Err(Error::not_found(format!("archived employee {id} not found")))
    }
}

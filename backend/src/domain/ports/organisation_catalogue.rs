//! Driving port for maintaining organisational structure.

use async_trait::async_trait;

use crate::domain::{
    ArchivedPositionId, AssignmentPlace, AssignmentPlaceForm, EmployeeFormOptions, Error, OrgUnit,
    OrgUnitForm, Position, PositionForm, PositionId, SalaryGradeForm,
};

/// Org unit, position, and assignment place use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganisationCatalogue: Send + Sync {
    /// Dropdown options for the employee form.
    async fn options(&self) -> Result<EmployeeFormOptions, Error>;

    async fn create_org_unit(&self, form: &OrgUnitForm) -> Result<OrgUnit, Error>;

    async fn create_position(&self, form: &PositionForm) -> Result<Position, Error>;

    /// Change the salary grade of the position with the given item code.
    async fn set_salary_grade(&self, form: &SalaryGradeForm) -> Result<Position, Error>;

    async fn create_assignment_place(
        &self,
        form: &AssignmentPlaceForm,
    ) -> Result<AssignmentPlace, Error>;

    /// Move an unused position into the archive.
    async fn archive_position(&self, id: PositionId) -> Result<ArchivedPositionId, Error>;

    /// Restore an archived position under its original id.
    async fn unarchive_position(&self, id: ArchivedPositionId) -> Result<PositionId, Error>;
}

/// Empty catalogue for handler tests that never reach it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrganisationCatalogue;

fn unconfigured() -> Error {
    Error::service_unavailable("organisation catalogue is not configured")
}

#[async_trait]
impl OrganisationCatalogue for FixtureOrganisationCatalogue {
    async fn options(&self) -> Result<EmployeeFormOptions, Error> {
        Ok(EmployeeFormOptions::build(&[], &[], &[]))
    }

    async fn create_org_unit(&self, _form: &OrgUnitForm) -> Result<OrgUnit, Error> {
        Err(unconfigured())
    }

    async fn create_position(&self, _form: &PositionForm) -> Result<Position, Error> {
        Err(unconfigured())
    }

    async fn set_salary_grade(&self, _form: &SalaryGradeForm) -> Result<Position, Error> {
        Err(unconfigured())
    }

    async fn create_assignment_place(
        &self,
        _form: &AssignmentPlaceForm,
    ) -> Result<AssignmentPlace, Error> {
        Err(unconfigured())
    }

    async fn archive_position(&self, id: PositionId) -> Result<ArchivedPositionId, Error> {
        Err(Error::not_found(format!("position {id} not found")))
    }

    async fn unarchive_position(&self, id: ArchivedPositionId) -> Result<PositionId, Error> {
        Err(Error::not_found(format!("archived position {id} not found")))
    }
}

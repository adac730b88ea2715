//! Port abstraction for org units, positions, and assignment places.
use async_trait::async_trait;

use crate::domain::{
    AssignmentPlace, AssignmentPlaceId, NewAssignmentPlace, NewOrgUnit, NewPosition, OrgUnit,
    OrgUnitId, Position, PositionId, SalaryGradeChange,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by organisation repository adapters.
    pub enum OrganisationPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "organisation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "organisation repository query failed: {message}",
        /// A unique code constraint rejected the write.
        DuplicateCode { message: String } => "organisation code already registered: {message}",
    }
}

/// Which of an employee's references resolve to existing rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceCheck {
    pub position: bool,
    pub assignment_place: bool,
    pub org_unit: bool,
}

/// Catalogue of organisational structure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganisationRepository: Send + Sync {
    /// Org units ordered by name.
    async fn list_org_units(&self) -> Result<Vec<OrgUnit>, OrganisationPersistenceError>;

    /// Positions ordered by name.
    async fn list_positions(&self) -> Result<Vec<Position>, OrganisationPersistenceError>;

    /// Assignment places ordered by name.
    async fn list_assignment_places(
        &self,
    ) -> Result<Vec<AssignmentPlace>, OrganisationPersistenceError>;

    /// Whether an org unit with `org_code` exists.
    async fn org_code_exists(&self, org_code: &str) -> Result<bool, OrganisationPersistenceError>;

    /// Whether a position with `item_code` exists.
    async fn item_code_exists(&self, item_code: &str)
    -> Result<bool, OrganisationPersistenceError>;

    /// Fetch one position.
    async fn find_position(
        &self,
        id: PositionId,
    ) -> Result<Option<Position>, OrganisationPersistenceError>;

    /// Check the three references an employee carries.
    async fn check_references(
        &self,
        position: PositionId,
        assignment_place: AssignmentPlaceId,
        org_unit: OrgUnitId,
    ) -> Result<ReferenceCheck, OrganisationPersistenceError>;

    /// Number of employees holding a position.
    async fn employees_in_position(
        &self,
        id: PositionId,
    ) -> Result<i64, OrganisationPersistenceError>;

    async fn create_org_unit(
        &self,
        org_unit: &NewOrgUnit,
    ) -> Result<OrgUnit, OrganisationPersistenceError>;

    async fn create_position(
        &self,
        position: &NewPosition,
    ) -> Result<Position, OrganisationPersistenceError>;

    /// Set the salary grade of the position with the given item code;
    /// `None` when no position carries it.
    async fn set_salary_grade(
        &self,
        change: &SalaryGradeChange,
    ) -> Result<Option<Position>, OrganisationPersistenceError>;

    async fn create_assignment_place(
        &self,
        place: &NewAssignmentPlace,
    ) -> Result<AssignmentPlace, OrganisationPersistenceError>;
}

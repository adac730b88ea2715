//! PostgreSQL-backed `OrganisationRepository`: org units, positions and
//! assignment places.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    OrganisationPersistenceError, OrganisationRepository, ReferenceCheck,
};
use crate::domain::{
    AssignmentPlace, AssignmentPlaceId, NewAssignmentPlace, NewOrgUnit, NewPosition, OrgUnit,
    OrgUnitId, Position, PositionId, SalaryGradeChange,
};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{
    AssignmentPlaceRow, NewAssignmentPlaceRow, NewOrgUnitRow, OrgUnitRow, PositionRow,
    PositionValues,
};
use super::pool::{DbPool, PoolError};
use super::schema::{assignment_places, employees, org_units, positions};

/// Diesel-backed implementation of the [`OrganisationRepository`] port.
#[derive(Clone)]
pub struct DieselOrganisationRepository {
    pool: DbPool,
}

impl DieselOrganisationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OrganisationPersistenceError {
    OrganisationPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> OrganisationPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => OrganisationPersistenceError::connection(message),
        DieselFailure::UniqueViolation(constraint) => {
            OrganisationPersistenceError::duplicate_code(constraint)
        }
        DieselFailure::ForeignKeyViolation(message) | DieselFailure::Query(message) => {
            OrganisationPersistenceError::query(message)
        }
    }
}

#[async_trait]
impl OrganisationRepository for DieselOrganisationRepository {
    async fn list_org_units(&self) -> Result<Vec<OrgUnit>, OrganisationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<OrgUnitRow> = org_units::table
            .select(OrgUnitRow::as_select())
            .order_by((org_units::name, org_units::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(OrgUnit::from).collect())
    }

    async fn list_positions(&self) -> Result<Vec<Position>, OrganisationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PositionRow> = positions::table
            .select(PositionRow::as_select())
            .order_by((positions::name, positions::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Position::from).collect())
    }

    async fn list_assignment_places(
        &self,
    ) -> Result<Vec<AssignmentPlace>, OrganisationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AssignmentPlaceRow> = assignment_places::table
            .select(AssignmentPlaceRow::as_select())
            .order_by((assignment_places::name, assignment_places::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(AssignmentPlace::from).collect())
    }

    async fn org_code_exists(&self, org_code: &str) -> Result<bool, OrganisationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            org_units::table.filter(org_units::org_code.eq(org_code)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn item_code_exists(
        &self,
        item_code: &str,
    ) -> Result<bool, OrganisationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            positions::table.filter(positions::item_code.eq(item_code)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn find_position(
        &self,
        id: PositionId,
    ) -> Result<Option<Position>, OrganisationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PositionRow> = positions::table
            .find(id.get())
            .select(PositionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Position::from))
    }

    async fn check_references(
        &self,
        position: PositionId,
        assignment_place: AssignmentPlaceId,
        org_unit: OrgUnitId,
    ) -> Result<ReferenceCheck, OrganisationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (position, assignment_place, org_unit) = diesel::select((
            diesel::dsl::exists(positions::table.find(position.get())),
            diesel::dsl::exists(assignment_places::table.find(assignment_place.get())),
            diesel::dsl::exists(org_units::table.find(org_unit.get())),
        ))
        .get_result::<(bool, bool, bool)>(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(ReferenceCheck {
            position,
            assignment_place,
            org_unit,
        })
    }

    async fn employees_in_position(
        &self,
        id: PositionId,
    ) -> Result<i64, OrganisationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        employees::table
            .filter(employees::position_id.eq(id.get()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn create_org_unit(
        &self,
        org_unit: &NewOrgUnit,
    ) -> Result<OrgUnit, OrganisationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: OrgUnitRow = diesel::insert_into(org_units::table)
            .values(&NewOrgUnitRow {
                org_code: &org_unit.org_code,
                name: &org_unit.name,
                description: org_unit.description.as_deref(),
            })
            .returning(OrgUnitRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn create_position(
        &self,
        position: &NewPosition,
    ) -> Result<Position, OrganisationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: PositionRow = diesel::insert_into(positions::table)
            .values(&PositionValues {
                item_code: &position.item_code,
                name: &position.name,
                description: position.description.as_deref(),
                salary_grade: position.salary_grade.as_deref(),
                org_code: position.org_code.as_deref(),
            })
            .returning(PositionRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn set_salary_grade(
        &self,
        change: &SalaryGradeChange,
    ) -> Result<Option<Position>, OrganisationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PositionRow> =
            diesel::update(positions::table.filter(positions::item_code.eq(&change.item_code)))
                .set((
                    positions::salary_grade.eq(&change.salary_grade),
                    positions::updated_at.eq(diesel::dsl::now),
                ))
                .returning(PositionRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;
        Ok(row.map(Position::from))
    }

    async fn create_assignment_place(
        &self,
        place: &NewAssignmentPlace,
    ) -> Result<AssignmentPlace, OrganisationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: AssignmentPlaceRow = diesel::insert_into(assignment_places::table)
            .values(&NewAssignmentPlaceRow {
                name: &place.name,
                description: place.description.as_deref(),
            })
            .returning(AssignmentPlaceRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for organisation repository error mapping.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_are_connection_errors() {
        let err = map_pool_error(PoolError::build("bad url"));
        assert!(matches!(err, OrganisationPersistenceError::Connection { .. }));
    }

    #[rstest]
    fn missing_rows_are_query_errors() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, OrganisationPersistenceError::Query { .. }));
    }
}

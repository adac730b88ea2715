//! PostgreSQL-backed `ArchiveRepository` implementation.
//!
//! Archiving copies a row into its `archived_*` table and deletes the
//! original inside one transaction; restoring reverses that under the
//! original id. Other info rows go with their employee through the
//! `ON DELETE CASCADE` on `other_infos`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{ArchivePersistenceError, ArchiveRepository};
use crate::domain::{
    AccountPlan, ArchivedAsset, ArchivedAssetId, ArchivedEmployee, ArchivedEmployeeId,
    ArchivedEmployeeRecord, ArchivedOtherInfo, ArchivedPosition, ArchivedPositionId, AssetId,
    AssetRestorePlan, EmployeeId, EmployeeRestorePlan, PositionId, label_or_missing,
};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{
    ArchivedAssetRow, ArchivedEmployeeRow, ArchivedPositionRow, AssetRow, EmployeeRow,
    EmployeeValues, NewArchivedPositionRow, NewUserRow, OtherInfoRow, PositionRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{
    archived_assets, archived_employees, archived_positions, assets, assignment_places, employees,
    org_units, other_infos, positions, users,
};

/// Failure inside an archive transaction.
#[derive(Debug)]
enum TxError {
    Diesel(diesel::result::Error),
    /// A row the plan refers to is no longer there.
    Missing(String),
}

impl From<diesel::result::Error> for TxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

/// Diesel-backed implementation of the [`ArchiveRepository`] port.
#[derive(Clone)]
pub struct DieselArchiveRepository {
    pool: DbPool,
}

impl DieselArchiveRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ArchivePersistenceError {
    ArchivePersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> ArchivePersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => ArchivePersistenceError::connection(message),
        DieselFailure::UniqueViolation(constraint)
        | DieselFailure::ForeignKeyViolation(constraint) => {
            ArchivePersistenceError::conflict(constraint)
        }
        DieselFailure::Query(message) => ArchivePersistenceError::query(message),
    }
}

fn map_tx_error(error: TxError) -> ArchivePersistenceError {
    match error {
        TxError::Diesel(error) => map_diesel_error(error),
        TxError::Missing(message) => ArchivePersistenceError::missing(message),
    }
}

/// Other info captured in an archived employee row.
fn archived_other_info(row: &ArchivedEmployeeRow) -> ArchivedOtherInfo {
    ArchivedOtherInfo {
        date_of_birth: row.date_of_birth,
        tin_no: row.tin_no.clone(),
        date_appointment: row.date_appointment,
        date_last_promotion: row.date_last_promotion,
        civil_service: row.civil_service.clone(),
        education: row.education.clone(),
    }
}

/// Names of the rows an archived employee refers to, keyed by id.
#[derive(Debug, Default)]
struct LabelLookup {
    positions: HashMap<i64, String>,
    archived_positions: HashMap<i64, String>,
    assignment_places: HashMap<i64, String>,
    org_units: HashMap<i64, String>,
}

impl LabelLookup {
    /// Active position names win over the archived copy.
    fn position(&self, id: i64) -> Option<String> {
        self.positions
            .get(&id)
            .or_else(|| self.archived_positions.get(&id))
            .cloned()
    }

    fn record(&self, row: ArchivedEmployeeRow) -> Result<ArchivedEmployeeRecord, String> {
        let position_name = label_or_missing(self.position(row.position_id));
        let assignment_name =
            label_or_missing(self.assignment_places.get(&row.assignment_id).cloned());
        let org_unit_name = label_or_missing(self.org_units.get(&row.org_unit_id).cloned());
        let archived = row.into_archived()?;
        Ok(ArchivedEmployeeRecord {
            full_name: archived.employee.full_name(),
            archived,
            position_name,
            assignment_name,
            org_unit_name,
        })
    }
}

#[async_trait]
impl ArchiveRepository for DieselArchiveRepository {
    async fn archive_employee(
        &self,
        id: EmployeeId,
        archived_at: DateTime<Utc>,
    ) -> Result<Option<ArchivedEmployeeId>, ArchivePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let archived = conn
            .transaction(|conn| {
                async move {
                    let Some(employee) = employees::table
                        .find(id.get())
                        .select(EmployeeRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?
                    else {
                        return Ok(None);
                    };
                    let info: Option<OtherInfoRow> = other_infos::table
                        .find(id.get())
                        .select(OtherInfoRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;

                    let archived_id: i64 = diesel::insert_into(archived_employees::table)
                        .values(&ArchivedEmployeeRow::snapshot(employee, info, archived_at))
                        .returning(archived_employees::id)
                        .get_result(conn)
                        .await?;
                    diesel::delete(employees::table.find(id.get()))
                        .execute(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>(Some(archived_id))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(archived.map(ArchivedEmployeeId::new))
    }

    async fn archive_position(
        &self,
        id: PositionId,
        archived_at: DateTime<Utc>,
    ) -> Result<Option<ArchivedPositionId>, ArchivePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let archived = conn
            .transaction(|conn| {
                async move {
                    let Some(position) = positions::table
                        .find(id.get())
                        .select(PositionRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?
                    else {
                        return Ok(None);
                    };

                    let archived_id: i64 = diesel::insert_into(archived_positions::table)
                        .values(&NewArchivedPositionRow::new(position, archived_at))
                        .returning(archived_positions::id)
                        .get_result(conn)
                        .await?;
                    diesel::delete(positions::table.find(id.get()))
                        .execute(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>(Some(archived_id))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(archived.map(ArchivedPositionId::new))
    }

    async fn archive_asset(
        &self,
        id: AssetId,
        archived_at: DateTime<Utc>,
    ) -> Result<Option<ArchivedAssetId>, ArchivePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let archived = conn
            .transaction(|conn| {
                async move {
                    let Some(asset) = assets::table
                        .find(id.get())
                        .select(AssetRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?
                    else {
                        return Ok(None);
                    };

                    let archived_id: i64 = diesel::insert_into(archived_assets::table)
                        .values(&ArchivedAssetRow::snapshot(asset, archived_at))
                        .returning(archived_assets::id)
                        .get_result(conn)
                        .await?;
                    diesel::delete(assets::table.find(id.get()))
                        .execute(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>(Some(archived_id))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(archived.map(ArchivedAssetId::new))
    }

    async fn find_archived_employee(
        &self,
        id: ArchivedEmployeeId,
    ) -> Result<Option<ArchivedEmployee>, ArchivePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ArchivedEmployeeRow> = archived_employees::table
            .find(id.get())
            .select(ArchivedEmployeeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| row.into_archived().map_err(ArchivePersistenceError::query))
            .transpose()
    }

    async fn find_archived_position(
        &self,
        id: ArchivedPositionId,
    ) -> Result<Option<ArchivedPosition>, ArchivePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ArchivedPositionRow> = archived_positions::table
            .find(id.get())
            .select(ArchivedPositionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(ArchivedPosition::from))
    }

    async fn find_archived_position_by_original(
        &self,
        original: PositionId,
    ) -> Result<Option<ArchivedPosition>, ArchivePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ArchivedPositionRow> = archived_positions::table
            .filter(archived_positions::original_position_id.eq(original.get()))
            .select(ArchivedPositionRow::as_select())
            .order_by(archived_positions::archived_at.desc())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(ArchivedPosition::from))
    }

    async fn find_archived_asset(
        &self,
        id: ArchivedAssetId,
    ) -> Result<Option<ArchivedAsset>, ArchivePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ArchivedAssetRow> = archived_assets::table
            .find(id.get())
            .select(ArchivedAssetRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| row.into_archived().map_err(ArchivePersistenceError::query))
            .transpose()
    }

    async fn restore_employee(
        &self,
        plan: &EmployeeRestorePlan,
    ) -> Result<EmployeeId, ArchivePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = conn
            .transaction(|conn| {
                async move {
                    let archived: ArchivedEmployeeRow = archived_employees::table
                        .find(plan.archived_id.get())
                        .select(ArchivedEmployeeRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?
                        .ok_or_else(|| {
                            TxError::Missing(format!("archived employee {}", plan.archived_id))
                        })?;

                    if let Some(position_id) = plan.restore_position {
                        let position: ArchivedPositionRow = archived_positions::table
                            .find(position_id.get())
                            .select(ArchivedPositionRow::as_select())
                            .for_update()
                            .first(conn)
                            .await
                            .optional()?
                            .ok_or_else(|| {
                                TxError::Missing(format!("archived position {position_id}"))
                            })?;
                        diesel::insert_into(positions::table)
                            .values((
                                positions::id.eq(position.original_position_id),
                                position.restore_values(),
                            ))
                            .execute(conn)
                            .await?;
                        diesel::delete(archived_positions::table.find(position.id))
                            .execute(conn)
                            .await?;
                    }

                    let user_id = match &plan.account {
                        AccountPlan::Existing(user_id) => user_id.get(),
                        AccountPlan::Create(user) => {
                            diesel::insert_into(users::table)
                                .values(&NewUserRow {
                                    name: &user.name,
                                    email: user.email.as_ref(),
                                    password_hash: user.password_hash.as_ref(),
                                    is_admin: user.is_admin,
                                })
                                .returning(users::id)
                                .get_result::<i64>(conn)
                                .await?
                        }
                    };

                    diesel::insert_into(employees::table)
                        .values((
                            employees::id.eq(archived.original_employee_id),
                            EmployeeValues::from(&archived),
                            employees::email.eq(&archived.email),
                            employees::user_id.eq(Some(user_id)),
                        ))
                        .execute(conn)
                        .await?;

                    match archived_other_info(&archived).restorable() {
                        Some(info) => {
                            diesel::insert_into(other_infos::table)
                                .values(&OtherInfoRow::new(archived.original_employee_id, &info))
                                .execute(conn)
                                .await?;
                        }
                        None => debug!(
                            employee_id = archived.original_employee_id,
                            "archived employee has no date of birth; other info not restored"
                        ),
                    }

                    diesel::delete(archived_employees::table.find(archived.id))
                        .execute(conn)
                        .await?;
                    Ok::<_, TxError>(archived.original_employee_id)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_tx_error)?;
        Ok(EmployeeId::new(id))
    }

    async fn restore_position(
        &self,
        id: ArchivedPositionId,
    ) -> Result<PositionId, ArchivePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let original = conn
            .transaction(|conn| {
                async move {
                    let archived: ArchivedPositionRow = archived_positions::table
                        .find(id.get())
                        .select(ArchivedPositionRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?
                        .ok_or_else(|| TxError::Missing(format!("archived position {id}")))?;
                    diesel::insert_into(positions::table)
                        .values((
                            positions::id.eq(archived.original_position_id),
                            archived.restore_values(),
                        ))
                        .execute(conn)
                        .await?;
                    diesel::delete(archived_positions::table.find(archived.id))
                        .execute(conn)
                        .await?;
                    Ok::<_, TxError>(archived.original_position_id)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_tx_error)?;
        Ok(PositionId::new(original))
    }

    async fn restore_asset(
        &self,
        plan: &AssetRestorePlan,
    ) -> Result<AssetId, ArchivePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let original = conn
            .transaction(|conn| {
                async move {
                    let archived: ArchivedAssetRow = archived_assets::table
                        .find(plan.archived_id.get())
                        .select(ArchivedAssetRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?
                        .ok_or_else(|| {
                            TxError::Missing(format!("archived asset {}", plan.archived_id))
                        })?;
                    diesel::insert_into(assets::table)
                        .values((
                            assets::id.eq(archived.original_asset_id),
                            archived.restore_values(plan.clear_assignment),
                        ))
                        .execute(conn)
                        .await?;
                    diesel::delete(archived_assets::table.find(archived.id))
                        .execute(conn)
                        .await?;
                    Ok::<_, TxError>(archived.original_asset_id)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_tx_error)?;
        Ok(AssetId::new(original))
    }

    async fn list_archived_employees(
        &self,
    ) -> Result<Vec<ArchivedEmployeeRecord>, ArchivePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ArchivedEmployeeRow> = archived_employees::table
            .select(ArchivedEmployeeRow::as_select())
            .order_by((
                archived_employees::archived_at.desc(),
                archived_employees::id.desc(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let position_ids: Vec<i64> = rows.iter().map(|row| row.position_id).collect();
        let assignment_ids: Vec<i64> = rows.iter().map(|row| row.assignment_id).collect();
        let org_unit_ids: Vec<i64> = rows.iter().map(|row| row.org_unit_id).collect();

        let lookup = LabelLookup {
            positions: positions::table
                .filter(positions::id.eq_any(&position_ids))
                .select((positions::id, positions::name))
                .load::<(i64, String)>(&mut conn)
                .await
                .map_err(map_diesel_error)?
                .into_iter()
                .collect(),
            archived_positions: archived_positions::table
                .filter(archived_positions::original_position_id.eq_any(&position_ids))
                .select((
                    archived_positions::original_position_id,
                    archived_positions::name,
                ))
                .load::<(i64, String)>(&mut conn)
                .await
                .map_err(map_diesel_error)?
                .into_iter()
                .collect(),
            assignment_places: assignment_places::table
                .filter(assignment_places::id.eq_any(&assignment_ids))
                .select((assignment_places::id, assignment_places::name))
                .load::<(i64, String)>(&mut conn)
                .await
                .map_err(map_diesel_error)?
                .into_iter()
                .collect(),
            org_units: org_units::table
                .filter(org_units::id.eq_any(&org_unit_ids))
                .select((org_units::id, org_units::name))
                .load::<(i64, String)>(&mut conn)
                .await
                .map_err(map_diesel_error)?
                .into_iter()
                .collect(),
        };

        rows.into_iter()
            .map(|row| lookup.record(row).map_err(ArchivePersistenceError::query))
            .collect()
    }

    async fn list_archived_positions(
        &self,
    ) -> Result<Vec<ArchivedPosition>, ArchivePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ArchivedPositionRow> = archived_positions::table
            .select(ArchivedPositionRow::as_select())
            .order_by((
                archived_positions::archived_at.desc(),
                archived_positions::id.desc(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(ArchivedPosition::from).collect())
    }

    async fn list_archived_assets(&self) -> Result<Vec<ArchivedAsset>, ArchivePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ArchivedAssetRow> = archived_assets::table
            .select(ArchivedAssetRow::as_select())
            .order_by((archived_assets::archived_at.desc(), archived_assets::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|row| row.into_archived().map_err(ArchivePersistenceError::query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for archive label resolution and error mapping.
    use super::*;
    use crate::domain::MISSING_LABEL;
    use rstest::rstest;

    fn archived_row(position_id: i64) -> ArchivedEmployeeRow {
        ArchivedEmployeeRow {
            id: 3,
            original_employee_id: 12,
            first_name: "Maria".to_owned(),
            middle_name: Some("Santos".to_owned()),
            last_name: "Lopez".to_owned(),
            suffix: None,
            sex: "F".to_owned(),
            email: "maria@example.gov".to_owned(),
            status: "Inactive".to_owned(),
            position_id,
            assignment_id: 2,
            org_unit_id: 3,
            user_id: None,
            date_of_birth: None,
            tin_no: None,
            date_appointment: None,
            date_last_promotion: None,
            civil_service: None,
            education: None,
            archived_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    fn lookup() -> LabelLookup {
        LabelLookup {
            positions: HashMap::from([(1, "Clerk".to_owned())]),
            archived_positions: HashMap::from([
                (1, "Old Clerk".to_owned()),
                (4, "Driver".to_owned()),
            ]),
            assignment_places: HashMap::from([(2, "Main Office".to_owned())]),
            org_units: HashMap::new(),
        }
    }

    #[rstest]
    #[case(1, "Clerk")]
    #[case(4, "Driver")]
    #[case(9, MISSING_LABEL)]
    fn position_labels_prefer_active_rows(#[case] position_id: i64, #[case] expected: &str) {
        let record = lookup()
            .record(archived_row(position_id))
            .expect("valid row");
        assert_eq!(record.position_name, expected);
        assert_eq!(record.assignment_name, "Main Office");
        assert_eq!(record.org_unit_name, MISSING_LABEL);
        assert_eq!(record.full_name, "Maria Santos Lopez");
    }

    #[rstest]
    fn missing_rows_map_to_missing() {
        let err = map_tx_error(TxError::Missing("archived asset 4".to_owned()));
        assert!(matches!(err, ArchivePersistenceError::Missing { .. }));
    }

    #[rstest]
    fn not_found_inside_transactions_is_a_query_error() {
        let err = map_tx_error(TxError::from(diesel::result::Error::NotFound));
        assert!(matches!(err, ArchivePersistenceError::Query { .. }));
    }
}

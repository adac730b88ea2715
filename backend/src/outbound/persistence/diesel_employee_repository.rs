//! PostgreSQL-backed `EmployeeRepository` implementation.
//!
//! Employee rows are read joined with their position, assignment place, org
//! unit and optional other info. Creation and updates touch the account, the
//! employee, and its other info inside one transaction.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{EmployeePersistenceError, EmployeeRepository};
use crate::domain::{
    EmployeeChanges, EmployeeId, EmployeeLabels, EmployeeRecord, NewEmployee, OtherInfo,
};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{EmployeeRow, EmployeeValues, NewUserRow, OtherInfoRow, UserChangeset};
use super::pool::{DbPool, PoolError};
use super::schema::{assignment_places, employees, org_units, other_infos, positions, users};

/// Employee row with the labels of everything it references.
type EmployeeListingRow = (
    EmployeeRow,
    String,
    String,
    Option<String>,
    String,
    String,
    Option<OtherInfoRow>,
);

/// Joined employee query; callers add filters and ordering.
macro_rules! employee_listing {
    () => {
        employees::table
            .inner_join(positions::table)
            .inner_join(assignment_places::table)
            .inner_join(org_units::table)
            .left_join(other_infos::table)
            .select((
                EmployeeRow::as_select(),
                positions::name,
                positions::item_code,
                positions::salary_grade,
                assignment_places::name,
                org_units::name,
                other_infos::all_columns.nullable(),
            ))
    };
}

/// Diesel-backed implementation of the [`EmployeeRepository`] port.
#[derive(Clone)]
pub struct DieselEmployeeRepository {
    pool: DbPool,
}

impl DieselEmployeeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EmployeePersistenceError {
    EmployeePersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> EmployeePersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => EmployeePersistenceError::connection(message),
        DieselFailure::UniqueViolation(constraint) => {
            EmployeePersistenceError::duplicate_email(constraint)
        }
        DieselFailure::ForeignKeyViolation(message) | DieselFailure::Query(message) => {
            EmployeePersistenceError::query(message)
        }
    }
}

/// Assemble a domain record from a joined row.
fn listing_to_record(row: EmployeeListingRow) -> Result<EmployeeRecord, String> {
    let (employee, position_name, item_code, salary_grade, assignment_name, org_unit_name, info) =
        row;
    Ok(EmployeeRecord::new(
        employee.into_employee()?,
        EmployeeLabels {
            position_name,
            item_code: Some(item_code),
            salary_grade,
            assignment_name,
            org_unit_name,
        },
        info.map(OtherInfo::from),
    ))
}

fn to_records(
    rows: Vec<EmployeeListingRow>,
) -> Result<Vec<EmployeeRecord>, EmployeePersistenceError> {
    rows.into_iter()
        .map(|row| listing_to_record(row).map_err(EmployeePersistenceError::query))
        .collect()
}

async fn upsert_other_info<C>(
    conn: &mut C,
    employee_id: i64,
    info: &OtherInfo,
) -> Result<(), diesel::result::Error>
where
    C: AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let row = OtherInfoRow::new(employee_id, info);
    diesel::insert_into(other_infos::table)
        .values(&row)
        .on_conflict(other_infos::employee_id)
        .do_update()
        .set((
            other_infos::date_of_birth.eq(excluded(other_infos::date_of_birth)),
            other_infos::tin_no.eq(excluded(other_infos::tin_no)),
            other_infos::date_appointment.eq(excluded(other_infos::date_appointment)),
            other_infos::date_last_promotion.eq(excluded(other_infos::date_last_promotion)),
            other_infos::civil_service.eq(excluded(other_infos::civil_service)),
            other_infos::education.eq(excluded(other_infos::education)),
        ))
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl EmployeeRepository for DieselEmployeeRepository {
    async fn list(&self) -> Result<Vec<EmployeeRecord>, EmployeePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<EmployeeListingRow> = employee_listing!()
            .order_by(employees::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_records(rows)
    }

    async fn find(
        &self,
        id: EmployeeId,
    ) -> Result<Option<EmployeeRecord>, EmployeePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<EmployeeListingRow> = employee_listing!()
            .filter(employees::id.eq(id.get()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| listing_to_record(row).map_err(EmployeePersistenceError::query))
            .transpose()
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<EmployeeRecord>, EmployeePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<EmployeeListingRow> = employee_listing!()
            .filter(employees::email.eq(email))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| listing_to_record(row).map_err(EmployeePersistenceError::query))
            .transpose()
    }

    async fn exists(&self, id: EmployeeId) -> Result<bool, EmployeePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(employees::table.find(id.get())))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn email_taken(
        &self,
        email: &str,
        except: Option<EmployeeId>,
    ) -> Result<bool, EmployeePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = employees::table
            .filter(employees::email.eq(email))
            .select(employees::id)
            .into_boxed();
        if let Some(except) = except {
            query = query.filter(employees::id.ne(except.get()));
        }
        let found: Option<i64> = query
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(found.is_some())
    }

    async fn create(&self, employee: &NewEmployee) -> Result<EmployeeId, EmployeePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = conn
            .transaction(|conn| {
                async move {
                    let account = &employee.account;
                    let user_id: i64 = diesel::insert_into(users::table)
                        .values(&NewUserRow {
                            name: &account.name,
                            email: account.email.as_ref(),
                            password_hash: account.password_hash.as_ref(),
                            is_admin: account.is_admin,
                        })
                        .returning(users::id)
                        .get_result(conn)
                        .await?;

                    let employee_id: i64 = diesel::insert_into(employees::table)
                        .values((
                            EmployeeValues::from(&employee.fields),
                            employees::email.eq(employee.email.as_ref()),
                            employees::user_id.eq(Some(user_id)),
                        ))
                        .returning(employees::id)
                        .get_result(conn)
                        .await?;

                    upsert_other_info(conn, employee_id, &employee.other_info).await?;
                    Ok::<_, diesel::result::Error>(employee_id)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(EmployeeId::new(id))
    }

    async fn update(
        &self,
        id: EmployeeId,
        changes: &EmployeeChanges,
    ) -> Result<bool, EmployeePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let user_id: Option<Option<i64>> = diesel::update(employees::table.find(id.get()))
                    .set((
                        EmployeeValues::from(&changes.fields),
                        changes
                            .email
                            .as_ref()
                            .map(|email| employees::email.eq(email.as_ref())),
                        employees::updated_at.eq(diesel::dsl::now),
                    ))
                    .returning(employees::user_id)
                    .get_result(conn)
                    .await
                    .optional()?;
                let Some(user_id) = user_id else {
                    return Ok(false);
                };

                upsert_other_info(conn, id.get(), &changes.other_info).await?;

                match user_id {
                    Some(user_id) => {
                        let account = &changes.account;
                        diesel::update(users::table.find(user_id))
                            .set((
                                UserChangeset {
                                    name: account.name.as_deref(),
                                    email: account.email.as_ref().map(AsRef::as_ref),
                                    password_hash: account
                                        .password_hash
                                        .as_ref()
                                        .map(AsRef::as_ref),
                                },
                                users::updated_at.eq(diesel::dsl::now),
                            ))
                            .execute(conn)
                            .await?;
                    }
                    None => debug!(employee_id = %id, "employee has no linked account"),
                }
                Ok::<_, diesel::result::Error>(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: EmployeeId) -> Result<bool, EmployeePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(employees::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for employee row assembly and error mapping.
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn listing(sex: &str, info: Option<OtherInfoRow>) -> EmployeeListingRow {
        (
            EmployeeRow {
                id: 5,
                first_name: "Ana".to_owned(),
                middle_name: Some(" ".to_owned()),
                last_name: "Reyes".to_owned(),
                suffix: None,
                sex: sex.to_owned(),
                email: "ana@example.gov".to_owned(),
                status: "Active".to_owned(),
                position_id: 1,
                assignment_id: 2,
                org_unit_id: 3,
                user_id: None,
            },
            "Records Officer".to_owned(),
            "RO-1".to_owned(),
            None,
            "Main Office".to_owned(),
            "Admin".to_owned(),
            info,
        )
    }

    #[rstest]
    fn records_carry_labels_and_full_name() {
        let info = OtherInfoRow {
            employee_id: 5,
            date_of_birth: NaiveDate::from_ymd_opt(1988, 2, 14).expect("date"),
            tin_no: None,
            date_appointment: None,
            date_last_promotion: None,
            civil_service: None,
            education: None,
        };
        let record = listing_to_record(listing("F", Some(info))).expect("valid row");
        assert_eq!(record.full_name, "Ana Reyes");
        assert_eq!(record.labels.item_code.as_deref(), Some("RO-1"));
        assert!(record.other_info.is_some());
    }

    #[rstest]
    fn corrupt_rows_become_query_errors() {
        let err = to_records(vec![listing("?", None)]).expect_err("bad sex code");
        assert!(matches!(err, EmployeePersistenceError::Query { .. }));
    }

    #[rstest]
    fn pool_errors_are_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(err, EmployeePersistenceError::Connection { .. }));
    }
}

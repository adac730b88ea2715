//! PostgreSQL-backed `ReportingRepository`: read-only aggregates for the
//! dashboard and the purchase report.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::dsl::{count_star, sql};
use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PurchaseMeasure, ReportingPersistenceError, ReportingRepository};
use crate::domain::{HeadlineCounts, LocationTotal};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::pool::{DbPool, PoolError};
use super::schema::{assets, employees, org_units, users};

/// Calendar year of `assets.purchase_date`.
const PURCHASE_YEAR_SQL: &str = "CAST(EXTRACT(YEAR FROM assets.purchase_date) AS INTEGER)";

/// Diesel-backed implementation of the [`ReportingRepository`] port.
#[derive(Clone)]
pub struct DieselReportingRepository {
    pool: DbPool,
}

impl DieselReportingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReportingPersistenceError {
    ReportingPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> ReportingPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => ReportingPersistenceError::connection(message),
        DieselFailure::UniqueViolation(message)
        | DieselFailure::ForeignKeyViolation(message)
        | DieselFailure::Query(message) => ReportingPersistenceError::query(message),
    }
}

/// `SUM` yields `NULL` over no rows.
fn or_zero(rows: Vec<(NaiveDate, Option<i64>)>) -> Vec<(NaiveDate, i64)> {
    rows.into_iter()
        .map(|(day, total)| (day, total.unwrap_or_default()))
        .collect()
}

/// Distinct years, newest first.
fn newest_first(mut years: Vec<i32>) -> Vec<i32> {
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

#[async_trait]
impl ReportingRepository for DieselReportingRepository {
    async fn headline_counts(&self) -> Result<HeadlineCounts, ReportingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let employees: i64 = employees::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let users: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let assets: i64 = assets::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let assigned_assets: i64 = assets::table
            .filter(assets::assigned_to.is_not_null())
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(HeadlineCounts {
            employees,
            users,
            assets,
            assigned_assets,
        })
    }

    async fn purchases_per_day(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        measure: PurchaseMeasure,
    ) -> Result<Vec<(NaiveDate, i64)>, ReportingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let in_range = assets::table
            .filter(assets::purchase_date.ge(start))
            .filter(assets::purchase_date.lt(end))
            .group_by(assets::purchase_date)
            .order_by(assets::purchase_date);
        match measure {
            PurchaseMeasure::Count => in_range
                .select((assets::purchase_date, count_star()))
                .load::<(NaiveDate, i64)>(&mut conn)
                .await
                .map_err(map_diesel_error),
            PurchaseMeasure::UnitQuantity => in_range
                .select((assets::purchase_date, diesel::dsl::sum(assets::unit_qty)))
                .load::<(NaiveDate, Option<i64>)>(&mut conn)
                .await
                .map(or_zero)
                .map_err(map_diesel_error),
        }
    }

    async fn assigned_per_department(
        &self,
    ) -> Result<Vec<(String, i64)>, ReportingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        assets::table
            .inner_join(employees::table.inner_join(org_units::table))
            .group_by(org_units::name)
            .select((org_units::name, count_star()))
            .order_by(org_units::name)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn purchase_years(&self) -> Result<Vec<i32>, ReportingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let years: Vec<i32> = assets::table
            .select(sql::<Integer>(PURCHASE_YEAR_SQL))
            .distinct()
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(newest_first(years))
    }

    async fn quantity_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<i64, ReportingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: Option<i64> = assets::table
            .filter(assets::purchase_date.ge(start))
            .filter(assets::purchase_date.lt(end))
            .select(diesel::dsl::sum(assets::unit_qty))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(total.unwrap_or_default())
    }

    async fn quantity_by_location(&self) -> Result<Vec<LocationTotal>, ReportingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(String, Option<i64>)> = assets::table
            .group_by(assets::location)
            .select((assets::location, diesel::dsl::sum(assets::unit_qty)))
            .order_by(assets::location)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows
            .into_iter()
            .map(|(location, total)| LocationTotal {
                location,
                total: total.unwrap_or_default(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for aggregate post-processing.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_sums_become_zero() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 4).expect("date");
        assert_eq!(or_zero(vec![(day, None), (day, Some(7))]), vec![(day, 0), (day, 7)]);
    }

    #[rstest]
    fn years_are_sorted_newest_first() {
        assert_eq!(newest_first(vec![2021, 2024, 2021, 2023]), vec![2024, 2023, 2021]);
    }

    #[rstest]
    fn missing_rows_are_query_errors() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, ReportingPersistenceError::Query { .. }));
    }
}

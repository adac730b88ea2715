//! PostgreSQL-backed `AssetRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AssetPersistenceError, AssetRepository};
use crate::domain::{Asset, AssetDraft, AssetId, AssetRecord, EmployeeId, full_name};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{AssetRow, AssetValues};
use super::pool::{DbPool, PoolError};
use super::schema::{assets, employees};

/// Assignee name parts from the left-joined employee.
type AssigneeName = Option<(String, Option<String>, String, Option<String>)>;

/// Assets left-joined with the name of their assignee.
macro_rules! asset_listing {
    () => {
        assets::table.left_join(employees::table).select((
            AssetRow::as_select(),
            (
                employees::first_name,
                employees::middle_name,
                employees::last_name,
                employees::suffix,
            )
                .nullable(),
        ))
    };
}

/// Diesel-backed implementation of the [`AssetRepository`] port.
#[derive(Clone)]
pub struct DieselAssetRepository {
    pool: DbPool,
}

impl DieselAssetRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AssetPersistenceError {
    AssetPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> AssetPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => AssetPersistenceError::connection(message),
        DieselFailure::UniqueViolation(constraint) => AssetPersistenceError::duplicate_tag(constraint),
        DieselFailure::ForeignKeyViolation(message) | DieselFailure::Query(message) => {
            AssetPersistenceError::query(message)
        }
    }
}

fn to_asset(row: AssetRow) -> Result<Asset, AssetPersistenceError> {
    row.into_asset().map_err(AssetPersistenceError::query)
}

fn to_record((row, assignee): (AssetRow, AssigneeName)) -> Result<AssetRecord, AssetPersistenceError> {
    let assignee_name = assignee.map(|(first, middle, last, suffix)| {
        full_name(&first, middle.as_deref(), &last, suffix.as_deref())
    });
    Ok(AssetRecord {
        asset: to_asset(row)?,
        assignee_name,
    })
}

#[async_trait]
impl AssetRepository for DieselAssetRepository {
    async fn list(&self) -> Result<Vec<AssetRecord>, AssetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(AssetRow, AssigneeName)> = asset_listing!()
            .order_by(assets::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(to_record).collect()
    }

    async fn find(&self, id: AssetId) -> Result<Option<AssetRecord>, AssetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<(AssetRow, AssigneeName)> = asset_listing!()
            .filter(assets::id.eq(id.get()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_record).transpose()
    }

    async fn assigned_to(&self, employee: EmployeeId) -> Result<Vec<Asset>, AssetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AssetRow> = assets::table
            .filter(assets::assigned_to.eq(employee.get()))
            .select(AssetRow::as_select())
            .order_by(assets::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(to_asset).collect()
    }

    async fn tag_taken(
        &self,
        asset_tag: &str,
        except: Option<AssetId>,
    ) -> Result<bool, AssetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = assets::table
            .filter(assets::asset_tag.eq(asset_tag))
            .select(assets::id)
            .into_boxed();
        if let Some(except) = except {
            query = query.filter(assets::id.ne(except.get()));
        }
        let found: Option<i64> = query
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(found.is_some())
    }

    async fn create(&self, asset: &AssetDraft) -> Result<Asset, AssetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: AssetRow = diesel::insert_into(assets::table)
            .values(&AssetValues::from(asset))
            .returning(AssetRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_asset(row)
    }

    async fn update(
        &self,
        id: AssetId,
        asset: &AssetDraft,
    ) -> Result<Option<Asset>, AssetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AssetRow> = diesel::update(assets::table.find(id.get()))
            .set((
                AssetValues::from(asset),
                assets::updated_at.eq(diesel::dsl::now),
            ))
            .returning(AssetRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_asset).transpose()
    }

    async fn delete(&self, id: AssetId) -> Result<bool, AssetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(assets::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

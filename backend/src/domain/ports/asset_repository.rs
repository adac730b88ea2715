//! Port abstraction for inventory persistence.
use async_trait::async_trait;

use crate::domain::{Asset, AssetDraft, AssetId, AssetRecord, EmployeeId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by asset repository adapters.
    pub enum AssetPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "asset repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "asset repository query failed: {message}",
        /// The asset tag is already in use.
        DuplicateTag { message: String } => "asset tag already registered: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// Every asset with its assignee name, ordered by id.
    async fn list(&self) -> Result<Vec<AssetRecord>, AssetPersistenceError>;

    async fn find(&self, id: AssetId) -> Result<Option<AssetRecord>, AssetPersistenceError>;

    /// Assets currently assigned to an employee.
    async fn assigned_to(&self, employee: EmployeeId) -> Result<Vec<Asset>, AssetPersistenceError>;

    /// Whether another asset (not `except`) already carries `asset_tag`.
    async fn tag_taken(
        &self,
        asset_tag: &str,
        except: Option<AssetId>,
    ) -> Result<bool, AssetPersistenceError>;

    async fn create(&self, asset: &AssetDraft) -> Result<Asset, AssetPersistenceError>;

    /// Overwrite an asset; `None` when it does not exist.
    async fn update(
        &self,
        id: AssetId,
        asset: &AssetDraft,
    ) -> Result<Option<Asset>, AssetPersistenceError>;

    /// Delete an asset; `false` when it did not exist.
    async fn delete(&self, id: AssetId) -> Result<bool, AssetPersistenceError>;
}

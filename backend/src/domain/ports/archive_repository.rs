//! Port abstraction for moving records into and out of the archive tables.
//!
//! Every archive and restore call runs in a single transaction: the copy and
//! the delete either both happen or neither does.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    ArchivedAsset, ArchivedAssetId, ArchivedEmployee, ArchivedEmployeeId, ArchivedEmployeeRecord,
    ArchivedPosition, ArchivedPositionId, AssetId, AssetRestorePlan, EmployeeId,
    EmployeeRestorePlan, PositionId,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by archive repository adapters.
    pub enum ArchivePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "archive repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "archive repository query failed: {message}",
        /// A unique or foreign key constraint rejected the move.
        Conflict { message: String } => "archive move rejected: {message}",
        /// The row to move vanished inside the transaction.
        Missing { message: String } => "archive source row missing: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArchiveRepository: Send + Sync {
    /// Move an employee and its other info; `None` when it does not exist.
    async fn archive_employee(
        &self,
        id: EmployeeId,
        archived_at: DateTime<Utc>,
    ) -> Result<Option<ArchivedEmployeeId>, ArchivePersistenceError>;

    /// Move a position; `None` when it does not exist.
    async fn archive_position(
        &self,
        id: PositionId,
        archived_at: DateTime<Utc>,
    ) -> Result<Option<ArchivedPositionId>, ArchivePersistenceError>;

    /// Move an asset; `None` when it does not exist.
    async fn archive_asset(
        &self,
        id: AssetId,
        archived_at: DateTime<Utc>,
    ) -> Result<Option<ArchivedAssetId>, ArchivePersistenceError>;

    async fn find_archived_employee(
        &self,
        id: ArchivedEmployeeId,
    ) -> Result<Option<ArchivedEmployee>, ArchivePersistenceError>;

    async fn find_archived_position(
        &self,
        id: ArchivedPositionId,
    ) -> Result<Option<ArchivedPosition>, ArchivePersistenceError>;

    /// The archived copy of a position by the id it had while active.
    async fn find_archived_position_by_original(
        &self,
        original: PositionId,
    ) -> Result<Option<ArchivedPosition>, ArchivePersistenceError>;

    async fn find_archived_asset(
        &self,
        id: ArchivedAssetId,
    ) -> Result<Option<ArchivedAsset>, ArchivePersistenceError>;

    /// Execute a validated employee restore.
    async fn restore_employee(
        &self,
        plan: &EmployeeRestorePlan,
    ) -> Result<EmployeeId, ArchivePersistenceError>;

    /// Recreate a position under its original id.
    async fn restore_position(
        &self,
        id: ArchivedPositionId,
    ) -> Result<PositionId, ArchivePersistenceError>;

    /// Recreate an asset under its original id.
    async fn restore_asset(
        &self,
        plan: &AssetRestorePlan,
    ) -> Result<AssetId, ArchivePersistenceError>;

    /// Archived employees, newest first, with labels resolved.
    async fn list_archived_employees(
        &self,
    ) -> Result<Vec<ArchivedEmployeeRecord>, ArchivePersistenceError>;

    /// Archived positions, newest first.
    async fn list_archived_positions(&self)
    -> Result<Vec<ArchivedPosition>, ArchivePersistenceError>;

    /// Archived assets, newest first.
    async fn list_archived_assets(&self) -> Result<Vec<ArchivedAsset>, ArchivePersistenceError>;
}

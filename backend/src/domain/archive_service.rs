//! Read-only view over the archive tables.

use std::sync::Arc;

use async_trait::async_trait;

use super::repository_errors::map_archive_error;
use crate::domain::ports::{ArchiveQuery, ArchiveRepository};
use crate::domain::{ArchivedAsset, ArchivedEmployeeRecord, ArchivedPosition, Error};

/// Service implementing the [`ArchiveQuery`] driving port.
#[derive(Clone)]
pub struct ArchiveQueryService {
    archive: Arc<dyn ArchiveRepository>,
}

impl ArchiveQueryService {
    pub fn new(archive: Arc<dyn ArchiveRepository>) -> Self {
        Self { archive }
    }
}

#[async_trait]
impl ArchiveQuery for ArchiveQueryService {
    async fn archived_employees(&self) -> Result<Vec<ArchivedEmployeeRecord>, Error> {
        self.archive
            .list_archived_employees()
            .await
            .map_err(map_archive_error)
    }

    async fn archived_positions(&self) -> Result<Vec<ArchivedPosition>, Error> {
        self.archive
            .list_archived_positions()
            .await
            .map_err(map_archive_error)
    }

    async fn archived_assets(&self) -> Result<Vec<ArchivedAsset>, Error> {
        self.archive
            .list_archived_assets()
            .await
            .map_err(map_archive_error)
    }
}

//! Driving port for browsing the archive tables.

use async_trait::async_trait;

use crate::domain::{ArchivedAsset, ArchivedEmployeeRecord, ArchivedPosition, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArchiveQuery: Send + Sync {
    async fn archived_employees(&self) -> Result<Vec<ArchivedEmployeeRecord>, Error>;

    async fn archived_positions(&self) -> Result<Vec<ArchivedPosition>, Error>;

    async fn archived_assets(&self) -> Result<Vec<ArchivedAsset>, Error>;
}

/// Empty archive.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureArchiveQuery;

#[async_trait]
impl ArchiveQuery for FixtureArchiveQuery {
    async fn archived_employees(&self) -> Result<Vec<ArchivedEmployeeRecord>, Error> {
        Ok(Vec::new())
    }

    async fn archived_positions(&self) -> Result<Vec<ArchivedPosition>, Error> {
        Ok(Vec::new())
    }

    async fn archived_assets(&self) -> Result<Vec<ArchivedAsset>, Error> {
        Ok(Vec::new())
    }
}

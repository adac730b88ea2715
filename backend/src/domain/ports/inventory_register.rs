//! Driving port for the asset inventory.

use async_trait::async_trait;

use crate::domain::{ArchivedAssetId, Asset, AssetForm, AssetId, AssetRecord, Error};

/// Inventory use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRegister: Send + Sync {
    async fn list(&self) -> Result<Vec<AssetRecord>, Error>;

    async fn view(&self, id: AssetId) -> Result<AssetRecord, Error>;

    async fn create(&self, form: &AssetForm) -> Result<Asset, Error>;

    async fn update(&self, id: AssetId, form: &AssetForm) -> Result<Asset, Error>;

    async fn delete(&self, id: AssetId) -> Result<(), Error>;

    /// Move an asset into the archive.
    async fn archive(&self, id: AssetId) -> Result<ArchivedAssetId, Error>;

    /// Restore an archived asset under its original id.
    async fn unarchive(&self, id: ArchivedAssetId) -> Result<AssetId, Error>;
}

/// Empty inventory for handler tests that never reach it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureInventoryRegister;

fn missing(id: AssetId) -> Error {
    Error::not_found(format!("asset {id} not found"))
}

#[async_trait]
impl InventoryRegister for FixtureInventoryRegister {
    async fn list(&self) -> Result<Vec<AssetRecord>, Error> {
        Ok(Vec::new())
    }

    async fn view(&self, id: AssetId) -> Result<AssetRecord, Error> {
        Err(missing(id))
    }

    async fn create(&self, _form: &AssetForm) -> Result<Asset, Error> {
        Err(Error::service_unavailable("inventory is not configured"))
    }

    async fn update(&self, id: AssetId, _form: &AssetForm) -> Result<Asset, Error> {
        Err(missing(id))
    }

    async fn delete(&self, id: AssetId) -> Result<(), Error> {
        Err(missing(id))
    }

    async fn archive(&self, id: AssetId) -> Result<ArchivedAssetId, Error> {
        Err(missing(id))
    }

    async fn unarchive(&self, id: ArchivedAssetId) -> Result<AssetId, Error> {
        Err(Error::not_found(format!("archived asset {id} not found")))
    }
}

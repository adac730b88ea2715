//! Inventory register service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::repository_errors::{map_archive_error, map_asset_error, map_employee_error};
use crate::domain::ports::{
    ArchiveRepository, AssetRepository, EmployeeRepository, InventoryRegister,
};
use crate::domain::{
    ArchivedAssetId, Asset, AssetDraft, AssetForm, AssetId, AssetRecord, AssetRestorePlan, Error,
    FieldErrors,
};

/// Service implementing the [`InventoryRegister`] driving port.
#[derive(Clone)]
pub struct InventoryService {
    assets: Arc<dyn AssetRepository>,
    employees: Arc<dyn EmployeeRepository>,
    archive: Arc<dyn ArchiveRepository>,
    clock: Arc<dyn Clock>,
}

impl InventoryService {
    pub fn new(
        assets: Arc<dyn AssetRepository>,
        employees: Arc<dyn EmployeeRepository>,
        archive: Arc<dyn ArchiveRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            assets,
            employees,
            archive,
            clock,
        }
    }

    fn not_found(id: AssetId) -> Error {
        Error::not_found(format!("asset {id} not found"))
    }

    /// Validate the form and check the tag and assignee against storage.
    async fn validated(
        &self,
        form: &AssetForm,
        except: Option<AssetId>,
    ) -> Result<AssetDraft, Error> {
        let draft = form.validate()?;
        let mut errors = FieldErrors::new();
        let taken = self
            .assets
            .tag_taken(&draft.asset_tag, except)
            .await
            .map_err(map_asset_error)?;
        if taken {
            errors.push("assetTag", "taken", "assetTag has already been taken");
        }
        if let Some(employee) = draft.assigned_to {
            let exists = self
                .employees
                .exists(employee)
                .await
                .map_err(map_employee_error)?;
            if !exists {
                errors.push("assignedTo", "unknown", "assignedTo does not match an employee");
            }
        }
        errors.finish(draft).map_err(Error::from)
    }
}

#[async_trait]
impl InventoryRegister for InventoryService {
    async fn list(&self) -> Result<Vec<AssetRecord>, Error> {
        self.assets.list().await.map_err(map_asset_error)
    }

    async fn view(&self, id: AssetId) -> Result<AssetRecord, Error> {
        self.assets
            .find(id)
            .await
            .map_err(map_asset_error)?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, form: &AssetForm) -> Result<Asset, Error> {
        let draft = self.validated(form, None).await?;
        let asset = self.assets.create(&draft).await.map_err(map_asset_error)?;
        info!(asset_id = %asset.id, asset_tag = %asset.asset_tag, "asset created");
        Ok(asset)
    }

    async fn update(&self, id: AssetId, form: &AssetForm) -> Result<Asset, Error> {
        let draft = self.validated(form, Some(id)).await?;
        self.assets
            .update(id, &draft)
            .await
            .map_err(map_asset_error)?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn delete(&self, id: AssetId) -> Result<(), Error> {
        let deleted = self.assets.delete(id).await.map_err(map_asset_error)?;
        if !deleted {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    async fn archive(&self, id: AssetId) -> Result<ArchivedAssetId, Error> {
        let archived_id = self
            .archive
            .archive_asset(id, self.clock.utc())
            .await
            .map_err(map_archive_error)?
            .ok_or_else(|| Self::not_found(id))?;
        info!(asset_id = %id, archived_id = %archived_id, "asset archived");
        Ok(archived_id)
    }

    async fn unarchive(&self, id: ArchivedAssetId) -> Result<AssetId, Error> {
        let archived = self
            .archive
            .find_archived_asset(id)
            .await
            .map_err(map_archive_error)?
            .ok_or_else(|| Error::not_found(format!("archived asset {id} not found")))?;

        let tag_in_use = self
            .assets
            .tag_taken(&archived.asset.asset_tag, None)
            .await
            .map_err(map_asset_error)?;
        if tag_in_use {
            return Err(Error::conflict(format!(
                "asset tag {} is already in use",
                archived.asset.asset_tag
            )));
        }

        let clear_assignment = match archived.asset.assigned_to {
            Some(employee) => !self
                .employees
                .exists(employee)
                .await
                .map_err(map_employee_error)?,
            None => false,
        };
        let asset_id = self
            .archive
            .restore_asset(&AssetRestorePlan {
                archived_id: id,
                clear_assignment,
            })
            .await
            .map_err(map_archive_error)?;
        info!(asset_id = %asset_id, archived_id = %id, clear_assignment, "asset restored");
        Ok(asset_id)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{
        AssetPersistenceError, MockArchiveRepository, MockAssetRepository, MockEmployeeRepository,
    };
    use crate::domain::service_test_support::{asset, fixture_clock, fixture_timestamp};
    use crate::domain::{ArchivedAsset, DecimalInput, EmployeeId, ErrorCode};
    use rstest::{fixture, rstest};

    struct Mocks {
        assets: MockAssetRepository,
        employees: MockEmployeeRepository,
        archive: MockArchiveRepository,
    }

    impl Mocks {
        fn service(self) -> InventoryService {
            InventoryService::new(
                Arc::new(self.assets),
                Arc::new(self.employees),
                Arc::new(self.archive),
                fixture_clock(),
            )
        }
    }

    #[fixture]
    fn mocks() -> Mocks {
        Mocks {
            assets: MockAssetRepository::new(),
            employees: MockEmployeeRepository::new(),
            archive: MockArchiveRepository::new(),
        }
    }

    fn form(assigned_to: Option<i64>) -> AssetForm {
        AssetForm {
            asset_tag: Some("PC-0001".to_owned()),
            name: Some("Laptop".to_owned()),
            category: Some("IT Equipment".to_owned()),
            location: Some("Main Office".to_owned()),
            purchase_date: Some("2024-08-01".to_owned()),
            value: Some(DecimalInput::Text("55000.00".to_owned())),
            condition: Some("Good".to_owned()),
            assigned_to,
            status: Some("In use".to_owned()),
            ..AssetForm::default()
        }
    }

    fn archived(assigned_to: Option<i64>) -> ArchivedAsset {
        ArchivedAsset {
            id: ArchivedAssetId::new(4),
            asset: asset(1, assigned_to),
            archived_at: fixture_timestamp(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_checks_tag_and_assignee(mut mocks: Mocks) {
        mocks
            .assets
            .expect_tag_taken()
            .withf(|tag, except| tag == "PC-0001" && except.is_none())
            .return_once(|_, _| Ok(true));
        mocks.employees.expect_exists().return_once(|_| Ok(false));
        mocks.assets.expect_create().never();

        let err = mocks
            .service()
            .create(&form(Some(99)))
            .await
            .expect_err("invalid");
        let fields = &err.details().expect("details")["fields"];
        assert_eq!(fields[0]["field"], "assetTag");
        assert_eq!(fields[1]["field"], "assignedTo");
    }

    #[rstest]
    #[tokio::test]
    async fn create_persists_valid_assets(mut mocks: Mocks) {
        mocks.assets.expect_tag_taken().return_once(|_, _| Ok(false));
        mocks
            .assets
            .expect_create()
            .withf(|draft| draft.value.cents() == 5_500_000 && draft.unit_qty == 1)
            .return_once(|_| Ok(asset(1, None)));

        let created = mocks.service().create(&form(None)).await.expect("created");
        assert_eq!(created.id, AssetId::new(1));
    }

    #[rstest]
    #[tokio::test]
    async fn update_excludes_own_tag(mut mocks: Mocks) {
        mocks
            .assets
            .expect_tag_taken()
            .withf(|_, except| *except == Some(AssetId::new(1)))
            .return_once(|_, _| Ok(false));
        mocks.assets.expect_update().return_once(|_, _| Ok(None));

        let err = mocks
            .service()
            .update(AssetId::new(1), &form(None))
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_tag_race_is_conflict(mut mocks: Mocks) {
        mocks.assets.expect_tag_taken().return_once(|_, _| Ok(false));
        mocks
            .assets
            .expect_create()
            .return_once(|_| Err(AssetPersistenceError::duplicate_tag("assets_asset_tag_key")));

        let err = mocks.service().create(&form(None)).await.expect_err("race");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[case(Some(5), false, true)]
    #[case(Some(5), true, false)]
    #[case(None, false, false)]
    #[tokio::test]
    async fn unarchive_clears_assignment_of_missing_employee(
        mut mocks: Mocks,
        #[case] assigned_to: Option<i64>,
        #[case] employee_exists: bool,
        #[case] expect_cleared: bool,
    ) {
        mocks
            .archive
            .expect_find_archived_asset()
            .return_once(move |_| Ok(Some(archived(assigned_to))));
        mocks.assets.expect_tag_taken().return_once(|_, _| Ok(false));
        mocks
            .employees
            .expect_exists()
            .withf(|id| *id == EmployeeId::new(5))
            .returning(move |_| Ok(employee_exists));
        mocks
            .archive
            .expect_restore_asset()
            .withf(move |plan| plan.clear_assignment == expect_cleared)
            .return_once(|_| Ok(AssetId::new(1)));

        let restored = mocks
            .service()
            .unarchive(ArchivedAssetId::new(4))
            .await
            .expect("restored");
        assert_eq!(restored, AssetId::new(1));
    }

    #[rstest]
    #[tokio::test]
    async fn unarchive_refuses_reused_tag(mut mocks: Mocks) {
        mocks
            .archive
            .expect_find_archived_asset()
            .return_once(|_| Ok(Some(archived(None))));
        mocks.assets.expect_tag_taken().return_once(|_, _| Ok(true));
        mocks.archive.expect_restore_asset().never();

        let err = mocks
            .service()
            .unarchive(ArchivedAssetId::new(4))
            .await
            .expect_err("tag reused");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn archive_uses_clock(mut mocks: Mocks) {
        mocks
            .archive
            .expect_archive_asset()
            .withf(|_, archived_at| *archived_at == fixture_timestamp())
            .return_once(|_, _| Ok(Some(ArchivedAssetId::new(4))));

        let archived = mocks
            .service()
            .archive(AssetId::new(1))
            .await
            .expect("archived");
        assert_eq!(archived, ArchivedAssetId::new(4));
    }
}

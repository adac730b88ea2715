//! Organisation catalogue service: org units, positions, assignment places.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::repository_errors::{map_archive_error, map_organisation_error};
use crate::domain::ports::{ArchiveRepository, OrganisationCatalogue, OrganisationRepository};
use crate::domain::{
    ArchivedPositionId, AssignmentPlace, AssignmentPlaceForm, EmployeeFormOptions, Error,
    FieldErrors, OrgUnit, OrgUnitForm, Position, PositionForm, PositionId, SalaryGradeForm,
};

/// Service implementing the [`OrganisationCatalogue`] driving port.
#[derive(Clone)]
pub struct OrganisationService {
    organisation: Arc<dyn OrganisationRepository>,
    archive: Arc<dyn ArchiveRepository>,
    clock: Arc<dyn Clock>,
}

impl OrganisationService {
    pub fn new(
        organisation: Arc<dyn OrganisationRepository>,
        archive: Arc<dyn ArchiveRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            organisation,
            archive,
            clock,
        }
    }
}

#[async_trait]
impl OrganisationCatalogue for OrganisationService {
    async fn options(&self) -> Result<EmployeeFormOptions, Error> {
        let org_units = self
            .organisation
            .list_org_units()
            .await
            .map_err(map_organisation_error)?;
        let positions = self
            .organisation
            .list_positions()
            .await
            .map_err(map_organisation_error)?;
        let places = self
            .organisation
            .list_assignment_places()
            .await
            .map_err(map_organisation_error)?;
        Ok(EmployeeFormOptions::build(&org_units, &positions, &places))
    }

    async fn create_org_unit(&self, form: &OrgUnitForm) -> Result<OrgUnit, Error> {
        let org_unit = form.validate()?;
        let taken = self
            .organisation
            .org_code_exists(&org_unit.org_code)
            .await
            .map_err(map_organisation_error)?;
        if taken {
            let mut errors = FieldErrors::new();
            errors.push("orgCode", "taken", "orgCode has already been taken");
            return Err(errors.into());
        }
        self.organisation
            .create_org_unit(&org_unit)
            .await
            .map_err(map_organisation_error)
    }

    async fn create_position(&self, form: &PositionForm) -> Result<Position, Error> {
        let position = form.validate()?;
        let mut errors = FieldErrors::new();
        let taken = self
            .organisation
            .item_code_exists(&position.item_code)
            .await
            .map_err(map_organisation_error)?;
        if taken {
            errors.push("itemCode", "taken", "itemCode has already been taken");
        }
        if let Some(org_code) = &position.org_code {
            let known = self
                .organisation
                .org_code_exists(org_code)
                .await
                .map_err(map_organisation_error)?;
            if !known {
                errors.push("orgCode", "unknown", "orgCode does not match an org unit");
            }
        }
        errors.finish(())?;
        self.organisation
            .create_position(&position)
            .await
            .map_err(map_organisation_error)
    }

    async fn set_salary_grade(&self, form: &SalaryGradeForm) -> Result<Position, Error> {
        let change = form.validate()?;
        match self
            .organisation
            .set_salary_grade(&change)
            .await
            .map_err(map_organisation_error)?
        {
            Some(position) => Ok(position),
            None => {
                let mut errors = FieldErrors::new();
                errors.push("itemCode", "unknown", "itemCode does not match a position");
                Err(errors.into())
            }
        }
    }

    async fn create_assignment_place(
        &self,
        form: &AssignmentPlaceForm,
    ) -> Result<AssignmentPlace, Error> {
        let place = form.validate()?;
        self.organisation
            .create_assignment_place(&place)
            .await
            .map_err(map_organisation_error)
    }

    async fn archive_position(&self, id: PositionId) -> Result<ArchivedPositionId, Error> {
        let holders = self
            .organisation
            .employees_in_position(id)
            .await
            .map_err(map_organisation_error)?;
        if holders > 0 {
            return Err(Error::conflict(format!(
                "position {id} is still held by {holders} employee(s)"
            )));
        }
        let archived_id = self
            .archive
            .archive_position(id, self.clock.utc())
            .await
            .map_err(map_archive_error)?
            .ok_or_else(|| Error::not_found(format!("position {id} not found")))?;
        info!(position_id = %id, archived_id = %archived_id, "position archived");
        Ok(archived_id)
    }

    async fn unarchive_position(&self, id: ArchivedPositionId) -> Result<PositionId, Error> {
        let archived = self
            .archive
            .find_archived_position(id)
            .await
            .map_err(map_archive_error)?
            .ok_or_else(|| Error::not_found(format!("archived position {id} not found")))?;
        let in_use = self
            .organisation
            .item_code_exists(&archived.position.item_code)
            .await
            .map_err(map_organisation_error)?;
        if in_use {
            return Err(Error::conflict(format!(
                "item code {} is already in use",
                archived.position.item_code
            )));
        }
        let position_id = self
            .archive
            .restore_position(id)
            .await
            .map_err(map_archive_error)?;
        info!(position_id = %position_id, archived_id = %id, "position restored");
        Ok(position_id)
    }
}

//! Archived records and the plans used to restore them.
//!
//! Archiving moves a row into a parallel table and deletes the original in
//! the same transaction. Archived rows keep the identifier they had while
//! active so unarchiving can recreate them under the same id.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{
    ArchivedAssetId, ArchivedEmployeeId, ArchivedPositionId, Asset, Employee, NewUser, OtherInfo,
    Position, UserId,
};

/// Other-info snapshot stored with an archived employee.
///
/// The date of birth is optional here because employees created before the
/// supplementary sheet existed were archived without one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedOtherInfo {
    pub date_of_birth: Option<NaiveDate>,
    pub tin_no: Option<String>,
    pub date_appointment: Option<NaiveDate>,
    pub date_last_promotion: Option<NaiveDate>,
    pub civil_service: Option<String>,
    pub education: Option<String>,
}

impl ArchivedOtherInfo {
    /// Snapshot the details of an active employee.
    pub fn from_active(info: Option<&OtherInfo>) -> Self {
        info.map_or_else(Self::default, |info| Self {
            date_of_birth: Some(info.date_of_birth),
            tin_no: info.tin_no.clone(),
            date_appointment: info.date_appointment,
            date_last_promotion: info.date_last_promotion,
            civil_service: info.civil_service.clone(),
            education: info.education.clone(),
        })
    }

    /// Details to recreate on restore; `None` without a date of birth.
    pub fn restorable(&self) -> Option<OtherInfo> {
        Some(OtherInfo {
            date_of_birth: self.date_of_birth?,
            tin_no: self.tin_no.clone(),
            date_appointment: self.date_appointment,
            date_last_promotion: self.date_last_promotion,
            civil_service: self.civil_service.clone(),
            education: self.education.clone(),
        })
    }
}

/// Employee moved out of the active table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedEmployee {
    pub id: ArchivedEmployeeId,
    pub employee: Employee,
    pub other_info: ArchivedOtherInfo,
    pub archived_at: DateTime<Utc>,
}

/// Archived employee with labels resolved for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedEmployeeRecord {
    #[serde(flatten)]
    pub archived: ArchivedEmployee,
    pub full_name: String,
    pub position_name: String,
    pub assignment_name: String,
    pub org_unit_name: String,
}

/// Position moved out of the active table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedPosition {
    pub id: ArchivedPositionId,
    pub position: Position,
    pub archived_at: DateTime<Utc>,
}

/// Asset moved out of the active table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedAsset {
    pub id: ArchivedAssetId,
    pub asset: Asset,
    pub archived_at: DateTime<Utc>,
}

/// How the restored employee gets its user account.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountPlan {
    /// Link the account that already owns the email.
    Existing(UserId),
    /// Create a fresh account.
    Create(NewUser),
}

/// Steps for restoring one archived employee, executed in one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRestorePlan {
    pub archived_id: ArchivedEmployeeId,
    /// Archived position to restore first, when the employee's position is
    /// itself archived.
    pub restore_position: Option<ArchivedPositionId>,
    pub account: AccountPlan,
}

/// Steps for restoring one archived asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetRestorePlan {
    pub archived_id: ArchivedAssetId,
    /// Drop the assignment because the employee no longer exists.
    pub clear_assignment: bool,
}

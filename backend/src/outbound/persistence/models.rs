//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types return a
//! plain message on failure; each adapter wraps it in its own query error.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::domain::{
    ArchivedAsset, ArchivedAssetId, ArchivedEmployee, ArchivedEmployeeId, ArchivedOtherInfo,
    ArchivedPosition, ArchivedPositionId, Asset, AssetDraft, AssetId, AssetValue,
    AssignmentPlace, AssignmentPlaceId, EmailAddress, Employee, EmployeeFields, EmployeeId,
    OrgUnit, OrgUnitId, OtherInfo, Position, PositionId, UserAccount, UserId,
};

use super::schema::{
    archived_assets, archived_employees, archived_positions, assets, assignment_places,
    employees, org_units, other_infos, positions, users,
};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

impl UserRow {
    pub fn into_account(self) -> Result<UserAccount, String> {
        let email = EmailAddress::new(&self.email)
            .map_err(|err| format!("stored email for user {} is invalid: {err}", self.id))?;
        Ok(UserAccount {
            id: UserId::new(self.id),
            name: self.name,
            email,
            is_admin: self.is_admin,
        })
    }
}

/// Insertable struct for creating user accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub is_admin: bool,
}

/// Partial account update; `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password_hash: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Organisation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = org_units)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrgUnitRow {
    pub id: i64,
    pub org_code: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<OrgUnitRow> for OrgUnit {
    fn from(row: OrgUnitRow) -> Self {
        Self {
            id: OrgUnitId::new(row.id),
            org_code: row.org_code,
            name: row.name,
            description: row.description,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = org_units)]
pub(crate) struct NewOrgUnitRow<'a> {
    pub org_code: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = positions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PositionRow {
    pub id: i64,
    pub item_code: String,
    pub name: String,
    pub description: Option<String>,
    pub salary_grade: Option<String>,
    pub org_code: Option<String>,
}

impl From<PositionRow> for Position {
    fn from(row: PositionRow) -> Self {
        Self {
            id: PositionId::new(row.id),
            item_code: row.item_code,
            name: row.name,
            description: row.description,
            salary_grade: row.salary_grade,
            org_code: row.org_code,
        }
    }
}

/// Position columns shared by creation and restore; restore adds the id.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = positions)]
pub(crate) struct PositionValues<'a> {
    pub item_code: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub salary_grade: Option<&'a str>,
    pub org_code: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = assignment_places)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AssignmentPlaceRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<AssignmentPlaceRow> for AssignmentPlace {
    fn from(row: AssignmentPlaceRow) -> Self {
        Self {
            id: AssignmentPlaceId::new(row.id),
            name: row.name,
            description: row.description,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = assignment_places)]
pub(crate) struct NewAssignmentPlaceRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EmployeeRow {
    pub id: i64,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub suffix: Option<String>,
    pub sex: String,
    pub email: String,
    pub status: String,
    pub position_id: i64,
    pub assignment_id: i64,
    pub org_unit_id: i64,
    pub user_id: Option<i64>,
}

impl EmployeeRow {
    pub fn into_employee(self) -> Result<Employee, String> {
        Ok(Employee {
            id: EmployeeId::new(self.id),
            sex: self.sex.parse().map_err(|err| format!("employee {}: {err}", self.id))?,
            status: self
                .status
                .parse()
                .map_err(|err| format!("employee {}: {err}", self.id))?,
            first_name: self.first_name,
            middle_name: self.middle_name,
            last_name: self.last_name,
            suffix: self.suffix,
            email: self.email,
            position_id: PositionId::new(self.position_id),
            assignment_id: AssignmentPlaceId::new(self.assignment_id),
            org_unit_id: OrgUnitId::new(self.org_unit_id),
            user_id: self.user_id.map(UserId::new),
        })
    }
}

/// Employee columns written on create, update, and restore.
///
/// Email and account link are written separately so an update without a
/// new email leaves the stored one untouched.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = employees)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct EmployeeValues<'a> {
    pub first_name: &'a str,
    pub middle_name: Option<&'a str>,
    pub last_name: &'a str,
    pub suffix: Option<&'a str>,
    pub sex: &'a str,
    pub status: &'a str,
    pub position_id: i64,
    pub assignment_id: i64,
    pub org_unit_id: i64,
}

impl<'a> From<&'a EmployeeFields> for EmployeeValues<'a> {
    fn from(fields: &'a EmployeeFields) -> Self {
        Self {
            first_name: &fields.first_name,
            middle_name: fields.middle_name.as_deref(),
            last_name: &fields.last_name,
            suffix: fields.suffix.as_deref(),
            sex: fields.sex.as_str(),
            status: fields.status.as_str(),
            position_id: fields.position_id.get(),
            assignment_id: fields.assignment_id.get(),
            org_unit_id: fields.org_unit_id.get(),
        }
    }
}

impl<'a> From<&'a ArchivedEmployeeRow> for EmployeeValues<'a> {
    fn from(row: &'a ArchivedEmployeeRow) -> Self {
        Self {
            first_name: &row.first_name,
            middle_name: row.middle_name.as_deref(),
            last_name: &row.last_name,
            suffix: row.suffix.as_deref(),
            sex: &row.sex,
            status: &row.status,
            position_id: row.position_id,
            assignment_id: row.assignment_id,
            org_unit_id: row.org_unit_id,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = other_infos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct OtherInfoRow {
    pub employee_id: i64,
    pub date_of_birth: NaiveDate,
    pub tin_no: Option<String>,
    pub date_appointment: Option<NaiveDate>,
    pub date_last_promotion: Option<NaiveDate>,
    pub civil_service: Option<String>,
    pub education: Option<String>,
}

impl OtherInfoRow {
    pub fn new(employee_id: i64, info: &OtherInfo) -> Self {
        Self {
            employee_id,
            date_of_birth: info.date_of_birth,
            tin_no: info.tin_no.clone(),
            date_appointment: info.date_appointment,
            date_last_promotion: info.date_last_promotion,
            civil_service: info.civil_service.clone(),
            education: info.education.clone(),
        }
    }
}

impl From<OtherInfoRow> for OtherInfo {
    fn from(row: OtherInfoRow) -> Self {
        Self {
            date_of_birth: row.date_of_birth,
            tin_no: row.tin_no,
            date_appointment: row.date_appointment,
            date_last_promotion: row.date_last_promotion,
            civil_service: row.civil_service,
            education: row.education,
        }
    }
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = assets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AssetRow {
    pub id: i64,
    pub asset_tag: String,
    pub name: String,
    pub category: String,
    pub location: String,
    pub purchase_date: NaiveDate,
    pub value_cents: i64,
    pub condition: String,
    pub assigned_to: Option<i64>,
    pub status: String,
    pub property_no: Option<String>,
    pub serial_no: Option<String>,
    pub unit_qty: i32,
}

impl AssetRow {
    pub fn into_asset(self) -> Result<Asset, String> {
        let value = AssetValue::from_cents(self.value_cents)
            .map_err(|err| format!("asset {}: {err}", self.id))?;
        Ok(Asset {
            id: AssetId::new(self.id),
            asset_tag: self.asset_tag,
            name: self.name,
            category: self.category,
            location: self.location,
            purchase_date: self.purchase_date,
            value,
            condition: self.condition,
            assigned_to: self.assigned_to.map(EmployeeId::new),
            status: self.status,
            property_no: self.property_no,
            serial_no: self.serial_no,
            unit_qty: self.unit_qty,
        })
    }
}

/// Asset columns written on create, update, and restore.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = assets)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct AssetValues<'a> {
    pub asset_tag: &'a str,
    pub name: &'a str,
    pub category: &'a str,
    pub location: &'a str,
    pub purchase_date: NaiveDate,
    pub value_cents: i64,
    pub condition: &'a str,
    pub assigned_to: Option<i64>,
    pub status: &'a str,
    pub property_no: Option<&'a str>,
    pub serial_no: Option<&'a str>,
    pub unit_qty: i32,
}

impl<'a> From<&'a AssetDraft> for AssetValues<'a> {
    fn from(draft: &'a AssetDraft) -> Self {
        Self {
            asset_tag: &draft.asset_tag,
            name: &draft.name,
            category: &draft.category,
            location: &draft.location,
            purchase_date: draft.purchase_date,
            value_cents: draft.value.cents(),
            condition: &draft.condition,
            assigned_to: draft.assigned_to.map(EmployeeId::get),
            status: &draft.status,
            property_no: draft.property_no.as_deref(),
            serial_no: draft.serial_no.as_deref(),
            unit_qty: draft.unit_qty,
        }
    }
}

// ---------------------------------------------------------------------------
// Archives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = archived_positions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ArchivedPositionRow {
    pub id: i64,
    pub original_position_id: i64,
    pub item_code: String,
    pub name: String,
    pub description: Option<String>,
    pub salary_grade: Option<String>,
    pub org_code: Option<String>,
    pub archived_at: DateTime<Utc>,
}

impl ArchivedPositionRow {
    pub fn restore_values(&self) -> PositionValues<'_> {
        PositionValues {
            item_code: &self.item_code,
            name: &self.name,
            description: self.description.as_deref(),
            salary_grade: self.salary_grade.as_deref(),
            org_code: self.org_code.as_deref(),
        }
    }
}

impl From<ArchivedPositionRow> for ArchivedPosition {
    fn from(row: ArchivedPositionRow) -> Self {
        Self {
            id: ArchivedPositionId::new(row.id),
            position: Position {
                id: PositionId::new(row.original_position_id),
                item_code: row.item_code,
                name: row.name,
                description: row.description,
                salary_grade: row.salary_grade,
                org_code: row.org_code,
            },
            archived_at: row.archived_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = archived_positions)]
pub(crate) struct NewArchivedPositionRow {
    pub original_position_id: i64,
    pub item_code: String,
    pub name: String,
    pub description: Option<String>,
    pub salary_grade: Option<String>,
    pub org_code: Option<String>,
    pub archived_at: DateTime<Utc>,
}

impl NewArchivedPositionRow {
    pub fn new(row: PositionRow, archived_at: DateTime<Utc>) -> Self {
        Self {
            original_position_id: row.id,
            item_code: row.item_code,
            name: row.name,
            description: row.description,
            salary_grade: row.salary_grade,
            org_code: row.org_code,
            archived_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = archived_employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ArchivedEmployeeRow {
    #[diesel(skip_insertion)]
    pub id: i64,
    pub original_employee_id: i64,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub suffix: Option<String>,
    pub sex: String,
    pub email: String,
    pub status: String,
    pub position_id: i64,
    pub assignment_id: i64,
    pub org_unit_id: i64,
    pub user_id: Option<i64>,
    pub date_of_birth: Option<NaiveDate>,
    pub tin_no: Option<String>,
    pub date_appointment: Option<NaiveDate>,
    pub date_last_promotion: Option<NaiveDate>,
    pub civil_service: Option<String>,
    pub education: Option<String>,
    pub archived_at: DateTime<Utc>,
}

impl ArchivedEmployeeRow {
    /// Snapshot an active employee and its other info.
    pub fn snapshot(
        employee: EmployeeRow,
        other_info: Option<OtherInfoRow>,
        archived_at: DateTime<Utc>,
    ) -> Self {
        let info = ArchivedOtherInfo::from_active(other_info.map(OtherInfo::from).as_ref());
        Self {
            id: 0,
            original_employee_id: employee.id,
            first_name: employee.first_name,
            middle_name: employee.middle_name,
            last_name: employee.last_name,
            suffix: employee.suffix,
            sex: employee.sex,
            email: employee.email,
            status: employee.status,
            position_id: employee.position_id,
            assignment_id: employee.assignment_id,
            org_unit_id: employee.org_unit_id,
            user_id: employee.user_id,
            date_of_birth: info.date_of_birth,
            tin_no: info.tin_no,
            date_appointment: info.date_appointment,
            date_last_promotion: info.date_last_promotion,
            civil_service: info.civil_service,
            education: info.education,
            archived_at,
        }
    }

    pub fn into_archived(self) -> Result<ArchivedEmployee, String> {
        let employee = EmployeeRow {
            id: self.original_employee_id,
            first_name: self.first_name,
            middle_name: self.middle_name,
            last_name: self.last_name,
            suffix: self.suffix,
            sex: self.sex,
            email: self.email,
            status: self.status,
            position_id: self.position_id,
            assignment_id: self.assignment_id,
            org_unit_id: self.org_unit_id,
            user_id: self.user_id,
        }
        .into_employee()?;
        Ok(ArchivedEmployee {
            id: ArchivedEmployeeId::new(self.id),
            employee,
            other_info: ArchivedOtherInfo {
                date_of_birth: self.date_of_birth,
                tin_no: self.tin_no,
                date_appointment: self.date_appointment,
                date_last_promotion: self.date_last_promotion,
                civil_service: self.civil_service,
                education: self.education,
            },
            archived_at: self.archived_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = archived_assets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ArchivedAssetRow {
    #[diesel(skip_insertion)]
    pub id: i64,
    pub original_asset_id: i64,
    pub asset_tag: String,
    pub name: String,
    pub category: String,
    pub location: String,
    pub purchase_date: NaiveDate,
    pub value_cents: i64,
    pub condition: String,
    pub assigned_to: Option<i64>,
    pub status: String,
    pub property_no: Option<String>,
    pub serial_no: Option<String>,
    pub unit_qty: i32,
    pub archived_at: DateTime<Utc>,
}

impl ArchivedAssetRow {
    pub fn snapshot(row: AssetRow, archived_at: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            original_asset_id: row.id,
            asset_tag: row.asset_tag,
            name: row.name,
            category: row.category,
            location: row.location,
            purchase_date: row.purchase_date,
            value_cents: row.value_cents,
            condition: row.condition,
            assigned_to: row.assigned_to,
            status: row.status,
            property_no: row.property_no,
            serial_no: row.serial_no,
            unit_qty: row.unit_qty,
            archived_at,
        }
    }

    /// Columns to recreate the active asset with.
    pub fn restore_values(&self, clear_assignment: bool) -> AssetValues<'_> {
        AssetValues {
            asset_tag: &self.asset_tag,
            name: &self.name,
            category: &self.category,
            location: &self.location,
            purchase_date: self.purchase_date,
            value_cents: self.value_cents,
            condition: &self.condition,
            assigned_to: self.assigned_to.filter(|_| !clear_assignment),
            status: &self.status,
            property_no: self.property_no.as_deref(),
            serial_no: self.serial_no.as_deref(),
            unit_qty: self.unit_qty,
        }
    }

    pub fn into_archived(self) -> Result<ArchivedAsset, String> {
        let id = ArchivedAssetId::new(self.id);
        let archived_at = self.archived_at;
        let asset = AssetRow {
            id: self.original_asset_id,
            asset_tag: self.asset_tag,
            name: self.name,
            category: self.category,
            location: self.location,
            purchase_date: self.purchase_date,
            value_cents: self.value_cents,
            condition: self.condition,
            assigned_to: self.assigned_to,
            status: self.status,
            property_no: self.property_no,
            serial_no: self.serial_no,
            unit_qty: self.unit_qty,
        }
        .into_asset()?;
        Ok(ArchivedAsset {
            id,
            asset,
            archived_at,
        })
    }
}

//! Organisational structure: org units, positions, and assignment places.
//!
//! Forms arrive with every field optional so a missing value becomes a field
//! error rather than a deserialisation failure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{FieldErrors, MAX_LONG_TEXT_LEN, MAX_TEXT_LEN};
use super::{AssignmentPlaceId, OrgUnitId, PositionId};

/// Maximum length of a salary grade label.
pub const SALARY_GRADE_MAX_LEN: usize = 50;

/// Administrative department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrgUnit {
    pub id: OrgUnitId,
    pub org_code: String,
    pub name: String,
    pub description: Option<String>,
}

/// Job title with its plantilla item code and salary grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: PositionId,
    pub item_code: String,
    pub name: String,
    pub description: Option<String>,
    pub salary_grade: Option<String>,
    pub org_code: Option<String>,
}

/// Office or location a position is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPlace {
    pub id: AssignmentPlaceId,
    pub name: String,
    pub description: Option<String>,
}

/// Employment status of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum EmploymentStatus {
    Active,
    Inactive,
    #[serde(rename = "On Leave")]
    OnLeave,
}

impl EmploymentStatus {
    /// Every status in display order.
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::OnLeave];

    /// Label stored in the database and shown to clients.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::OnLeave => "On Leave",
        }
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownStatus(value.to_owned()))
    }
}

/// Raised when a stored or submitted status is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown employment status: {0}")]
pub struct UnknownStatus(pub String);

/// Org unit creation form.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrgUnitForm {
    pub org_code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Validated org unit ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrgUnit {
    pub org_code: String,
    pub name: String,
    pub description: Option<String>,
}

impl OrgUnitForm {
    /// Validate the form, collecting every failing field.
    pub fn validate(&self) -> Result<NewOrgUnit, FieldErrors> {
        let mut errors = FieldErrors::new();
        let org_code = errors.required("orgCode", self.org_code.as_deref(), MAX_TEXT_LEN);
        let name = errors.required("name", self.name.as_deref(), MAX_TEXT_LEN);
        let description =
            errors.optional("description", self.description.as_deref(), MAX_LONG_TEXT_LEN);
        errors.finish(NewOrgUnit {
            org_code,
            name,
            description,
        })
    }
}

/// Position creation form.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PositionForm {
    pub item_code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub salary_grade: Option<String>,
    pub org_code: Option<String>,
}

/// Validated position ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPosition {
    pub item_code: String,
    pub name: String,
    pub description: Option<String>,
    pub salary_grade: Option<String>,
    pub org_code: Option<String>,
}

impl PositionForm {
    /// Validate the form, collecting every failing field.
    pub fn validate(&self) -> Result<NewPosition, FieldErrors> {
        let mut errors = FieldErrors::new();
        let item_code = errors.required("itemCode", self.item_code.as_deref(), MAX_TEXT_LEN);
        let name = errors.required("name", self.name.as_deref(), MAX_TEXT_LEN);
        let description =
            errors.optional("description", self.description.as_deref(), MAX_LONG_TEXT_LEN);
        let salary_grade = errors.optional(
            "salaryGrade",
            self.salary_grade.as_deref(),
            SALARY_GRADE_MAX_LEN,
        );
        let org_code = errors.optional("orgCode", self.org_code.as_deref(), MAX_TEXT_LEN);
        errors.finish(NewPosition {
            item_code,
            name,
            description,
            salary_grade,
            org_code,
        })
    }
}

/// Salary grade change addressed by item code.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalaryGradeForm {
    pub item_code: Option<String>,
    pub salary_grade: Option<String>,
}

/// Validated salary grade change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryGradeChange {
    pub item_code: String,
    pub salary_grade: String,
}

impl SalaryGradeForm {
    /// Validate the form, collecting every failing field.
    pub fn validate(&self) -> Result<SalaryGradeChange, FieldErrors> {
        let mut errors = FieldErrors::new();
        let item_code = errors.required("itemCode", self.item_code.as_deref(), MAX_TEXT_LEN);
        let salary_grade = errors.required(
            "salaryGrade",
            self.salary_grade.as_deref(),
            SALARY_GRADE_MAX_LEN,
        );
        errors.finish(SalaryGradeChange {
            item_code,
            salary_grade,
        })
    }
}

/// Assignment place creation form.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPlaceForm {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Validated assignment place ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssignmentPlace {
    pub name: String,
    pub description: Option<String>,
}

impl AssignmentPlaceForm {
    /// Validate the form, collecting every failing field.
    pub fn validate(&self) -> Result<NewAssignmentPlace, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.required("name", self.name.as_deref(), MAX_TEXT_LEN);
        let description =
            errors.optional("description", self.description.as_deref(), MAX_LONG_TEXT_LEN);
        errors.finish(NewAssignmentPlace { name, description })
    }
}

/// Generic id/label pair for dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SelectOption {
    pub value: i64,
    pub label: String,
}

/// Position dropdown entry carrying the details shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PositionOption {
    pub value: PositionId,
    pub label: String,
    pub salary_grade: Option<String>,
    pub item_code: String,
    pub org_code: Option<String>,
}

impl From<&Position> for PositionOption {
    fn from(position: &Position) -> Self {
        Self {
            value: position.id,
            label: position.name.clone(),
            salary_grade: position.salary_grade.clone(),
            item_code: position.item_code.clone(),
            org_code: position.org_code.clone(),
        }
    }
}

/// Everything the employee form needs to populate its dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeFormOptions {
    pub org_units: Vec<SelectOption>,
    pub positions: Vec<PositionOption>,
    pub assignment_places: Vec<SelectOption>,
    pub employment_statuses: Vec<EmploymentStatus>,
}

impl EmployeeFormOptions {
    /// Assemble dropdown options from the current catalogue.
    pub fn build(
        org_units: &[OrgUnit],
        positions: &[Position],
        assignment_places: &[AssignmentPlace],
    ) -> Self {
        Self {
            org_units: org_units
                .iter()
                .map(|unit| SelectOption {
                    value: unit.id.get(),
                    label: unit.name.clone(),
                })
                .collect(),
            positions: positions.iter().map(PositionOption::from).collect(),
            assignment_places: assignment_places
                .iter()
                .map(|place| SelectOption {
                    value: place.id.get(),
                    label: place.name.clone(),
                })
                .collect(),
            employment_statuses: EmploymentStatus::ALL.to_vec(),
        }
    }
}

//! Employee records, their supplementary details, and the employee form.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::auth::NewPassword;
use super::organisation::EmploymentStatus;
use super::user::EmailAddress;
use super::validation::{FieldErrors, MAX_LONG_TEXT_LEN, MAX_TEXT_LEN};
use super::{Asset, AssignmentPlaceId, EmployeeId, OrgUnitId, PositionId, UserId};

/// Maximum length of a name suffix such as `Jr.` or `III`.
pub const SUFFIX_MAX_LEN: usize = 50;

/// Label shown when a referenced row no longer exists.
pub const MISSING_LABEL: &str = "N/A";

/// Sex as recorded on the employee sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Sex {
    M,
    F,
}

impl Sex {
    /// Stored single-letter code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::M => "M",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = UnknownSex;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "M" => Ok(Self::M),
            "F" => Ok(Self::F),
            other => Err(UnknownSex(other.to_owned())),
        }
    }
}

/// Raised when a stored or submitted sex code is not `M` or `F`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sex code: {0}")]
pub struct UnknownSex(pub String);

/// Join name parts into a display name, skipping blank parts.
///
/// # Examples
/// ```
/// use office_admin::domain::full_name;
///
/// assert_eq!(full_name("Juan", Some(""), "Dela Cruz", Some("Jr.")), "Juan Dela Cruz Jr.");
/// ```
pub fn full_name(first: &str, middle: Option<&str>, last: &str, suffix: Option<&str>) -> String {
    [Some(first), middle, Some(last), suffix]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Label for a referenced row, or [`MISSING_LABEL`] when it is gone.
pub fn label_or_missing(label: Option<String>) -> String {
    label.unwrap_or_else(|| MISSING_LABEL.to_owned())
}

/// Core employee row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub suffix: Option<String>,
    pub sex: Sex,
    pub email: String,
    pub status: EmploymentStatus,
    pub position_id: PositionId,
    pub assignment_id: AssignmentPlaceId,
    pub org_unit_id: OrgUnitId,
    pub user_id: Option<UserId>,
}

impl Employee {
    /// Display name built from the name parts.
    pub fn full_name(&self) -> String {
        full_name(
            &self.first_name,
            self.middle_name.as_deref(),
            &self.last_name,
            self.suffix.as_deref(),
        )
    }
}

/// Supplementary personnel details kept one-to-one with an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtherInfo {
    pub date_of_birth: NaiveDate,
    pub tin_no: Option<String>,
    pub date_appointment: Option<NaiveDate>,
    pub date_last_promotion: Option<NaiveDate>,
    pub civil_service: Option<String>,
    pub education: Option<String>,
}

/// Human-readable labels for an employee's references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeLabels {
    pub position_name: String,
    pub item_code: Option<String>,
    pub salary_grade: Option<String>,
    pub assignment_name: String,
    pub org_unit_name: String,
}

/// Employee with resolved labels and supplementary details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    #[serde(flatten)]
    pub employee: Employee,
    pub full_name: String,
    #[serde(flatten)]
    pub labels: EmployeeLabels,
    pub other_info: Option<OtherInfo>,
}

impl EmployeeRecord {
    /// Assemble a record, deriving the display name.
    pub fn new(employee: Employee, labels: EmployeeLabels, other_info: Option<OtherInfo>) -> Self {
        let full_name = employee.full_name();
        Self {
            employee,
            full_name,
            labels,
            other_info,
        }
    }
}

/// Employee record plus the assets currently assigned to the employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetails {
    #[serde(flatten)]
    pub record: EmployeeRecord,
    pub assets: Vec<Asset>,
}

/// Raw employee payload used for both creation and updates.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeForm {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub suffix: Option<String>,
    pub sex: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    pub position_id: Option<i64>,
    pub assignment_id: Option<i64>,
    pub org_unit_id: Option<i64>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    pub date_of_birth: Option<String>,
    pub tin_no: Option<String>,
    pub date_appointment: Option<String>,
    pub date_last_promotion: Option<String>,
    pub civil_service: Option<String>,
    pub education: Option<String>,
}

/// Whether a form creates a new employee or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

/// Editable employee columns after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeFields {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub suffix: Option<String>,
    pub sex: Sex,
    pub status: EmploymentStatus,
    pub position_id: PositionId,
    pub assignment_id: AssignmentPlaceId,
    pub org_unit_id: OrgUnitId,
}

impl EmployeeFields {
    /// Display name for the linked user account.
    pub fn full_name(&self) -> String {
        full_name(
            &self.first_name,
            self.middle_name.as_deref(),
            &self.last_name,
            self.suffix.as_deref(),
        )
    }
}

/// Employee form after field validation.
///
/// Email and password are only guaranteed present in [`FormMode::Create`].
/// Reference and uniqueness checks still need the repositories.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeDraft {
    pub fields: EmployeeFields,
    pub email: Option<EmailAddress>,
    pub password: Option<NewPassword>,
    pub other_info: OtherInfo,
}

/// Placeholders returned alongside errors; never persisted.
const PLACEHOLDER_DATE: NaiveDate = NaiveDate::MIN;

impl EmployeeForm {
    /// Validate every field, collecting all failures.
    pub fn validate(&self, mode: FormMode) -> Result<EmployeeDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let creating = mode == FormMode::Create;

        let first_name = errors.required("firstName", self.first_name.as_deref(), MAX_TEXT_LEN);
        let middle_name = errors.optional("middleName", self.middle_name.as_deref(), MAX_TEXT_LEN);
        let last_name = errors.required("lastName", self.last_name.as_deref(), MAX_TEXT_LEN);
        let suffix = errors.optional("suffix", self.suffix.as_deref(), SUFFIX_MAX_LEN);
        let sex = parse_choice::<Sex>(&mut errors, "sex", self.sex.as_deref(), "M or F");
        let status = parse_choice::<EmploymentStatus>(
            &mut errors,
            "status",
            self.status.as_deref(),
            "Active, Inactive or On Leave",
        );
        let email = parse_email(&mut errors, self.email.as_deref(), creating);
        let position_id = required_id(&mut errors, "positionId", self.position_id);
        let assignment_id = required_id(&mut errors, "assignmentId", self.assignment_id);
        let org_unit_id = required_id(&mut errors, "orgUnitId", self.org_unit_id);
        let password = NewPassword::collect(
            &mut errors,
            self.password.as_deref(),
            self.password_confirmation.as_deref(),
            creating,
        );

        let date_of_birth = errors.required_date("dateOfBirth", self.date_of_birth.as_deref());
        let other_info = OtherInfo {
            date_of_birth: date_of_birth.unwrap_or(PLACEHOLDER_DATE),
            tin_no: errors.optional("tinNo", self.tin_no.as_deref(), MAX_TEXT_LEN),
            date_appointment: errors
                .optional_date("dateAppointment", self.date_appointment.as_deref()),
            date_last_promotion: errors
                .optional_date("dateLastPromotion", self.date_last_promotion.as_deref()),
            civil_service: errors.optional(
                "civilService",
                self.civil_service.as_deref(),
                MAX_TEXT_LEN,
            ),
            education: errors.optional("education", self.education.as_deref(), MAX_LONG_TEXT_LEN),
        };

        let (Some(sex), Some(status), Some(position_id), Some(assignment_id), Some(org_unit_id)) =
            (sex, status, position_id, assignment_id, org_unit_id)
        else {
            return Err(errors);
        };

        errors.finish(EmployeeDraft {
            fields: EmployeeFields {
                first_name,
                middle_name,
                last_name,
                suffix,
                sex,
                status,
                position_id: PositionId::new(position_id),
                assignment_id: AssignmentPlaceId::new(assignment_id),
                org_unit_id: OrgUnitId::new(org_unit_id),
            },
            email,
            password,
            other_info,
        })
    }
}

fn parse_choice<T: FromStr>(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<&str>,
    allowed: &str,
) -> Option<T> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => {
            errors.push(field, "required", format!("{field} is required"));
            None
        }
        Some(raw) => raw.parse().ok().or_else(|| {
            errors.push(field, "invalid", format!("{field} must be one of {allowed}"));
            None
        }),
    }
}

fn parse_email(
    errors: &mut FieldErrors,
    value: Option<&str>,
    required: bool,
) -> Option<EmailAddress> {
    let raw = match value.filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw,
        None if required => {
            errors.push("email", "required", "email is required");
            return None;
        }
        None => return None,
    };
    EmailAddress::new(raw)
        .map_err(|err| errors.push("email", err.code(), err.to_string()))
        .ok()
}

fn required_id(errors: &mut FieldErrors, field: &'static str, value: Option<i64>) -> Option<i64> {
    match value {
        Some(id) if id > 0 => Some(id),
        _ => {
            errors.push(field, "required", format!("{field} is required"));
            None
        }
    }
}

/// Employee insertion together with the account created for it.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub fields: EmployeeFields,
    pub email: EmailAddress,
    pub other_info: OtherInfo,
    pub account: super::NewUser,
}

/// Employee update together with changes to its linked account.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeChanges {
    pub fields: EmployeeFields,
    pub email: Option<EmailAddress>,
    pub other_info: OtherInfo,
    pub account: super::AccountChanges,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn form() -> EmployeeForm {
        EmployeeForm {
            first_name: Some("Juan".to_owned()),
            middle_name: Some("Santos".to_owned()),
            last_name: Some("Dela Cruz".to_owned()),
            suffix: None,
            sex: Some("M".to_owned()),
            email: Some("juan@example.gov".to_owned()),
            status: Some("On Leave".to_owned()),
            position_id: Some(1),
            assignment_id: Some(2),
            org_unit_id: Some(3),
            password: Some("password123".to_owned()),
            password_confirmation: Some("password123".to_owned()),
            date_of_birth: Some("1990-05-17".to_owned()),
            tin_no: None,
            date_appointment: Some("2015-01-05".to_owned()),
            date_last_promotion: None,
            civil_service: None,
            education: None,
        }
    }

    #[rstest]
    fn valid_form_produces_draft(form: EmployeeForm) {
        let draft = form.validate(FormMode::Create).expect("valid form");
        assert_eq!(draft.fields.status, EmploymentStatus::OnLeave);
        assert_eq!(draft.fields.full_name(), "Juan Santos Dela Cruz");
        assert_eq!(
            draft.other_info.date_appointment,
            NaiveDate::from_ymd_opt(2015, 1, 5)
        );
        assert!(draft.password.is_some());
    }

    #[rstest]
    fn create_requires_email_and_password(mut form: EmployeeForm) {
        form.email = None;
        form.password = None;
        let errors = form.validate(FormMode::Create).expect_err("invalid form");
        assert!(errors.has("email"));
        assert!(errors.has("password"));
    }

    #[rstest]
    fn update_allows_missing_email_and_password(mut form: EmployeeForm) {
        form.email = None;
        form.password = None;
        form.password_confirmation = None;
        let draft = form.validate(FormMode::Update).expect("valid update");
        assert!(draft.email.is_none());
        assert!(draft.password.is_none());
    }

    #[rstest]
    #[case("sex", "X")]
    #[case("status", "Retired")]
    fn rejects_unknown_choices(mut form: EmployeeForm, #[case] field: &str, #[case] raw: &str) {
        match field {
            "sex" => form.sex = Some(raw.to_owned()),
            _ => form.status = Some(raw.to_owned()),
        }
        let errors = form.validate(FormMode::Update).expect_err("invalid choice");
        assert_eq!(errors.errors()[0].code, "invalid");
    }

    #[rstest]
    fn reports_every_failing_field(mut form: EmployeeForm) {
        form.first_name = None;
        form.suffix = Some("x".repeat(SUFFIX_MAX_LEN + 1));
        form.position_id = None;
        form.date_of_birth = Some("17/05/1990".to_owned());
        let errors = form.validate(FormMode::Create).expect_err("invalid form");
        for field in ["firstName", "suffix", "positionId", "dateOfBirth"] {
            assert!(errors.has(field), "missing error for {field}");
        }
    }

    #[rstest]
    #[case("Ana", None, "Reyes", None, "Ana Reyes")]
    #[case("Ana", Some(" "), "Reyes", Some("III"), "Ana Reyes III")]
    fn full_name_skips_blank_parts(
        #[case] first: &str,
        #[case] middle: Option<&str>,
        #[case] last: &str,
        #[case] suffix: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(full_name(first, middle, last, suffix), expected);
    }

    #[rstest]
    fn missing_labels_fall_back() {
        assert_eq!(label_or_missing(None), MISSING_LABEL);
        assert_eq!(label_or_missing(Some("Finance".to_owned())), "Finance");
    }
}

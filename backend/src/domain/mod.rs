//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed entities used by the API and
//! persistence layers, and the services implementing the driving ports.
//! Services only talk to driven ports, never to Diesel or actix directly.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - FieldErrors: per-field validation accumulator.
//! - Entities: UserAccount, Employee, OrgUnit, Position, AssignmentPlace,
//!   Asset and their archived counterparts.
//! - Services: AccountService, EmployeeService, OrganisationService,
//!   InventoryService, ArchiveQueryService, ReportingService.

pub mod archive;
pub mod asset;
pub mod auth;
pub mod employee;
pub mod error;
pub mod ids;
pub mod organisation;
pub mod ports;
pub mod profile;
pub mod reporting;
pub mod trace_id;
pub mod user;
pub mod validation;

mod account_service;
mod archive_service;
mod employee_service;
mod inventory_service;
mod organisation_service;
mod reporting_service;
mod repository_errors;
#[cfg(test)]
mod service_test_support;

pub use self::account_service::AccountService;
pub use self::archive::{
    AccountPlan, ArchivedAsset, ArchivedEmployee, ArchivedEmployeeRecord, ArchivedOtherInfo,
    ArchivedPosition, AssetRestorePlan, EmployeeRestorePlan,
};
pub use self::archive_service::ArchiveQueryService;
pub use self::asset::{
    Asset, AssetDraft, AssetForm, AssetRecord, AssetValue, AssetValueError, DecimalInput,
};
pub use self::auth::{LoginCredentials, LoginValidationError, NewPassword, PASSWORD_MIN_LEN};
pub use self::employee::{
    Employee, EmployeeChanges, EmployeeDetails, EmployeeDraft, EmployeeFields, EmployeeForm,
    EmployeeLabels, EmployeeRecord, FormMode, MISSING_LABEL, NewEmployee, OtherInfo, Sex,
    full_name, label_or_missing,
};
pub use self::employee_service::{EmployeeService, EmployeeServiceDeps};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ids::{
    ArchivedAssetId, ArchivedEmployeeId, ArchivedPositionId, AssetId, AssignmentPlaceId,
    EmployeeId, OrgUnitId, PositionId, UserId,
};
pub use self::inventory_service::InventoryService;
pub use self::organisation::{
    AssignmentPlace, AssignmentPlaceForm, EmployeeFormOptions, EmploymentStatus,
    NewAssignmentPlace, NewOrgUnit, NewPosition, OrgUnit, OrgUnitForm, Position, PositionForm,
    SalaryGradeChange, SalaryGradeForm,
};
pub use self::organisation_service::OrganisationService;
pub use self::profile::AccountProfile;
pub use self::reporting::{
    DEPARTMENTS, DailyTotal, Dashboard, DepartmentCount, HeadlineCounts, LocationTotal, MonthOption,
    MonthlyTotal, Report, ReportPeriod,
};
pub use self::reporting_service::ReportingService;
pub use self::trace_id::TraceId;
pub use self::user::{
    AccountChanges, DEFAULT_ACCOUNT_NAME, EmailAddress, EmailValidationError, NewUser,
    PasswordHash, Role, UserAccount, UserCredentials, UserDraft, UserForm,
};
pub use self::validation::{FieldError, FieldErrors};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use office_admin::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

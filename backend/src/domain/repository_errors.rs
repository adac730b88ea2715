//! Translation of driven-port failures into API errors.
//!
//! Connection failures surface as `service_unavailable`, query failures as
//! `internal_error`, and constraint violations as `conflict`.

use super::Error;
use super::ports::{
    ArchivePersistenceError, AssetPersistenceError, EmployeePersistenceError,
    OrganisationPersistenceError, PasswordHasherError, ReportingPersistenceError,
    UserPersistenceError,
};

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => {
            Error::conflict("email has already been taken")
        }
    }
}

pub(crate) fn map_employee_error(error: EmployeePersistenceError) -> Error {
    match error {
        EmployeePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("employee repository unavailable: {message}"))
        }
        EmployeePersistenceError::Query { message } => {
            Error::internal(format!("employee repository error: {message}"))
        }
        EmployeePersistenceError::DuplicateEmail { .. } => {
            Error::conflict("email has already been taken")
        }
    }
}

pub(crate) fn map_organisation_error(error: OrganisationPersistenceError) -> Error {
    match error {
        OrganisationPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("organisation repository unavailable: {message}"))
        }
        OrganisationPersistenceError::Query { message } => {
            Error::internal(format!("organisation repository error: {message}"))
        }
        OrganisationPersistenceError::DuplicateCode { message } => {
            Error::conflict(format!("code has already been taken: {message}"))
        }
    }
}

pub(crate) fn map_asset_error(error: AssetPersistenceError) -> Error {
    match error {
        AssetPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("asset repository unavailable: {message}"))
        }
        AssetPersistenceError::Query { message } => {
            Error::internal(format!("asset repository error: {message}"))
        }
        AssetPersistenceError::DuplicateTag { .. } => {
            Error::conflict("asset tag has already been taken")
        }
    }
}

pub(crate) fn map_archive_error(error: ArchivePersistenceError) -> Error {
    match error {
        ArchivePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("archive repository unavailable: {message}"))
        }
        ArchivePersistenceError::Query { message } => {
            Error::internal(format!("archive repository error: {message}"))
        }
        ArchivePersistenceError::Conflict { message } => Error::conflict(message),
        ArchivePersistenceError::Missing { message } => Error::not_found(message),
    }
}

pub(crate) fn map_reporting_error(error: ReportingPersistenceError) -> Error {
    match error {
        ReportingPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("reporting repository unavailable: {message}"))
        }
        ReportingPersistenceError::Query { message } => {
            Error::internal(format!("reporting repository error: {message}"))
        }
    }
}

pub(crate) fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`]) are implemented by the
//! outbound adapters. Driving ports ([`LoginService`], [`EmployeeDirectory`]
//! and friends) are what the HTTP layer calls; each comes with a `Fixture*`
//! implementation for handler tests that do not exercise it.

mod macros;
pub(crate) use macros::define_port_error;

mod archive_query;
mod archive_repository;
mod asset_repository;
mod employee_directory;
mod employee_repository;
mod inventory_register;
mod login_service;
mod organisation_catalogue;
mod organisation_repository;
mod password_hasher;
mod reporting_query;
mod reporting_repository;
mod user_administration;
mod user_repository;

#[cfg(test)]
pub use archive_query::MockArchiveQuery;
pub use archive_query::{ArchiveQuery, FixtureArchiveQuery};
#[cfg(test)]
pub use archive_repository::MockArchiveRepository;
pub use archive_repository::{ArchivePersistenceError, ArchiveRepository};
#[cfg(test)]
pub use asset_repository::MockAssetRepository;
pub use asset_repository::{AssetPersistenceError, AssetRepository};
#[cfg(test)]
pub use employee_directory::MockEmployeeDirectory;
pub use employee_directory::{EmployeeDirectory, FixtureEmployeeDirectory};
#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
pub use employee_repository::{EmployeePersistenceError, EmployeeRepository};
#[cfg(test)]
pub use inventory_register::MockInventoryRegister;
pub use inventory_register::{FixtureInventoryRegister, InventoryRegister};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{
    FIXTURE_ADMIN_EMAIL, FIXTURE_CLERK_EMAIL, FIXTURE_PASSWORD, FixtureLoginService, LoginService,
};
#[cfg(test)]
pub use organisation_catalogue::MockOrganisationCatalogue;
pub use organisation_catalogue::{FixtureOrganisationCatalogue, OrganisationCatalogue};
#[cfg(test)]
pub use organisation_repository::MockOrganisationRepository;
pub use organisation_repository::{
    OrganisationPersistenceError, OrganisationRepository, ReferenceCheck,
};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use reporting_query::MockReportingQuery;
pub use reporting_query::{FixtureReportingQuery, ReportRequest, ReportingQuery};
#[cfg(test)]
pub use reporting_repository::MockReportingRepository;
pub use reporting_repository::{
    PurchaseMeasure, ReportingPersistenceError, ReportingRepository,
};
#[cfg(test)]
pub use user_administration::MockUserAdministration;
pub use user_administration::{FixtureUserAdministration, UserAdministration};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};

#[cfg(test)]
mod tests;

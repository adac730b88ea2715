//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Each repository implements one domain port over a shared `bb8` pool of
//! `diesel-async` connections. Row structs (`models.rs`) and the table
//! definitions (`schema.rs`) stay private to this module; adapters translate
//! them into domain types and map database failures onto the port's error
//! enum.
//!
//! # Example
//!
//! ```ignore
//! use office_admin::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::connect(PoolConfig::new("postgres://localhost/office")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_archive_repository;
mod diesel_asset_repository;
mod diesel_basic_error_mapping;
mod diesel_employee_repository;
mod diesel_organisation_repository;
mod diesel_reporting_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_archive_repository::DieselArchiveRepository;
pub use diesel_asset_repository::DieselAssetRepository;
pub use diesel_employee_repository::DieselEmployeeRepository;
pub use diesel_organisation_repository::DieselOrganisationRepository;
pub use diesel_reporting_repository::DieselReportingRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

//! Shared helpers for the PostgreSQL-backed integration tests.
//!
//! Each suite provisions a throwaway database cloned from a migrated
//! template on the shared embedded cluster, then seeds the rows it needs
//! with plain SQL so the adapters under test only see their own writes.

pub mod cluster_skip;
pub mod embedded_postgres;
pub mod seed;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{provision_template_database, shared_cluster_handle};

/// Render a `postgres` error with its SQLSTATE and detail.
///
/// `postgres::Error`'s `Display` collapses server errors to `db error`,
/// which hides the constraint that failed.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

//! Port abstraction for the aggregate queries behind dashboards and reports.
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{HeadlineCounts, LocationTotal};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by reporting repository adapters.
    pub enum ReportingPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "reporting repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "reporting repository query failed: {message}",
    }
}

/// What a per-day purchase series measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseMeasure {
    /// Number of asset rows.
    Count,
    /// Summed unit quantity.
    UnitQuantity,
}

/// Read-only aggregates over employees, users and assets.
///
/// Date ranges are half-open: `start` inclusive, `end` exclusive.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportingRepository: Send + Sync {
    async fn headline_counts(&self) -> Result<HeadlineCounts, ReportingPersistenceError>;

    /// Purchases grouped by purchase date, only for days with data.
    async fn purchases_per_day(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        measure: PurchaseMeasure,
    ) -> Result<Vec<(NaiveDate, i64)>, ReportingPersistenceError>;

    /// Assigned assets grouped by the holder's org unit name.
    async fn assigned_per_department(
        &self,
    ) -> Result<Vec<(String, i64)>, ReportingPersistenceError>;

    /// Distinct purchase years.
    async fn purchase_years(&self) -> Result<Vec<i32>, ReportingPersistenceError>;

    /// Summed unit quantity purchased within the range.
    async fn quantity_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<i64, ReportingPersistenceError>;

    /// Summed unit quantity per location across all assets.
    async fn quantity_by_location(&self) -> Result<Vec<LocationTotal>, ReportingPersistenceError>;
}

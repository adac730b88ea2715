//! Driving port for the dashboard and monthly reports.

use async_trait::async_trait;

use crate::domain::{Dashboard, Error, Report};

/// Year and month requested for a report; absent values mean "current".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportRequest {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportingQuery: Send + Sync {
    /// Dashboard for the current month.
    async fn dashboard(&self) -> Result<Dashboard, Error>;

    /// Report for the requested month.
    async fn report(&self, request: ReportRequest) -> Result<Report, Error>;
}

/// Reporting query that always reports an outage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReportingQuery;

#[async_trait]
impl ReportingQuery for FixtureReportingQuery {
    async fn dashboard(&self) -> Result<Dashboard, Error> {
        Err(Error::service_unavailable("reporting is not configured"))
    }

    async fn report(&self, _request: ReportRequest) -> Result<Report, Error> {
        Err(Error::service_unavailable("reporting is not configured"))
    }
}

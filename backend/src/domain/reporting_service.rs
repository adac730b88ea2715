//! Dashboard and monthly report assembly.
//!
//! Chart series degrade to empty or zero-filled data when their query
//! fails; headline counts do not.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::error;

use super::repository_errors::map_reporting_error;
use crate::domain::ports::{PurchaseMeasure, ReportRequest, ReportingQuery, ReportingRepository};
use crate::domain::reporting::{
    ReportPeriod, TRAILING_MONTHS, available_months, available_years, daily_series,
    department_series,
};
use crate::domain::{Dashboard, DailyTotal, Error, MonthlyTotal, Report};

/// Service implementing the [`ReportingQuery`] driving port.
#[derive(Clone)]
pub struct ReportingService {
    reporting: Arc<dyn ReportingRepository>,
    clock: Arc<dyn Clock>,
}

impl ReportingService {
    pub fn new(reporting: Arc<dyn ReportingRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { reporting, clock }
    }

    fn today(&self) -> chrono::NaiveDate {
        self.clock.utc().date_naive()
    }

    async fn purchases_by_day(
        &self,
        period: ReportPeriod,
        measure: PurchaseMeasure,
    ) -> Vec<DailyTotal> {
        let totals = match self
            .reporting
            .purchases_per_day(period.start(), period.end_exclusive(), measure)
            .await
        {
            Ok(totals) => totals,
            Err(err) => {
                error!(error = %err, ?measure, "daily purchase query failed");
                Vec::new()
            }
        };
        daily_series(period, &totals)
    }

    async fn spend_window(&self, period: ReportPeriod) -> Result<Vec<MonthlyTotal>, Error> {
        let mut window = Vec::new();
        for month in period.trailing(TRAILING_MONTHS) {
            let total = self
                .reporting
                .quantity_between(month.start(), month.end_exclusive())
                .await
                .map_err(map_reporting_error)?;
            window.push(MonthlyTotal::new(month, total));
        }
        Ok(window)
    }
}

#[async_trait]
impl ReportingQuery for ReportingService {
    async fn dashboard(&self) -> Result<Dashboard, Error> {
        let period = ReportPeriod::current(self.today());
        let totals = self
            .reporting
            .headline_counts()
            .await
            .map_err(map_reporting_error)?;
        let assets_by_day = self.purchases_by_day(period, PurchaseMeasure::Count).await;
        let departments = match self.reporting.assigned_per_department().await {
            Ok(rows) => rows,
            Err(err) => {
                error!(error = %err, "department query failed");
                Vec::new()
            }
        };

        Ok(Dashboard {
            totals,
            selected_year: period.year_label(),
            selected_month: period.month_label(),
            days_in_month: period.days_in_month(),
            assets_by_day,
            assigned_per_department: department_series(&departments),
        })
    }

    async fn report(&self, request: ReportRequest) -> Result<Report, Error> {
        let today = self.today();
        let period = ReportPeriod::resolve(today, request.year, request.month);
        let assets_by_day = self
            .purchases_by_day(period, PurchaseMeasure::UnitQuantity)
            .await;
        let purchase_years = self
            .reporting
            .purchase_years()
            .await
            .map_err(map_reporting_error)?;
        let current = ReportPeriod::current(today);
        let total_spend_by_month = self.spend_window(period).await?;
        let assets_by_location = match self.reporting.quantity_by_location().await {
            Ok(rows) => rows,
            Err(err) => {
                error!(error = %err, "location query failed");
                Vec::new()
            }
        };

        Ok(Report {
            selected_year: period.year_label(),
            selected_month: period.month_label(),
            days_in_month: period.days_in_month(),
            assets_by_day,
            available_years: available_years(current.year(), &purchase_years),
            available_months: available_months(),
            total_spend_by_month,
            assets_by_location,
        })
    }
}

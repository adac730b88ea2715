//! Dashboard and report payloads plus the calendar arithmetic behind them.
//!
//! Repositories return sparse aggregates (only days or departments with
//! data). The helpers here turn them into dense, zero-filled series.

use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

/// Departments charted on the dashboard, in display order.
pub const DEPARTMENTS: [&str; 10] = [
    "PMD",
    "Finance",
    "Admin",
    "Legal",
    "CDD",
    "SMD",
    "LPDD",
    "Enforcement",
    "MSD",
    "Technical",
];

/// Number of months in the trailing spend window.
pub const TRAILING_MONTHS: u32 = 6;

/// How many recent years are always offered, the current one included.
pub const RECENT_YEARS: i32 = 4;

/// Earliest year a report can be requested for.
pub const MIN_REPORT_YEAR: i32 = 1900;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Calendar month a dashboard or report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    first_day: NaiveDate,
}

impl ReportPeriod {
    /// The month containing `today`.
    pub fn current(today: NaiveDate) -> Self {
        Self::resolve(today, None, None)
    }

    /// Resolve a requested year and month against `today`.
    ///
    /// Future years fall back to the current year and months are clamped
    /// into `1..=12`.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use office_admin::domain::ReportPeriod;
    ///
    /// let today = NaiveDate::from_ymd_opt(2025, 4, 9).unwrap();
    /// let period = ReportPeriod::resolve(today, Some(2030), Some(14));
    /// assert_eq!((period.year(), period.month()), (2025, 12));
    /// ```
    pub fn resolve(today: NaiveDate, year: Option<i32>, month: Option<u32>) -> Self {
        let year = year
            .unwrap_or(today.year())
            .clamp(MIN_REPORT_YEAR, today.year().max(MIN_REPORT_YEAR));
        let month = month.unwrap_or(today.month()).clamp(1, 12);
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)
            .unwrap_or_else(|| today.with_day(1).unwrap_or(today));
        Self { first_day }
    }

    pub fn year(self) -> i32 {
        self.first_day.year()
    }

    pub fn month(self) -> u32 {
        self.first_day.month()
    }

    /// First day of the month.
    pub fn start(self) -> NaiveDate {
        self.first_day
    }

    /// First day of the following month.
    pub fn end_exclusive(self) -> NaiveDate {
        self.first_day
            .checked_add_months(Months::new(1))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Number of days in the month.
    pub fn days_in_month(self) -> u32 {
        let days = (self.end_exclusive() - self.first_day).num_days();
        u32::try_from(days).unwrap_or(0)
    }

    /// Year formatted for display.
    pub fn year_label(self) -> String {
        self.year().to_string()
    }

    /// Month formatted as two digits.
    pub fn month_label(self) -> String {
        format!("{:02}", self.month())
    }

    /// The `count` months ending with this one, oldest first.
    pub fn trailing(self, count: u32) -> Vec<Self> {
        (0..count)
            .rev()
            .filter_map(|back| self.first_day.checked_sub_months(Months::new(back)))
            .map(|first_day| Self { first_day })
            .collect()
    }
}

/// Total for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: i64,
}

/// Spread per-day totals over every day of `period`, zero-filling the gaps.
pub fn daily_series(period: ReportPeriod, totals: &[(NaiveDate, i64)]) -> Vec<DailyTotal> {
    let by_day: HashMap<NaiveDate, i64> = totals.iter().copied().collect();
    period
        .start()
        .iter_days()
        .take_while(|date| *date < period.end_exclusive())
        .map(|date| DailyTotal {
            date,
            total: by_day.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

/// Assigned-asset count for one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DepartmentCount {
    pub department: String,
    pub count: i64,
}

/// Order department totals as [`DEPARTMENTS`], zero-filling absent ones.
pub fn department_series(totals: &[(String, i64)]) -> Vec<DepartmentCount> {
    let by_name: HashMap<&str, i64> = totals
        .iter()
        .map(|(name, count)| (name.as_str(), *count))
        .collect();
    DEPARTMENTS
        .iter()
        .map(|department| DepartmentCount {
            department: (*department).to_owned(),
            count: by_name.get(department).copied().unwrap_or(0),
        })
        .collect()
}

/// Purchase years up to `current_year` merged with the recent years,
/// newest first and without duplicates.
pub fn available_years(current_year: i32, purchase_years: &[i32]) -> Vec<i32> {
    let recent = (current_year - (RECENT_YEARS - 1))..=current_year;
    let mut years: Vec<i32> = purchase_years
        .iter()
        .copied()
        .filter(|year| *year <= current_year)
        .chain(recent)
        .collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// Month selector entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MonthOption {
    pub value: String,
    pub label: String,
}

/// All twelve months as `01`..`12` with their English names.
pub fn available_months() -> Vec<MonthOption> {
    MONTH_NAMES
        .iter()
        .zip(1_u32..)
        .map(|(name, number)| MonthOption {
            value: format!("{number:02}"),
            label: (*name).to_owned(),
        })
        .collect()
}

/// Summed unit quantity for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MonthlyTotal {
    /// `YYYY-MM`.
    pub month: String,
    /// `Mon YYYY`.
    pub label: String,
    pub total: i64,
}

impl MonthlyTotal {
    /// Label a month's total.
    pub fn new(period: ReportPeriod, total: i64) -> Self {
        Self {
            month: period.start().format("%Y-%m").to_string(),
            label: period.start().format("%b %Y").to_string(),
            total,
        }
    }
}

/// Summed unit quantity for one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LocationTotal {
    pub location: String,
    pub total: i64,
}

/// Headline counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineCounts {
    pub employees: i64,
    pub users: i64,
    pub assets: i64,
    pub assigned_assets: i64,
}

/// Dashboard payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub totals: HeadlineCounts,
    pub selected_year: String,
    pub selected_month: String,
    pub days_in_month: u32,
    /// Assets purchased on each day of the month.
    pub assets_by_day: Vec<DailyTotal>,
    pub assigned_per_department: Vec<DepartmentCount>,
}

/// Monthly report payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub selected_year: String,
    pub selected_month: String,
    pub days_in_month: u32,
    /// Units purchased on each day of the month.
    pub assets_by_day: Vec<DailyTotal>,
    pub available_years: Vec<i32>,
    pub available_months: Vec<MonthOption>,
    pub total_spend_by_month: Vec<MonthlyTotal>,
    pub assets_by_location: Vec<LocationTotal>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[fixture]
    fn today() -> NaiveDate {
        date(2025, 3, 18)
    }

    #[rstest]
    #[case(None, None, 2025, 3)]
    #[case(Some(2031), Some(5), 2025, 5)]
    #[case(Some(2023), Some(0), 2023, 1)]
    #[case(Some(2024), Some(13), 2024, 12)]
    #[case(Some(-40), None, MIN_REPORT_YEAR, 3)]
    fn resolves_requested_period(
        today: NaiveDate,
        #[case] year: Option<i32>,
        #[case] month: Option<u32>,
        #[case] expected_year: i32,
        #[case] expected_month: u32,
    ) {
        let period = ReportPeriod::resolve(today, year, month);
        assert_eq!(period.year(), expected_year);
        assert_eq!(period.month(), expected_month);
    }

    #[rstest]
    #[case(2024, 2, 29)]
    #[case(2025, 2, 28)]
    #[case(2025, 12, 31)]
    fn counts_days_in_month(#[case] year: i32, #[case] month: u32, #[case] days: u32) {
        let period = ReportPeriod::resolve(date(2025, 12, 31), Some(year), Some(month));
        assert_eq!(period.days_in_month(), days);
    }

    #[rstest]
    fn daily_series_zero_fills(today: NaiveDate) {
        let period = ReportPeriod::current(today);
        let series = daily_series(
            period,
            &[(date(2025, 3, 1), 2), (date(2025, 3, 31), 5), (date(2025, 4, 1), 9)],
        );
        assert_eq!(series.len(), 31);
        assert_eq!(series.first().map(|day| day.total), Some(2));
        assert_eq!(series.last().map(|day| (day.date, day.total)), Some((date(2025, 3, 31), 5)));
        assert_eq!(series.iter().map(|day| day.total).sum::<i64>(), 7);
    }

    #[rstest]
    fn department_series_keeps_fixed_order() {
        let series = department_series(&[
            ("Technical".to_owned(), 4),
            ("Finance".to_owned(), 2),
            ("Unlisted".to_owned(), 8),
        ]);
        let names: Vec<_> = series.iter().map(|d| d.department.as_str()).collect();
        assert_eq!(names, DEPARTMENTS);
        assert_eq!(series[1].count, 2);
        assert_eq!(series[9].count, 4);
        assert_eq!(series.iter().map(|d| d.count).sum::<i64>(), 6);
    }

    #[rstest]
    fn available_years_merge_recent_and_purchase_years() {
        assert_eq!(
            available_years(2025, &[2019, 2024, 2026, 2019]),
            vec![2025, 2024, 2023, 2022, 2019]
        );
    }

    #[rstest]
    fn months_are_numbered_and_named() {
        let months = available_months();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].value, "01");
        assert_eq!(months[11].label, "December");
    }

    #[rstest]
    fn trailing_window_crosses_year_boundary() {
        let period = ReportPeriod::resolve(date(2025, 6, 1), Some(2025), Some(2));
        let window = period.trailing(TRAILING_MONTHS);
        let labels: Vec<_> = window
            .iter()
            .map(|month| MonthlyTotal::new(*month, 0).label)
            .collect();
        assert_eq!(
            labels,
            ["Sep 2024", "Oct 2024", "Nov 2024", "Dec 2024", "Jan 2025", "Feb 2025"]
        );
        assert_eq!(MonthlyTotal::new(period, 3).month, "2025-02");
    }
}

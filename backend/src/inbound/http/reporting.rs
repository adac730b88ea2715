//! Dashboard and monthly purchase report.

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::ports::ReportRequest;
use crate::domain::{Dashboard, Error, Report};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AdminUser;
use crate::inbound::http::state::HttpState;

/// Optional period selection for `GET /api/v1/reports`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// Calendar year; later years fall back to the current one.
    pub year: Option<i32>,
    /// Month number; clamped to `1..=12`.
    pub month: Option<u32>,
}

impl From<ReportQuery> for ReportRequest {
    fn from(query: ReportQuery) -> Self {
        Self {
            year: query.year,
            month: query.month,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Headline counts and this month's series", body = Dashboard),
        (status = 403, description = "Forbidden", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["reporting"],
    operation_id = "dashboard"
)]
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    _admin: AdminUser,
) -> ApiResult<web::Json<Dashboard>> {
    state.reporting.dashboard().await.map(web::Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Purchase report for the selected month", body = Report),
        (status = 400, description = "Malformed year or month", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["reporting"],
    operation_id = "report"
)]
#[get("/reports")]
pub async fn report(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    query: web::Query<ReportQuery>,
) -> ApiResult<web::Json<Report>> {
    state
        .reporting
        .report(query.into_inner().into())
        .await
        .map(web::Json)
}

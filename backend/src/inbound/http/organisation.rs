//! Org units, positions, and assignment places.
//!
//! ```text
//! GET  /api/v1/employees/options
//! POST /api/v1/org-units
//! POST /api/v1/positions
//! PUT  /api/v1/positions/salary-grade
//! POST /api/v1/positions/{id}/archive
//! POST /api/v1/archived/positions/{id}/unarchive
//! POST /api/v1/assignment-places
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use tracing::info;

use crate::domain::{
    ArchivedPositionId, AssignmentPlace, AssignmentPlaceForm, EmployeeFormOptions, Error, OrgUnit,
    OrgUnitForm, Position, PositionForm, PositionId, SalaryGradeForm,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::archive::{ArchiveReceipt, RestoreReceipt};
use crate::inbound::http::auth::AdminUser;
use crate::inbound::http::state::HttpState;

/// Dropdown options for the employee form.
#[utoipa::path(
    get,
    path = "/api/v1/employees/options",
    responses(
        (status = 200, description = "Form options", body = EmployeeFormOptions),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["organisation"],
    operation_id = "employeeFormOptions"
)]
#[get("/employees/options")]
pub async fn employee_options(
    state: web::Data<HttpState>,
    _admin: AdminUser,
) -> ApiResult<web::Json<EmployeeFormOptions>> {
    state.organisation.options().await.map(web::Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/org-units",
    request_body = OrgUnitForm,
    responses(
        (status = 201, description = "Org unit created", body = OrgUnit),
        (status = 400, description = "Validation failed", body = Error)
    ),
    tags = ["organisation"],
    operation_id = "createOrgUnit"
)]
#[post("/org-units")]
pub async fn create_org_unit(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    form: web::Json<OrgUnitForm>,
) -> ApiResult<HttpResponse> {
    let unit = state.organisation.create_org_unit(&form).await?;
    Ok(HttpResponse::Created().json(unit))
}

#[utoipa::path(
    post,
    path = "/api/v1/positions",
    request_body = PositionForm,
    responses(
        (status = 201, description = "Position created", body = Position),
        (status = 400, description = "Validation failed", body = Error)
    ),
    tags = ["organisation"],
    operation_id = "createPosition"
)]
#[post("/positions")]
pub async fn create_position(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    form: web::Json<PositionForm>,
) -> ApiResult<HttpResponse> {
    let position = state.organisation.create_position(&form).await?;
    Ok(HttpResponse::Created().json(position))
}

/// Change the salary grade of the position with the given item code.
#[utoipa::path(
    put,
    path = "/api/v1/positions/salary-grade",
    request_body = SalaryGradeForm,
    responses(
        (status = 200, description = "Salary grade updated", body = Position),
        (status = 400, description = "Validation failed or unknown item code", body = Error)
    ),
    tags = ["organisation"],
    operation_id = "setSalaryGrade"
)]
#[put("/positions/salary-grade")]
pub async fn set_salary_grade(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    form: web::Json<SalaryGradeForm>,
) -> ApiResult<web::Json<Position>> {
    state.organisation.set_salary_grade(&form).await.map(web::Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/assignment-places",
    request_body = AssignmentPlaceForm,
    responses(
        (status = 201, description = "Assignment place created", body = AssignmentPlace),
        (status = 400, description = "Validation failed", body = Error)
    ),
    tags = ["organisation"],
    operation_id = "createAssignmentPlace"
)]
#[post("/assignment-places")]
pub async fn create_assignment_place(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    form: web::Json<AssignmentPlaceForm>,
) -> ApiResult<HttpResponse> {
    let place = state.organisation.create_assignment_place(&form).await?;
    Ok(HttpResponse::Created().json(place))
}

/// Archive a position no active employee holds.
#[utoipa::path(
    post,
    path = "/api/v1/positions/{id}/archive",
    params(("id" = i64, Path, description = "Position id")),
    responses(
        (status = 200, description = "Position archived", body = ArchiveReceipt),
        (status = 404, description = "Unknown position", body = Error),
        (status = 409, description = "Position still held by employees", body = Error)
    ),
    tags = ["organisation", "archive"],
    operation_id = "archivePosition"
)]
#[post("/positions/{id}/archive")]
pub async fn archive_position(
    state: web::Data<HttpState>,
    AdminUser(admin): AdminUser,
    id: web::Path<i64>,
) -> ApiResult<web::Json<ArchiveReceipt>> {
    let id = PositionId::new(id.into_inner());
    let archived = state.organisation.archive_position(id).await?;
    info!(position_id = %id, archived_id = %archived, admin_id = %admin.id, "position archived");
    Ok(web::Json(ArchiveReceipt {
        archived_id: archived.get(),
    }))
}

/// Restore an archived position under its original id.
#[utoipa::path(
    post,
    path = "/api/v1/archived/positions/{id}/unarchive",
    params(("id" = i64, Path, description = "Archived position id")),
    responses(
        (status = 200, description = "Position restored", body = RestoreReceipt),
        (status = 404, description = "Unknown archived position", body = Error),
        (status = 409, description = "Item code in use", body = Error)
    ),
    tags = ["organisation", "archive"],
    operation_id = "unarchivePosition"
)]
#[post("/archived/positions/{id}/unarchive")]
pub async fn unarchive_position(
    state: web::Data<HttpState>,
    AdminUser(admin): AdminUser,
    id: web::Path<i64>,
) -> ApiResult<web::Json<RestoreReceipt>> {
    let id = ArchivedPositionId::new(id.into_inner());
    let restored = state.organisation.unarchive_position(id).await?;
    info!(archived_id = %id, position_id = %restored, admin_id = %admin.id, "position restored");
    Ok(web::Json(RestoreReceipt { id: restored.get() }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::ports::{FIXTURE_ADMIN_EMAIL, MockOrganisationCatalogue};
    use crate::domain::{EmploymentStatus, OrgUnitId};
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::{call_json, fixture_ports, sign_in, test_app};

    fn state_with(organisation: MockOrganisationCatalogue) -> HttpState {
        HttpState::new(HttpStatePorts {
            organisation: Arc::new(organisation),
            ..fixture_ports()
        })
    }

    #[actix_web::test]
    async fn options_are_not_mistaken_for_an_employee_id() {
        let mut organisation = MockOrganisationCatalogue::new();
        organisation.expect_options().returning(|| {
            Ok(EmployeeFormOptions::build(
                &[OrgUnit {
                    id: OrgUnitId::new(1),
                    org_code: "ADM".to_owned(),
                    name: "Admin".to_owned(),
                    description: None,
                }],
                &[],
                &[],
            ))
        });
        let app = test::init_service(test_app(state_with(organisation))).await;
        let cookie = sign_in(&app, FIXTURE_ADMIN_EMAIL).await;

        let (status, body) = call_json(
            &app,
            test::TestRequest::get().uri("/api/v1/employees/options"),
            cookie,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["orgUnits"][0]["label"], "Admin");
        assert_eq!(
            body["employmentStatuses"],
            json!(EmploymentStatus::ALL.map(EmploymentStatus::as_str))
        );
    }

    #[actix_web::test]
    async fn created_org_units_answer_201() {
        let mut organisation = MockOrganisationCatalogue::new();
        organisation
            .expect_create_org_unit()
            .withf(|form| form.org_code.as_deref() == Some("FIN"))
            .returning(|_| {
                Ok(OrgUnit {
                    id: OrgUnitId::new(2),
                    org_code: "FIN".to_owned(),
                    name: "Finance".to_owned(),
                    description: None,
                })
            });
        let app = test::init_service(test_app(state_with(organisation))).await;
        let cookie = sign_in(&app, FIXTURE_ADMIN_EMAIL).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/org-units")
            .set_json(json!({ "orgCode": "FIN", "name": "Finance" }));
        let (status, body) = call_json(&app, req, cookie).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["orgCode"], "FIN");
    }

    #[rstest]
    #[case(Ok(ArchivedPositionId::new(4)), StatusCode::OK)]
    #[case(Err(Error::conflict("position is held by active employees")), StatusCode::CONFLICT)]
    #[actix_web::test]
    async fn archiving_positions_reports_conflicts(
        #[case] outcome: Result<ArchivedPositionId, Error>,
        #[case] expected: StatusCode,
    ) {
        let mut organisation = MockOrganisationCatalogue::new();
        organisation
            .expect_archive_position()
            .withf(|id| *id == PositionId::new(8))
            .return_once(move |_| outcome);
        let app = test::init_service(test_app(state_with(organisation))).await;
        let cookie = sign_in(&app, FIXTURE_ADMIN_EMAIL).await;

        let (status, _) = call_json(
            &app,
            test::TestRequest::post().uri("/api/v1/positions/8/archive"),
            cookie,
        )
        .await;
        assert_eq!(status, expected);
    }

    #[actix_web::test]
    async fn restored_positions_report_their_id() {
        let mut organisation = MockOrganisationCatalogue::new();
        organisation
            .expect_unarchive_position()
            .returning(|_| Ok(PositionId::new(8)));
        let app = test::init_service(test_app(state_with(organisation))).await;
        let cookie = sign_in(&app, FIXTURE_ADMIN_EMAIL).await;

        let (status, body) = call_json(
            &app,
            test::TestRequest::post().uri("/api/v1/archived/positions/4/unarchive"),
            cookie,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 8);
    }

    #[actix_web::test]
    async fn salary_grades_are_set_by_item_code() {
        let mut organisation = MockOrganisationCatalogue::new();
        organisation
            .expect_set_salary_grade()
            .withf(|form| form.item_code.as_deref() == Some("AA-1"))
            .returning(|form| {
                Ok(Position {
                    id: PositionId::new(1),
                    item_code: "AA-1".to_owned(),
                    name: "Administrative Aide".to_owned(),
                    description: None,
                    salary_grade: form.salary_grade.clone(),
                    org_code: None,
                })
            });
        let app = test::init_service(test_app(state_with(organisation))).await;
        let cookie = sign_in(&app, FIXTURE_ADMIN_EMAIL).await;

        let req = test::TestRequest::put()
            .uri("/api/v1/positions/salary-grade")
            .set_json(json!({ "itemCode": "AA-1", "salaryGrade": "SG-6" }));
        let (status, body) = call_json(&app, req, cookie).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["salaryGrade"], "SG-6");
    }
}

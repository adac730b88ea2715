//! Archive listings and the receipts returned by archive/restore actions.

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ArchivedAsset, ArchivedEmployeeRecord, ArchivedPosition, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AdminUser;
use crate::inbound::http::state::HttpState;

/// Identifier of the archive row a record was moved to.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveReceipt {
    pub archived_id: i64,
}

/// Identifier a record was restored under.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestoreReceipt {
    pub id: i64,
}

#[utoipa::path(
    get,
    path = "/api/v1/archived/employees",
    responses(
        (status = 200, description = "Archived employees, newest first", body = [ArchivedEmployeeRecord]),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["archive"],
    operation_id = "listArchivedEmployees"
)]
#[get("/archived/employees")]
pub async fn archived_employees(
    state: web::Data<HttpState>,
    _admin: AdminUser,
) -> ApiResult<web::Json<Vec<ArchivedEmployeeRecord>>> {
    state.archive.archived_employees().await.map(web::Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/archived/positions",
    responses(
        (status = 200, description = "Archived positions, newest first", body = [ArchivedPosition]),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["archive"],
    operation_id = "listArchivedPositions"
)]
#[get("/archived/positions")]
pub async fn archived_positions(
    state: web::Data<HttpState>,
    _admin: AdminUser,
) -> ApiResult<web::Json<Vec<ArchivedPosition>>> {
    state.archive.archived_positions().await.map(web::Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/archived/inventory",
    responses(
        (status = 200, description = "Archived assets, newest first", body = [ArchivedAsset]),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["archive"],
    operation_id = "listArchivedAssets"
)]
#[get("/archived/inventory")]
pub async fn archived_assets(
    state: web::Data<HttpState>,
    _admin: AdminUser,
) -> ApiResult<web::Json<Vec<ArchivedAsset>>> {
    state.archive.archived_assets().await.map(web::Json)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{FIXTURE_ADMIN_EMAIL, MockArchiveQuery};
    use chrono::{TimeZone, Utc};

    use crate::domain::{ArchivedPositionId, Position, PositionId};
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::{call_json, fixture_ports, fixture_state, sign_in, test_app};

    #[rstest]
    #[case("/api/v1/archived/employees")]
    #[case("/api/v1/archived/positions")]
    #[case("/api/v1/archived/inventory")]
    #[actix_web::test]
    async fn empty_archives_list_as_empty_arrays(#[case] uri: &str) {
        let app = test::init_service(test_app(fixture_state())).await;
        let cookie = sign_in(&app, FIXTURE_ADMIN_EMAIL).await;
        let (status, body) = call_json(&app, test::TestRequest::get().uri(uri), cookie).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[actix_web::test]
    async fn archived_positions_keep_their_original_id() {
        let mut archive = MockArchiveQuery::new();
        archive.expect_archived_positions().returning(|| {
            Ok(vec![ArchivedPosition {
                id: ArchivedPositionId::new(3),
                position: Position {
                    id: PositionId::new(12),
                    item_code: "ITM-12".to_owned(),
                    name: "Clerk II".to_owned(),
                    description: None,
                    salary_grade: Some("SG-8".to_owned()),
                    org_code: None,
                },
                archived_at: Utc
                    .with_ymd_and_hms(2025, 3, 1, 9, 30, 0)
                    .single()
                    .expect("timestamp"),
            }])
        });
        let state = HttpState::new(HttpStatePorts {
            archive: Arc::new(archive),
            ..fixture_ports()
        });
        let app = test::init_service(test_app(state)).await;
        let cookie = sign_in(&app, FIXTURE_ADMIN_EMAIL).await;
        let (status, body) = call_json(
            &app,
            test::TestRequest::get().uri("/api/v1/archived/positions"),
            cookie,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], 3);
        assert_eq!(body[0]["position"]["id"], 12);
        assert_eq!(body[0]["position"]["itemCode"], "ITM-12");
    }
}

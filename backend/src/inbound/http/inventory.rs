//! Asset inventory handlers.
//!
//! ```text
//! GET    /api/v1/inventory
//! POST   /api/v1/inventory
//! GET    /api/v1/inventory/{id}
//! PUT    /api/v1/inventory/{id}
//! DELETE /api/v1/inventory/{id}
//! POST   /api/v1/inventory/{id}/archive
//! POST   /api/v1/archived/inventory/{id}/unarchive
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use tracing::info;

use crate::domain::{ArchivedAssetId, Asset, AssetForm, AssetId, AssetRecord, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::archive::{ArchiveReceipt, RestoreReceipt};
use crate::inbound::http::auth::AdminUser;
use crate::inbound::http::state::HttpState;

#[utoipa::path(
    get,
    path = "/api/v1/inventory",
    responses(
        (status = 200, description = "Assets with assignee names", body = [AssetRecord]),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["inventory"],
    operation_id = "listAssets"
)]
#[get("/inventory")]
pub async fn list_assets(
    state: web::Data<HttpState>,
    _admin: AdminUser,
) -> ApiResult<web::Json<Vec<AssetRecord>>> {
    state.inventory.list().await.map(web::Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/inventory",
    request_body = AssetForm,
    responses(
        (status = 201, description = "Asset created", body = Asset),
        (status = 400, description = "Validation failed", body = Error)
    ),
    tags = ["inventory"],
    operation_id = "createAsset"
)]
#[post("/inventory")]
pub async fn create_asset(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    form: web::Json<AssetForm>,
) -> ApiResult<HttpResponse> {
    let asset = state.inventory.create(&form).await?;
    Ok(HttpResponse::Created().json(asset))
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory/{id}",
    params(("id" = i64, Path, description = "Asset id")),
    responses(
        (status = 200, description = "Asset", body = AssetRecord),
        (status = 404, description = "Unknown asset", body = Error)
    ),
    tags = ["inventory"],
    operation_id = "viewAsset"
)]
#[get("/inventory/{id}")]
pub async fn view_asset(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    id: web::Path<i64>,
) -> ApiResult<web::Json<AssetRecord>> {
    state
        .inventory
        .view(AssetId::new(id.into_inner()))
        .await
        .map(web::Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/inventory/{id}",
    params(("id" = i64, Path, description = "Asset id")),
    request_body = AssetForm,
    responses(
        (status = 200, description = "Asset updated", body = Asset),
        (status = 400, description = "Validation failed", body = Error),
        (status = 404, description = "Unknown asset", body = Error)
    ),
    tags = ["inventory"],
    operation_id = "updateAsset"
)]
#[put("/inventory/{id}")]
pub async fn update_asset(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    id: web::Path<i64>,
    form: web::Json<AssetForm>,
) -> ApiResult<web::Json<Asset>> {
    state
        .inventory
        .update(AssetId::new(id.into_inner()), &form)
        .await
        .map(web::Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/inventory/{id}",
    params(("id" = i64, Path, description = "Asset id")),
    responses(
        (status = 204, description = "Asset deleted"),
        (status = 404, description = "Unknown asset", body = Error)
    ),
    tags = ["inventory"],
    operation_id = "deleteAsset"
)]
#[delete("/inventory/{id}")]
pub async fn delete_asset(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.inventory.delete(AssetId::new(id.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/v1/inventory/{id}/archive",
    params(("id" = i64, Path, description = "Asset id")),
    responses(
        (status = 200, description = "Asset archived", body = ArchiveReceipt),
        (status = 404, description = "Unknown asset", body = Error)
    ),
    tags = ["inventory", "archive"],
    operation_id = "archiveAsset"
)]
#[post("/inventory/{id}/archive")]
pub async fn archive_asset(
    state: web::Data<HttpState>,
    AdminUser(admin): AdminUser,
    id: web::Path<i64>,
) -> ApiResult<web::Json<ArchiveReceipt>> {
    let id = AssetId::new(id.into_inner());
    let archived = state.inventory.archive(id).await?;
    info!(asset_id = %id, archived_id = %archived, admin_id = %admin.id, "asset archived");
    Ok(web::Json(ArchiveReceipt {
        archived_id: archived.get(),
    }))
}

/// Restore an archived asset; a dangling assignment is cleared.
#[utoipa::path(
    post,
    path = "/api/v1/archived/inventory/{id}/unarchive",
    params(("id" = i64, Path, description = "Archived asset id")),
    responses(
        (status = 200, description = "Asset restored", body = RestoreReceipt),
        (status = 404, description = "Unknown archived asset", body = Error),
        (status = 409, description = "Asset tag in use", body = Error)
    ),
    tags = ["inventory", "archive"],
    operation_id = "unarchiveAsset"
)]
#[post("/archived/inventory/{id}/unarchive")]
pub async fn unarchive_asset(
    state: web::Data<HttpState>,
    AdminUser(admin): AdminUser,
    id: web::Path<i64>,
) -> ApiResult<web::Json<RestoreReceipt>> {
    let id = ArchivedAssetId::new(id.into_inner());
    let restored = state.inventory.unarchive(id).await?;
    info!(archived_id = %id, asset_id = %restored, admin_id = %admin.id, "asset restored");
    Ok(web::Json(RestoreReceipt { id: restored.get() }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;
    use crate::domain::ports::{FIXTURE_ADMIN_EMAIL, MockInventoryRegister};
    use crate::domain::{AssetValue, EmployeeId};
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::{call_json, fixture_ports, sign_in, test_app};

    #[fixture]
    fn laptop() -> Asset {
        Asset {
            id: AssetId::new(21),
            asset_tag: "IT-0021".to_owned(),
            name: "Laptop".to_owned(),
            category: "IT Equipment".to_owned(),
            location: "Records Room".to_owned(),
            purchase_date: NaiveDate::from_ymd_opt(2025, 2, 14).expect("date"),
            value: AssetValue::from_cents(4_599_950).expect("value in range"),
            condition: "Good".to_owned(),
            assigned_to: Some(EmployeeId::new(11)),
            status: "In Use".to_owned(),
            property_no: None,
            serial_no: Some("SN-1".to_owned()),
            unit_qty: 1,
        }
    }

    fn state_with(inventory: MockInventoryRegister) -> HttpState {
        HttpState::new(HttpStatePorts {
            inventory: Arc::new(inventory),
            ..fixture_ports()
        })
    }

    #[rstest]
    #[actix_web::test]
    async fn values_are_rendered_as_decimal_strings(laptop: Asset) {
        let mut inventory = MockInventoryRegister::new();
        inventory.expect_view().returning(move |_| {
            Ok(AssetRecord {
                asset: laptop.clone(),
                assignee_name: Some("Juan Dela Cruz".to_owned()),
            })
        });
        let app = test::init_service(test_app(state_with(inventory))).await;
        let cookie = sign_in(&app, FIXTURE_ADMIN_EMAIL).await;

        let (status, body) =
            call_json(&app, test::TestRequest::get().uri("/api/v1/inventory/21"), cookie).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"], "45999.50");
        assert_eq!(body["assigneeName"], "Juan Dela Cruz");
        assert_eq!(body["purchaseDate"], "2025-02-14");
    }

    #[rstest]
    #[case(json!("45999.50"))]
    #[case(json!(45999.5))]
    #[actix_web::test]
    async fn values_are_accepted_as_numbers_or_strings(
        laptop: Asset,
        #[case] value: serde_json::Value,
    ) {
        let mut inventory = MockInventoryRegister::new();
        inventory
            .expect_create()
            .withf(|form| form.value.is_some() && form.asset_tag.as_deref() == Some("IT-0021"))
            .returning(move |_| Ok(laptop.clone()));
        let app = test::init_service(test_app(state_with(inventory))).await;
        let cookie = sign_in(&app, FIXTURE_ADMIN_EMAIL).await;

        let req = test::TestRequest::post().uri("/api/v1/inventory").set_json(json!({
            "assetTag": "IT-0021",
            "name": "Laptop",
            "category": "IT Equipment",
            "location": "Records Room",
            "purchaseDate": "2025-02-14",
            "value": value,
            "condition": "Good",
            "status": "In Use",
        }));
        let (status, _) = call_json(&app, req, cookie).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[rstest]
    #[case(Ok(AssetId::new(21)), StatusCode::OK)]
    #[case(Err(Error::conflict("asset tag IT-0021 is in use")), StatusCode::CONFLICT)]
    #[case(Err(Error::not_found("archived asset 3 not found")), StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn unarchive_outcomes_map_to_status(
        #[case] outcome: Result<AssetId, Error>,
        #[case] expected: StatusCode,
    ) {
        let mut inventory = MockInventoryRegister::new();
        inventory
            .expect_unarchive()
            .withf(|id| *id == ArchivedAssetId::new(3))
            .return_once(move |_| outcome);
        let app = test::init_service(test_app(state_with(inventory))).await;
        let cookie = sign_in(&app, FIXTURE_ADMIN_EMAIL).await;

        let (status, _) = call_json(
            &app,
            test::TestRequest::post().uri("/api/v1/archived/inventory/3/unarchive"),
            cookie,
        )
        .await;
        assert_eq!(status, expected);
    }

    #[actix_web::test]
    async fn delete_answers_no_content() {
        let mut inventory = MockInventoryRegister::new();
        inventory
            .expect_delete()
            .times(1)
            .returning(|_| Ok(()));
        let app = test::init_service(test_app(state_with(inventory))).await;
        let cookie = sign_in(&app, FIXTURE_ADMIN_EMAIL).await;

        let (status, _) = call_json(
            &app,
            test::TestRequest::delete().uri("/api/v1/inventory/21"),
            cookie,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}

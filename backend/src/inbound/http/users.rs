//! User account administration.
//!
//! ```text
//! GET    /api/v1/users
//! POST   /api/v1/users {"name":"Ada","email":"ada@example.gov","password":"…","passwordConfirmation":"…"}
//! GET    /api/v1/users/{id}
//! PUT    /api/v1/users/{id}
//! DELETE /api/v1/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{AccountProfile, Error, UserAccount, UserForm, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AdminUser;
use crate::inbound::http::state::HttpState;

/// List every account.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Accounts", body = [UserAccount]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    _admin: AdminUser,
) -> ApiResult<web::Json<Vec<UserAccount>>> {
    state.users.list().await.map(web::Json)
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserForm,
    responses(
        (status = 201, description = "Account created", body = UserAccount),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    form: web::Json<UserForm>,
) -> ApiResult<HttpResponse> {
    let account = state.users.create(&form).await?;
    Ok(HttpResponse::Created().json(account))
}

/// Profile of one account.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account profile", body = AccountProfile),
        (status = 404, description = "Unknown account", body = Error)
    ),
    tags = ["users"],
    operation_id = "showUser"
)]
#[get("/users/{id}")]
pub async fn show_user(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    id: web::Path<i64>,
) -> ApiResult<web::Json<AccountProfile>> {
    state
        .users
        .profile(UserId::new(id.into_inner()))
        .await
        .map(web::Json)
}

/// Update an account; the password is only changed when supplied.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "Account id")),
    request_body = UserForm,
    responses(
        (status = 200, description = "Account updated", body = UserAccount),
        (status = 400, description = "Validation failed", body = Error),
        (status = 404, description = "Unknown account", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    id: web::Path<i64>,
    form: web::Json<UserForm>,
) -> ApiResult<web::Json<UserAccount>> {
    state
        .users
        .update(UserId::new(id.into_inner()), &form)
        .await
        .map(web::Json)
}

/// Delete an account. Linked employees keep their record.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 404, description = "Unknown account", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.users.delete(UserId::new(id.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;

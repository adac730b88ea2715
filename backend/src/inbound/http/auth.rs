//! Sign-in, sign-out, and the signed-in account's own profile.
//!
//! Also hosts the request guards: [`CurrentUser`] resolves the session to a
//! live account (`401` otherwise) and [`AdminUser`] additionally requires
//! the administrator flag (`403` otherwise).
//!
//! ```text
//! POST /api/v1/login {"email":"admin@example.gov","password":"password"}
//! GET /api/v1/profile
//! POST /api/v1/logout
//! ```

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, get, post, web};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{
    AccountProfile, Error, FieldErrors, LoginCredentials, LoginValidationError, UserAccount,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "admin@example.gov")]
    pub email: String,
    pub password: String,
}

impl TryFrom<&LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_login_validation_error(err: &LoginValidationError) -> Error {
    let mut errors = FieldErrors::new();
    match err {
        LoginValidationError::EmptyEmail => errors.push("email", "required", err.to_string()),
        LoginValidationError::EmptyPassword => {
            errors.push("password", "required", err.to_string());
        }
    }
    errors.into()
}

/// Signed-in account resolved from the session cookie.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserAccount);

/// Signed-in administrator.
#[derive(Debug, Clone)]
pub struct AdminUser(pub UserAccount);

async fn resolve_account(session: &SessionContext, state: &HttpState) -> Result<UserAccount, Error> {
    let id = session.require_user_id()?;
    match state.login.current_user(id).await? {
        Some(account) => Ok(account),
        None => {
            warn!(user_id = %id, "session refers to a deleted account");
            session.purge();
            Err(Error::unauthorized("login required"))
        }
    }
}

fn http_state(req: &HttpRequest) -> Result<web::Data<HttpState>, Error> {
    req.app_data::<web::Data<HttpState>>()
        .cloned()
        .ok_or_else(|| Error::internal("HTTP state is not registered"))
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = http_state(req);
        Box::pin(async move {
            let session = session.await?;
            let state = state?;
            let account = resolve_account(&session, &state).await?;
            Ok(Self(account))
        })
    }
}

impl FromRequest for AdminUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let current = CurrentUser::from_request(req, payload);
        Box::pin(async move {
            let CurrentUser(account) = current.await?;
            if !account.is_admin {
                return Err(Error::forbidden("administrator access required").into());
            }
            Ok(Self(account))
        })
    }
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserAccount,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserAccount>> {
    let credentials = LoginCredentials::try_from(&*payload)
        .map_err(|err| map_login_validation_error(&err))?;
    let account = state.login.authenticate(&credentials).await?;
    session.persist_user(account.id)?;
    info!(user_id = %account.id, "user signed in");
    Ok(web::Json(account))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// The signed-in account with its employee sheet and assigned assets.
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "Own profile", body = AccountProfile),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["auth"],
    operation_id = "profile"
)]
#[get("/profile")]
pub async fn profile(
    state: web::Data<HttpState>,
    CurrentUser(account): CurrentUser,
) -> ApiResult<web::Json<AccountProfile>> {
    state.users.profile(account.id).await.map(web::Json)
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;

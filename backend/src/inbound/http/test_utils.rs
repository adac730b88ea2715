//! Test helpers for inbound HTTP components.

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use crate::domain::ports::FIXTURE_PASSWORD;

use super::api_routes;
use super::error::{json_config, path_config, query_config};
use super::state::{HttpState, HttpStatePorts};

/// Cookie session middleware with a throwaway key and no `Secure` flag.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Ports backed entirely by fixtures; tests override the one under test.
pub fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts::fixtures()
}

/// State built from [`fixture_ports`].
pub fn fixture_state() -> HttpState {
    HttpState::new(fixture_ports())
}

/// App exposing the full `/api/v1` scope over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .service(
            web::scope("/api/v1")
                .wrap(test_session_middleware())
                .configure(api_routes),
        )
}

/// Sign in through `/api/v1/login` with the fixture password.
pub async fn sign_in<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": email, "password": FIXTURE_PASSWORD }))
        .to_request();
    let res = test::call_service(app, req).await;
    assert!(res.status().is_success(), "login failed: {}", res.status());
    session_cookie(&res)
}

/// Issue `req` with the session cookie and decode the JSON body.
pub async fn call_json<S>(app: &S, req: test::TestRequest, cookie: Cookie<'static>) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(app, req.cookie(cookie).to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

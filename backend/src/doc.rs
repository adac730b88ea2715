//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP handler, the error envelope schema, and
//! the session cookie security scheme. Request and response bodies are
//! picked up from the handlers' `utoipa::path` annotations.
//!
//! The generated document backs Swagger UI in debug builds and is exported
//! by the `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Office administration API",
        description = "Employee records, user accounts, organisation structure, inventory, \
                       archives, and reports for a government office."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::profile,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::show_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::employees::list_employees,
        crate::inbound::http::employees::create_employee,
        crate::inbound::http::employees::view_employee,
        crate::inbound::http::employees::update_employee,
        crate::inbound::http::employees::delete_employee,
        crate::inbound::http::employees::archive_employee,
        crate::inbound::http::employees::unarchive_employee,
        crate::inbound::http::organisation::employee_options,
        crate::inbound::http::organisation::create_org_unit,
        crate::inbound::http::organisation::create_position,
        crate::inbound::http::organisation::set_salary_grade,
        crate::inbound::http::organisation::create_assignment_place,
        crate::inbound::http::organisation::archive_position,
        crate::inbound::http::organisation::unarchive_position,
        crate::inbound::http::inventory::list_assets,
        crate::inbound::http::inventory::create_asset,
        crate::inbound::http::inventory::view_asset,
        crate::inbound::http::inventory::update_asset,
        crate::inbound::http::inventory::delete_asset,
        crate::inbound::http::inventory::archive_asset,
        crate::inbound::http::inventory::unarchive_asset,
        crate::inbound::http::archive::archived_employees,
        crate::inbound::http::archive::archived_positions,
        crate::inbound::http::archive::archived_assets,
        crate::inbound::http::reporting::dashboard,
        crate::inbound::http::reporting::report,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(Error, ErrorCode)),
    tags(
        (name = "auth", description = "Session login, logout, and the caller's profile"),
        (name = "users", description = "User account administration"),
        (name = "employees", description = "Employee records"),
        (name = "organisation", description = "Org units, positions, and assignment places"),
        (name = "inventory", description = "Inventory assets"),
        (name = "archive", description = "Archived records and restoration"),
        (name = "reporting", description = "Dashboard and purchase reports"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

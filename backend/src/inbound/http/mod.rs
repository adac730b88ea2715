//! HTTP inbound adapter exposing the REST API.

pub mod archive;
pub mod auth;
pub mod employees;
pub mod error;
pub mod health;
pub mod inventory;
pub mod organisation;
pub mod reporting;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler.
///
/// Fixed segments such as `/employees/options` are registered ahead of the
/// `{id}` routes they would otherwise collide with.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login)
        .service(auth::logout)
        .service(auth::profile)
        .service(reporting::dashboard)
        .service(reporting::report)
        .service(users::list_users)
        .service(users::create_user)
        .service(users::show_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(organisation::employee_options)
        .service(organisation::create_org_unit)
        .service(organisation::set_salary_grade)
        .service(organisation::create_position)
        .service(organisation::archive_position)
        .service(organisation::create_assignment_place)
        .service(organisation::unarchive_position)
        .service(employees::list_employees)
        .service(employees::create_employee)
        .service(employees::view_employee)
        .service(employees::update_employee)
        .service(employees::delete_employee)
        .service(employees::archive_employee)
        .service(employees::unarchive_employee)
        .service(inventory::list_assets)
        .service(inventory::create_asset)
        .service(inventory::view_asset)
        .service(inventory::update_asset)
        .service(inventory::delete_asset)
        .service(inventory::archive_asset)
        .service(inventory::unarchive_asset)
        .service(archive::archived_employees)
        .service(archive::archived_positions)
        .service(archive::archived_assets);
}

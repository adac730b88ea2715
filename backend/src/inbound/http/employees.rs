//! Employee directory handlers, including archive and restore.
//!
//! ```text
//! GET    /api/v1/employees
//! POST   /api/v1/employees
//! GET    /api/v1/employees/options
//! GET    /api/v1/employees/{id}
//! PUT    /api/v1/employees/{id}
//! DELETE /api/v1/employees/{id}
//! POST   /api/v1/employees/{id}/archive
//! POST   /api/v1/archived/employees/{id}/unarchive
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use tracing::info;

use crate::domain::{
    ArchivedEmployeeId, EmployeeDetails, EmployeeForm, EmployeeId, EmployeeRecord, Error,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::archive::ArchiveReceipt;
use crate::inbound::http::auth::AdminUser;
use crate::inbound::http::state::HttpState;

#[utoipa::path(
    get,
    path = "/api/v1/employees",
    responses(
        (status = 200, description = "Employees with resolved labels", body = [EmployeeRecord]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["employees"],
    operation_id = "listEmployees"
)]
#[get("/employees")]
pub async fn list_employees(
    state: web::Data<HttpState>,
    _admin: AdminUser,
) -> ApiResult<web::Json<Vec<EmployeeRecord>>> {
    state.employees.list().await.map(web::Json)
}

/// Create an employee together with its user account.
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = EmployeeForm,
    responses(
        (status = 201, description = "Employee created", body = EmployeeRecord),
        (status = 400, description = "Validation failed", body = Error),
        (status = 409, description = "Email already in use", body = Error)
    ),
    tags = ["employees"],
    operation_id = "createEmployee"
)]
#[post("/employees")]
pub async fn create_employee(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    form: web::Json<EmployeeForm>,
) -> ApiResult<HttpResponse> {
    let record = state.employees.create(&form).await?;
    Ok(HttpResponse::Created().json(record))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    params(("id" = i64, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee with assigned assets", body = EmployeeDetails),
        (status = 404, description = "Unknown employee", body = Error)
    ),
    tags = ["employees"],
    operation_id = "viewEmployee"
)]
#[get("/employees/{id}")]
pub async fn view_employee(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    id: web::Path<i64>,
) -> ApiResult<web::Json<EmployeeDetails>> {
    state
        .employees
        .view(EmployeeId::new(id.into_inner()))
        .await
        .map(web::Json)
}

/// Update an employee; email and password are optional here.
#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    params(("id" = i64, Path, description = "Employee id")),
    request_body = EmployeeForm,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeRecord),
        (status = 400, description = "Validation failed", body = Error),
        (status = 404, description = "Unknown employee", body = Error)
    ),
    tags = ["employees"],
    operation_id = "updateEmployee"
)]
#[put("/employees/{id}")]
pub async fn update_employee(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    id: web::Path<i64>,
    form: web::Json<EmployeeForm>,
) -> ApiResult<web::Json<EmployeeRecord>> {
    state
        .employees
        .update(EmployeeId::new(id.into_inner()), &form)
        .await
        .map(web::Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    params(("id" = i64, Path, description = "Employee id")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Unknown employee", body = Error)
    ),
    tags = ["employees"],
    operation_id = "deleteEmployee"
)]
#[delete("/employees/{id}")]
pub async fn delete_employee(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.employees.delete(EmployeeId::new(id.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Move an employee into the archive.
#[utoipa::path(
    post,
    path = "/api/v1/employees/{id}/archive",
    params(("id" = i64, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee archived", body = ArchiveReceipt),
        (status = 404, description = "Unknown employee", body = Error)
    ),
    tags = ["employees", "archive"],
    operation_id = "archiveEmployee"
)]
#[post("/employees/{id}/archive")]
pub async fn archive_employee(
    state: web::Data<HttpState>,
    AdminUser(admin): AdminUser,
    id: web::Path<i64>,
) -> ApiResult<web::Json<ArchiveReceipt>> {
    let id = EmployeeId::new(id.into_inner());
    let archived = state.employees.archive(id).await?;
    info!(employee_id = %id, archived_id = %archived, admin_id = %admin.id, "employee archived");
    Ok(web::Json(ArchiveReceipt {
        archived_id: archived.get(),
    }))
}

/// Restore an archived employee under its original id.
#[utoipa::path(
    post,
    path = "/api/v1/archived/employees/{id}/unarchive",
    params(("id" = i64, Path, description = "Archived employee id")),
    responses(
        (status = 200, description = "Employee restored", body = EmployeeRecord),
        (status = 404, description = "Unknown archived employee", body = Error),
        (status = 409, description = "Email or position conflict", body = Error)
    ),
    tags = ["employees", "archive"],
    operation_id = "unarchiveEmployee"
)]
#[post("/archived/employees/{id}/unarchive")]
pub async fn unarchive_employee(
    state: web::Data<HttpState>,
    AdminUser(admin): AdminUser,
    id: web::Path<i64>,
) -> ApiResult<web::Json<EmployeeRecord>> {
    let id = ArchivedEmployeeId::new(id.into_inner());
    let record = state.employees.unarchive(id).await?;
    info!(archived_id = %id, employee_id = %record.employee.id, admin_id = %admin.id, "employee restored");
    Ok(web::Json(record))
}

#[cfg(test)]
#[path = "employees_tests.rs"]
mod tests;

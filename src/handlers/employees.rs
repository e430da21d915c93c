// src/handlers/employees.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{EmployeeAdmin, RequireRole},
    },
    models::{
        auth::Profile,
        employee::{EmployeeFilter, UpdateEmployeePayload},
    },
};

#[utoipa::path(
    get,
    path = "/api/employees",
    tag = "Employees",
    params(EmployeeFilter),
    responses(
        (status = 200, description = "Colaboradores (mais recentes primeiro)", body = Vec<Profile>)
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn list_employees(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(filter): Query<EmployeeFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let employees = app_state
        .employee_service
        .list(&filter)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(employees)))
}

#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "ID do perfil")),
    responses(
        (status = 200, description = "Perfil do colaborador", body = Profile),
        (status = 404, description = "Colaborador não encontrado")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let employee = app_state
        .employee_service
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(employee)))
}

#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "ID do perfil")),
    request_body = UpdateEmployeePayload,
    responses(
        (status = 200, description = "Perfil atualizado", body = Profile),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Apenas administradores"),
        (status = 404, description = "Colaborador não encontrado")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn update_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(admin): AuthenticatedUser,
    _guard: RequireRole<EmployeeAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmployeePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let employee = app_state
        .employee_service
        .update(id, &payload, admin.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(employee)))
}

// src/handlers/departments.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::{
        department::{DepartmentDetail, DepartmentSummary},
        farmer::PurchaseWithFarmer,
        inventory::InventoryItemView,
        sales::SalesOrder,
    },
};

#[utoipa::path(
    get,
    path = "/api/departments",
    tag = "Departments",
    responses(
        (status = 200, description = "As seis linhas de produto", body = Vec<DepartmentSummary>)
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn list_departments(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let departments = app_state
        .department_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(departments)))
}

#[utoipa::path(
    get,
    path = "/api/departments/{name}",
    tag = "Departments",
    params(("name" = String, Path, description = "Departamento (ex.: coffee)")),
    responses(
        (status = 200, description = "Departamento com contadores", body = DepartmentDetail),
        (status = 404, description = "Departamento não encontrado")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_department(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = app_state
        .department_service
        .detail(&name)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(detail)))
}

#[utoipa::path(
    get,
    path = "/api/departments/{name}/farm",
    tag = "Departments",
    params(("name" = String, Path, description = "Departamento (ex.: coffee)")),
    responses(
        (status = 200, description = "Estoque do nível fazenda", body = Vec<InventoryItemView>),
        (status = 404, description = "Departamento sem nível fazenda")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_farm_inventory(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state
        .department_service
        .farm_inventory(&name)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(items)))
}

#[utoipa::path(
    get,
    path = "/api/departments/{name}/sales",
    tag = "Departments",
    params(("name" = String, Path, description = "Departamento (ex.: coffee)")),
    responses(
        (status = 200, description = "Pedidos do departamento", body = Vec<SalesOrder>),
        (status = 404, description = "Departamento sem nível de vendas")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_department_sales(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = app_state
        .department_service
        .sales(&name)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(orders)))
}

#[utoipa::path(
    get,
    path = "/api/departments/{name}/purchases",
    tag = "Departments",
    params(("name" = String, Path, description = "Departamento (ex.: coffee)")),
    responses(
        (status = 200, description = "Cinco compras mais recentes de terceiros", body = Vec<PurchaseWithFarmer>),
        (status = 404, description = "Departamento sem nível fazenda")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_recent_purchases(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let purchases = app_state
        .department_service
        .recent_purchases(&name)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(purchases)))
}

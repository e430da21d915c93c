// src/handlers/sales.rs

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
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::sales::{SalesOrder, SalesOrderFilter, SalesOrderPayload, SalesStats, SalesStatusPayload},
};

#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Sales",
    params(SalesOrderFilter),
    responses(
        (status = 200, description = "Pedidos de venda (mais recentes primeiro)", body = Vec<SalesOrder>)
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(filter): Query<SalesOrderFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = app_state
        .sales_service
        .list_orders(&filter)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(orders)))
}

#[utoipa::path(
    get,
    path = "/api/sales/stats",
    tag = "Sales",
    responses(
        (status = 200, description = "Receita total e contagem de pedidos", body = SalesStats)
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_stats(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let stats = app_state
        .sales_service
        .stats()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(stats)))
}

#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido de venda", body = SalesOrder),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state
        .sales_service
        .get_order(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(order)))
}

#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Sales",
    request_body = SalesOrderPayload,
    responses(
        (status = 201, description = "Pedido criado (número e total calculados)", body = SalesOrder),
        (status = 400, description = "Dados inválidos")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(profile): AuthenticatedUser,
    Json(payload): Json<SalesOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let order = app_state
        .sales_service
        .create_order(&payload, profile.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    patch,
    path = "/api/sales/{id}/status",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    request_body = SalesStatusPayload,
    responses(
        (status = 200, description = "Status atualizados", body = SalesOrder),
        (status = 400, description = "Nenhum status informado"),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn update_status(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<SalesStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate_consistency()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let order = app_state
        .sales_service
        .update_status(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(order)))
}

// src/handlers/inventory.rs

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
        rbac::{InventoryAdmin, RequireRole},
    },
    models::inventory::{InventoryFilter, InventoryItemPayload, InventoryItemView, InventoryStats},
};

#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "Inventory",
    params(InventoryFilter),
    responses(
        (status = 200, description = "Itens de estoque (mais recentes primeiro)", body = Vec<InventoryItemView>),
        (status = 401, description = "Não autorizado")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn list_items(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(filter): Query<InventoryFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state
        .inventory_service
        .list_items(&filter)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(items)))
}

#[utoipa::path(
    get,
    path = "/api/inventory/stats",
    tag = "Inventory",
    responses(
        (status = 200, description = "Total de itens e itens com estoque baixo", body = InventoryStats)
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
        .inventory_service
        .stats()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(stats)))
}

#[utoipa::path(
    get,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do item")),
    responses(
        (status = 200, description = "Item de estoque", body = InventoryItemView),
        (status = 404, description = "Item não encontrado")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_item(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let item = app_state
        .inventory_service
        .get_item(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(item)))
}

#[utoipa::path(
    post,
    path = "/api/inventory",
    tag = "Inventory",
    request_body = InventoryItemPayload,
    responses(
        (status = 201, description = "Item criado", body = InventoryItemView),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Apenas administradores")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(profile): AuthenticatedUser,
    _guard: RequireRole<InventoryAdmin>,
    Json(payload): Json<InventoryItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let item = app_state
        .inventory_service
        .create_item(&payload, profile.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do item")),
    request_body = InventoryItemPayload,
    responses(
        (status = 200, description = "Item atualizado", body = InventoryItemView),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Apenas administradores"),
        (status = 404, description = "Item não encontrado")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(profile): AuthenticatedUser,
    _guard: RequireRole<InventoryAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<InventoryItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let item = app_state
        .inventory_service
        .update_item(id, &payload, profile.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(item)))
}

// src/handlers/farmers.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::farmer::{FarmerPayload, PurchasePayload, ThirdPartyFarmer, ThirdPartyPurchase},
};

#[utoipa::path(
    get,
    path = "/api/farmers",
    tag = "Farmers",
    responses(
        (status = 200, description = "Agricultores terceiros", body = Vec<ThirdPartyFarmer>)
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn list_farmers(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let farmers = app_state
        .farmer_service
        .list_farmers()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(farmers)))
}

#[utoipa::path(
    post,
    path = "/api/farmers",
    tag = "Farmers",
    request_body = FarmerPayload,
    responses(
        (status = 201, description = "Agricultor cadastrado", body = ThirdPartyFarmer),
        (status = 400, description = "Dados inválidos")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn create_farmer(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<FarmerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let farmer = app_state
        .farmer_service
        .create_farmer(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(farmer)))
}

#[utoipa::path(
    post,
    path = "/api/farmers/purchases",
    tag = "Farmers",
    request_body = PurchasePayload,
    responses(
        (status = 201, description = "Compra registrada (total calculado)", body = ThirdPartyPurchase),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Agricultor não encontrado")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn record_purchase(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(profile): AuthenticatedUser,
    Json(payload): Json<PurchasePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let purchase = app_state
        .farmer_service
        .record_purchase(&payload, profile.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(purchase)))
}

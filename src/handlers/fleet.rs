// src/handlers/fleet.rs

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
        rbac::{FleetAdmin, RequireRole},
    },
    models::fleet::{
        CompleteTripPayload, FleetFilter, FleetStats, FleetUsage, FleetVehicle, TripPayload,
        VehiclePayload,
    },
};

// ---
// Veículos
// ---

#[utoipa::path(
    get,
    path = "/api/fleet",
    tag = "Fleet",
    params(FleetFilter),
    responses(
        (status = 200, description = "Veículos (mais recentes primeiro)", body = Vec<FleetVehicle>)
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn list_vehicles(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(filter): Query<FleetFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let vehicles = app_state
        .fleet_service
        .list_vehicles(&filter)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(vehicles)))
}

#[utoipa::path(
    get,
    path = "/api/fleet/available",
    tag = "Fleet",
    responses(
        (status = 200, description = "Veículos disponíveis para uma viagem", body = Vec<FleetVehicle>)
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn list_available(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let vehicles = app_state
        .fleet_service
        .available_vehicles()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(vehicles)))
}

#[utoipa::path(
    get,
    path = "/api/fleet/stats",
    tag = "Fleet",
    responses(
        (status = 200, description = "Contagem de veículos por status", body = FleetStats)
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
        .fleet_service
        .stats()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(stats)))
}

#[utoipa::path(
    get,
    path = "/api/fleet/{id}",
    tag = "Fleet",
    params(("id" = Uuid, Path, description = "ID do veículo")),
    responses(
        (status = 200, description = "Veículo", body = FleetVehicle),
        (status = 404, description = "Veículo não encontrado")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_vehicle(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let vehicle = app_state
        .fleet_service
        .get_vehicle(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(vehicle)))
}

#[utoipa::path(
    post,
    path = "/api/fleet",
    tag = "Fleet",
    request_body = VehiclePayload,
    responses(
        (status = 201, description = "Veículo cadastrado", body = FleetVehicle),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Apenas administradores"),
        (status = 409, description = "Placa já cadastrada")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn create_vehicle(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<FleetAdmin>,
    Json(payload): Json<VehiclePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let vehicle = app_state
        .fleet_service
        .create_vehicle(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(vehicle)))
}

#[utoipa::path(
    put,
    path = "/api/fleet/{id}",
    tag = "Fleet",
    params(("id" = Uuid, Path, description = "ID do veículo")),
    request_body = VehiclePayload,
    responses(
        (status = 200, description = "Veículo atualizado", body = FleetVehicle),
        (status = 403, description = "Apenas administradores"),
        (status = 404, description = "Veículo não encontrado"),
        (status = 409, description = "Placa já cadastrada")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn update_vehicle(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<FleetAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<VehiclePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let vehicle = app_state
        .fleet_service
        .update_vehicle(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(vehicle)))
}

// ---
// Viagens (qualquer colaborador pode registrar)
// ---

#[utoipa::path(
    get,
    path = "/api/fleet/{id}/usage",
    tag = "Fleet",
    params(("id" = Uuid, Path, description = "ID do veículo")),
    responses(
        (status = 200, description = "Viagens do veículo (mais recentes primeiro)", body = Vec<FleetUsage>),
        (status = 404, description = "Veículo não encontrado")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn list_vehicle_trips(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let trips = app_state
        .fleet_service
        .list_trips(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(trips)))
}

#[utoipa::path(
    post,
    path = "/api/fleet/usage",
    tag = "Fleet",
    request_body = TripPayload,
    responses(
        (status = 201, description = "Viagem registrada", body = FleetUsage),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Veículo não encontrado"),
        (status = 409, description = "Veículo indisponível")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn log_trip(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(profile): AuthenticatedUser,
    Json(payload): Json<TripPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    payload
        .validate_consistency()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let trip = app_state
        .fleet_service
        .log_trip(profile.id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(trip)))
}

#[utoipa::path(
    post,
    path = "/api/fleet/usage/{id}/complete",
    tag = "Fleet",
    params(("id" = Uuid, Path, description = "ID da viagem")),
    request_body = CompleteTripPayload,
    responses(
        (status = 200, description = "Viagem encerrada", body = FleetUsage),
        (status = 404, description = "Viagem não encontrada"),
        (status = 409, description = "Viagem já encerrada")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn complete_trip(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<CompleteTripPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let trip = app_state
        .fleet_service
        .complete_trip(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(trip)))
}

// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::dashboard::{Activity, DashboardStats, QuickAction},
};

#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Cards do topo do painel", body = DashboardStats),
        (status = 401, description = "Não autorizado")
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
        .dashboard_service
        .stats()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(stats)))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/recent-activity",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Últimas movimentações de estoque", body = Vec<Activity>)
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_recent_activity(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let activity = app_state
        .dashboard_service
        .recent_activity()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(activity)))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/quick-actions",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Atalhos visíveis para o papel do usuário", body = Vec<QuickAction>)
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_quick_actions(
    State(app_state): State<AppState>,
    AuthenticatedUser(profile): AuthenticatedUser,
) -> Json<Vec<QuickAction>> {
    Json(app_state.dashboard_service.quick_actions(profile.role))
}

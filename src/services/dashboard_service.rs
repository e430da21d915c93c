// src/services/dashboard_service.rs

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::{
        auth::UserRole,
        dashboard::{quick_actions_for, Activity, DashboardStats, QuickAction},
    },
};

// Itens no feed "Atividade recente"
const RECENT_ACTIVITY: i64 = 5;

#[derive(Clone)]
pub struct DashboardService {
    dashboard_repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(dashboard_repo: DashboardRepository) -> Self {
        Self { dashboard_repo }
    }

    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        self.dashboard_repo.stats().await
    }

    pub async fn recent_activity(&self) -> Result<Vec<Activity>, AppError> {
        let rows = self.dashboard_repo.recent_activity(RECENT_ACTIVITY).await?;
        Ok(rows.into_iter().map(Activity::from).collect())
    }

    pub fn quick_actions(&self, role: UserRole) -> Vec<QuickAction> {
        quick_actions_for(role)
    }
}

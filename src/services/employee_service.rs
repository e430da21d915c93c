// src/services/employee_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ProfileRepository,
    models::{
        auth::Profile,
        employee::{EmployeeFilter, UpdateEmployeePayload},
    },
};

#[derive(Clone)]
pub struct EmployeeService {
    profile_repo: ProfileRepository,
    pool: PgPool,
}

impl EmployeeService {
    pub fn new(profile_repo: ProfileRepository, pool: PgPool) -> Self {
        Self { profile_repo, pool }
    }

    pub async fn list(&self, filter: &EmployeeFilter) -> Result<Vec<Profile>, AppError> {
        self.profile_repo.list(filter).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Profile, AppError> {
        self.profile_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("employee_not_found"))
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateEmployeePayload,
        updated_by: Uuid,
    ) -> Result<Profile, AppError> {
        let profile = self
            .profile_repo
            .update(&self.pool, id, payload)
            .await?
            .ok_or(AppError::NotFound("employee_not_found"))?;

        tracing::info!(
            "Perfil {} atualizado por {} (papel: {:?}, ativo: {})",
            profile.id,
            updated_by,
            profile.role,
            profile.is_active
        );
        Ok(profile)
    }
}

// src/db/department_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::department::{Department, DepartmentType},
};

#[derive(Clone)]
pub struct DepartmentRepository {
    pool: PgPool,
}

impl DepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // A ordem do enum no banco é a mesma da declaração
    pub async fn list(&self) -> Result<Vec<Department>, AppError> {
        let departments = sqlx::query_as::<_, Department>(
            r#"
            SELECT id, name, description, has_farm, has_value_addition, has_sales, created_at
            FROM departments
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(departments)
    }

    pub async fn find_by_name(&self, name: DepartmentType) -> Result<Option<Department>, AppError> {
        let department = sqlx::query_as::<_, Department>(
            r#"
            SELECT id, name, description, has_farm, has_value_addition, has_sales, created_at
            FROM departments
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(department)
    }
}

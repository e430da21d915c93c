// src/db/profile_repo.rs

use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::{error::AppError, filters::contains_pattern},
    models::{
        auth::{Profile, User},
        employee::{EmployeeFilter, UpdateEmployeePayload},
    },
};

const PROFILE_COLUMNS: &str = "id, email, full_name, role, phone, location, department, \
     is_active, created_at, updated_at";

// Credenciais ('users') e perfis ('profiles'), que compartilham o mesmo id
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Credenciais
    // ---

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE lower(email) = lower($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })
    }

    // ---
    // Perfis
    // ---

    /// Novo perfil: sempre 'employee' e ativo.
    pub async fn create_profile<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        email: &str,
        full_name: &str,
    ) -> Result<Profile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "INSERT INTO profiles (id, email, full_name) VALUES ($1, $2, $3) RETURNING {}",
            PROFILE_COLUMNS
        );
        let profile = sqlx::query_as::<_, Profile>(&sql)
            .bind(user_id)
            .bind(email)
            .bind(full_name)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::EmailAlreadyExists;
                    }
                }
                e.into()
            })?;
        Ok(profile)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, AppError> {
        let sql = format!("SELECT {} FROM profiles WHERE id = $1", PROFILE_COLUMNS);
        let profile = sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    pub async fn list(&self, filter: &EmployeeFilter) -> Result<Vec<Profile>, AppError> {
        let profiles = list_query(filter)
            .build_query_as::<Profile>()
            .fetch_all(&self.pool)
            .await?;
        Ok(profiles)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &UpdateEmployeePayload,
    ) -> Result<Option<Profile>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE profiles
            SET full_name = $2, phone = $3, role = $4, department = $5,
                location = $6, is_active = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );
        let profile = sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .bind(&payload.full_name)
            .bind(&payload.phone)
            .bind(payload.role)
            .bind(payload.department)
            .bind(payload.location)
            .bind(payload.is_active)
            .fetch_optional(executor)
            .await?;
        Ok(profile)
    }
}

// Monta o SELECT filtrado da lista de colaboradores
fn list_query(filter: &EmployeeFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM profiles WHERE TRUE", PROFILE_COLUMNS));

    if let Some(role) = filter.role {
        qb.push(" AND role = ").push_bind(role);
    }
    if let Some(department) = filter.department {
        qb.push(" AND department = ").push_bind(department);
    }
    if let Some(location) = filter.location {
        qb.push(" AND location = ").push_bind(location);
    }
    if let Some(search) = &filter.search {
        let pattern = contains_pattern(search);
        qb.push(" AND (full_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    qb.push(" ORDER BY created_at DESC");
    qb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{auth::UserRole, department::DepartmentType};

    #[test]
    fn unfiltered_list_only_orders() {
        let qb = list_query(&EmployeeFilter::default());
        assert_eq!(
            qb.sql(),
            format!("SELECT {} FROM profiles WHERE TRUE ORDER BY created_at DESC", PROFILE_COLUMNS)
        );
    }

    #[test]
    fn search_matches_name_or_email() {
        let filter = EmployeeFilter {
            role: Some(UserRole::Admin),
            department: Some(DepartmentType::Coffee),
            location: None,
            search: Some("nakato".into()),
        };
        let qb = list_query(&filter);
        assert!(qb.sql().ends_with(
            " AND role = $1 AND department = $2 AND (full_name ILIKE $3 OR email ILIKE $4) \
             ORDER BY created_at DESC"
        ));
    }
}

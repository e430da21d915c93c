// src/db/farmer_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        department::DepartmentType,
        farmer::{FarmerPayload, PurchasePayload, PurchaseWithFarmer, ThirdPartyFarmer, ThirdPartyPurchase},
    },
};

const PURCHASE_COLUMNS: &str = "id, farmer_id, department, product_name, quantity, unit, \
     unit_price, total_amount, purchase_date, notes, created_by, created_at";

#[derive(Clone)]
pub struct FarmerRepository {
    pool: PgPool,
}

impl FarmerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<ThirdPartyFarmer>, AppError> {
        let farmers = sqlx::query_as::<_, ThirdPartyFarmer>(
            "SELECT id, name, phone, location, created_at FROM third_party_farmers ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(farmers)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        payload: &FarmerPayload,
    ) -> Result<ThirdPartyFarmer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let farmer = sqlx::query_as::<_, ThirdPartyFarmer>(
            r#"
            INSERT INTO third_party_farmers (name, phone, location)
            VALUES ($1, $2, $3)
            RETURNING id, name, phone, location, created_at
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.phone)
        .bind(&payload.location)
        .fetch_one(executor)
        .await?;
        Ok(farmer)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM third_party_farmers WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn create_purchase<'e, E>(
        &self,
        executor: E,
        payload: &PurchasePayload,
        total_amount: Decimal,
        purchase_date: NaiveDate,
        created_by: Uuid,
    ) -> Result<ThirdPartyPurchase, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO third_party_purchases (
                farmer_id, department, product_name, quantity, unit,
                unit_price, total_amount, purchase_date, notes, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            PURCHASE_COLUMNS
        );
        let purchase = sqlx::query_as::<_, ThirdPartyPurchase>(&sql)
            .bind(payload.farmer_id)
            .bind(payload.department)
            .bind(&payload.product_name)
            .bind(payload.quantity)
            .bind(&payload.unit)
            .bind(payload.unit_price)
            .bind(total_amount)
            .bind(purchase_date)
            .bind(&payload.notes)
            .bind(created_by)
            .fetch_one(executor)
            .await?;
        Ok(purchase)
    }

    /// Compras mais recentes de um departamento, com o nome do agricultor.
    pub async fn recent_by_department(
        &self,
        department: DepartmentType,
        limit: i64,
    ) -> Result<Vec<PurchaseWithFarmer>, AppError> {
        let purchases = sqlx::query_as::<_, PurchaseWithFarmer>(
            r#"
            SELECT
                p.id, p.farmer_id, p.department, p.product_name, p.quantity, p.unit,
                p.unit_price, p.total_amount, p.purchase_date, p.notes, p.created_by,
                p.created_at,
                f.name AS farmer_name
            FROM third_party_purchases p
            LEFT JOIN third_party_farmers f ON f.id = p.farmer_id
            WHERE p.department = $1
            ORDER BY p.purchase_date DESC, p.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(department)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(purchases)
    }
}

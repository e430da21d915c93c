// src/db/inventory_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::{error::AppError, filters::contains_pattern},
    models::{
        department::DepartmentType,
        inventory::{
            InventoryFilter, InventoryItem, InventoryItemPayload, InventoryStats,
            InventoryTransaction, TransactionType,
        },
    },
};

const ITEM_COLUMNS: &str = "id, name, department, level, location, quantity, unit, unit_price, \
     reorder_level, description, created_by, created_at, updated_at";

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (usam a pool principal)
    // ---

    pub async fn list(&self, filter: &InventoryFilter) -> Result<Vec<InventoryItem>, AppError> {
        let items = list_query(filter)
            .build_query_as::<InventoryItem>()
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<InventoryItem>, AppError> {
        let sql = format!("SELECT {} FROM inventory_items WHERE id = $1", ITEM_COLUMNS);
        let item = sqlx::query_as::<_, InventoryItem>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    pub async fn stats(&self) -> Result<InventoryStats, AppError> {
        let stats = sqlx::query_as::<_, InventoryStats>(
            r#"
            SELECT
                COUNT(*) AS total_items,
                COUNT(*) FILTER (
                    WHERE reorder_level IS NOT NULL AND quantity <= reorder_level
                ) AS low_stock_items
            FROM inventory_items
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    pub async fn count_by_department(&self, department: DepartmentType) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM inventory_items WHERE department = $1",
        )
        .bind(department)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    // ---
    // Funções de "Escrita" (rodam dentro de transação)
    // ---

    /// Trava a linha para calcular a diferença de quantidade com segurança.
    pub async fn find_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {} FROM inventory_items WHERE id = $1 FOR UPDATE", ITEM_COLUMNS);
        let item = sqlx::query_as::<_, InventoryItem>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(item)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        payload: &InventoryItemPayload,
        created_by: Uuid,
    ) -> Result<InventoryItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO inventory_items (
                name, department, level, location, quantity, unit,
                unit_price, reorder_level, description, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            ITEM_COLUMNS
        );
        let item = sqlx::query_as::<_, InventoryItem>(&sql)
            .bind(&payload.name)
            .bind(payload.department)
            .bind(payload.level)
            .bind(payload.location)
            .bind(payload.quantity)
            .bind(&payload.unit)
            .bind(payload.unit_price)
            .bind(payload.reorder_level)
            .bind(&payload.description)
            .bind(created_by)
            .fetch_one(executor)
            .await?;
        Ok(item)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &InventoryItemPayload,
    ) -> Result<Option<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE inventory_items
            SET name = $2, department = $3, level = $4, location = $5, quantity = $6,
                unit = $7, unit_price = $8, reorder_level = $9, description = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ITEM_COLUMNS
        );
        let item = sqlx::query_as::<_, InventoryItem>(&sql)
            .bind(id)
            .bind(&payload.name)
            .bind(payload.department)
            .bind(payload.level)
            .bind(payload.location)
            .bind(payload.quantity)
            .bind(&payload.unit)
            .bind(payload.unit_price)
            .bind(payload.reorder_level)
            .bind(&payload.description)
            .fetch_optional(executor)
            .await?;
        Ok(item)
    }

    /// Grava uma movimentação (histórico usado na "Atividade recente").
    pub async fn record_transaction<'e, E>(
        &self,
        executor: E,
        item_id: Uuid,
        transaction_type: TransactionType,
        quantity: Decimal,
        notes: Option<&str>,
        created_by: Uuid,
    ) -> Result<InventoryTransaction, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let transaction = sqlx::query_as::<_, InventoryTransaction>(
            r#"
            INSERT INTO inventory_transactions (item_id, transaction_type, quantity, notes, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, item_id, transaction_type, quantity, notes, created_by, created_at
            "#,
        )
        .bind(item_id)
        .bind(transaction_type)
        .bind(quantity)
        .bind(notes)
        .bind(created_by)
        .fetch_one(executor)
        .await?;
        Ok(transaction)
    }
}

// Monta o SELECT filtrado da tabela de estoque
fn list_query(filter: &InventoryFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM inventory_items WHERE TRUE", ITEM_COLUMNS));

    if let Some(department) = filter.department {
        qb.push(" AND department = ").push_bind(department);
    }
    if let Some(level) = filter.level {
        qb.push(" AND level = ").push_bind(level);
    }
    if let Some(location) = filter.location {
        qb.push(" AND location = ").push_bind(location);
    }
    if let Some(search) = &filter.search {
        qb.push(" AND name ILIKE ").push_bind(contains_pattern(search));
    }

    qb.push(" ORDER BY created_at DESC");
    qb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::department::{FarmLocation, OperationLevel};

    #[test]
    fn unfiltered_list_has_no_conditions() {
        let qb = list_query(&InventoryFilter::default());
        assert!(qb.sql().ends_with("FROM inventory_items WHERE TRUE ORDER BY created_at DESC"));
    }

    #[test]
    fn filters_become_bound_conditions_in_order() {
        let filter = InventoryFilter {
            department: Some(DepartmentType::Lemongrass),
            level: Some(OperationLevel::Farm),
            location: Some(FarmLocation::Bukeerere),
            search: Some("oil".into()),
        };
        let qb = list_query(&filter);
        assert!(qb.sql().ends_with(
            "WHERE TRUE AND department = $1 AND level = $2 AND location = $3 \
             AND name ILIKE $4 ORDER BY created_at DESC"
        ));
    }

    #[test]
    fn search_alone_binds_one_parameter() {
        let filter = InventoryFilter { search: Some("mash".into()), ..Default::default() };
        let qb = list_query(&filter);
        assert!(qb.sql().contains("AND name ILIKE $1"));
        assert!(!qb.sql().contains("$2"));
    }
}

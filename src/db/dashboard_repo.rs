// src/db/dashboard_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::dashboard::{ActivityRow, DashboardStats},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 1. Cards do topo (uma ida ao banco só)
    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        let stats = sqlx::query_as::<_, DashboardStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM inventory_items) AS inventory_items,
                (SELECT COUNT(*) FROM profiles) AS employees,
                (SELECT COUNT(*) FROM fleet_vehicles) AS vehicles,
                (SELECT COUNT(*) FROM sales_orders WHERE order_status = 'pending') AS pending_orders
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    // 2. Últimas movimentações de estoque
    pub async fn recent_activity(&self, limit: i64) -> Result<Vec<ActivityRow>, AppError> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT t.id, t.transaction_type, t.quantity, i.name AS item_name, t.created_at
            FROM inventory_transactions t
            LEFT JOIN inventory_items i ON i.id = t.item_id
            ORDER BY t.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

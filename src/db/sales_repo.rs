// src/db/sales_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        department::DepartmentType,
        sales::{OrderStatus, PaymentStatus, SalesOrder, SalesOrderFilter, SalesOrderPayload, SalesStats},
    },
};

const ORDER_COLUMNS: &str = "id, order_number, customer_name, customer_email, customer_phone, \
     department, product_description, quantity, unit_price, total_amount, payment_method, \
     payment_status, order_status, notes, created_by, created_at, updated_at";

#[derive(Clone)]
pub struct SalesRepository {
    pool: PgPool,
}

impl SalesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filter: &SalesOrderFilter) -> Result<Vec<SalesOrder>, AppError> {
        let orders = list_query(filter)
            .build_query_as::<SalesOrder>()
            .fetch_all(&self.pool)
            .await?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<SalesOrder>, AppError> {
        let sql = format!("SELECT {} FROM sales_orders WHERE id = $1", ORDER_COLUMNS);
        let order = sqlx::query_as::<_, SalesOrder>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    pub async fn stats(&self) -> Result<SalesStats, AppError> {
        let stats = sqlx::query_as::<_, SalesStats>(
            r#"
            SELECT
                COALESCE(SUM(total_amount), 0) AS total_revenue,
                COUNT(*) AS total_orders,
                COUNT(*) FILTER (WHERE order_status = 'pending') AS pending_orders,
                COUNT(*) FILTER (WHERE order_status = 'completed') AS completed_orders
            FROM sales_orders
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    pub async fn count_by_department(&self, department: DepartmentType) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sales_orders WHERE department = $1",
        )
        .bind(department)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Grava o pedido com número e total já calculados pelo serviço.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        order_number: &str,
        total_amount: Decimal,
        payload: &SalesOrderPayload,
        created_by: Uuid,
    ) -> Result<SalesOrder, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO sales_orders (
                order_number, customer_name, customer_email, customer_phone, department,
                product_description, quantity, unit_price, total_amount, payment_method,
                payment_status, order_status, notes, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {}
            "#,
            ORDER_COLUMNS
        );
        let order = sqlx::query_as::<_, SalesOrder>(&sql)
            .bind(order_number)
            .bind(&payload.customer_name)
            .bind(&payload.customer_email)
            .bind(&payload.customer_phone)
            .bind(payload.department)
            .bind(&payload.product_description)
            .bind(payload.quantity)
            .bind(payload.unit_price)
            .bind(total_amount)
            .bind(payload.payment_method)
            .bind(payload.payment_status)
            .bind(payload.order_status)
            .bind(&payload.notes)
            .bind(created_by)
            .fetch_one(executor)
            .await?;
        Ok(order)
    }

    // Campo ausente mantém o valor atual
    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payment_status: Option<PaymentStatus>,
        order_status: Option<OrderStatus>,
    ) -> Result<Option<SalesOrder>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE sales_orders
            SET payment_status = COALESCE($2, payment_status),
                order_status = COALESCE($3, order_status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ORDER_COLUMNS
        );
        let order = sqlx::query_as::<_, SalesOrder>(&sql)
            .bind(id)
            .bind(payment_status)
            .bind(order_status)
            .fetch_optional(executor)
            .await?;
        Ok(order)
    }
}

fn list_query(filter: &SalesOrderFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM sales_orders WHERE TRUE", ORDER_COLUMNS));

    if let Some(department) = filter.department {
        qb.push(" AND department = ").push_bind(department);
    }
    if let Some(order_status) = filter.order_status {
        qb.push(" AND order_status = ").push_bind(order_status);
    }
    if let Some(payment_status) = filter.payment_status {
        qb.push(" AND payment_status = ").push_bind(payment_status);
    }

    qb.push(" ORDER BY created_at DESC");
    qb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_page_filters_by_department_only() {
        let filter = SalesOrderFilter {
            department: Some(DepartmentType::Fish),
            ..Default::default()
        };
        let qb = list_query(&filter);
        assert!(qb
            .sql()
            .ends_with("WHERE TRUE AND department = $1 ORDER BY created_at DESC"));
    }

    #[test]
    fn status_filters_are_combined() {
        let filter = SalesOrderFilter {
            department: None,
            order_status: Some(OrderStatus::Pending),
            payment_status: Some(PaymentStatus::Partial),
        };
        let qb = list_query(&filter);
        assert!(qb
            .sql()
            .ends_with("AND order_status = $1 AND payment_status = $2 ORDER BY created_at DESC"));
    }
}

// src/services/sales_service.rs

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::SalesRepository,
    models::sales::{
        checked_order_total, generate_order_number, SalesOrder, SalesOrderFilter, SalesOrderPayload,
        SalesStats, SalesStatusPayload,
    },
};

#[derive(Clone)]
pub struct SalesService {
    sales_repo: SalesRepository,
    pool: PgPool,
}

impl SalesService {
    pub fn new(sales_repo: SalesRepository, pool: PgPool) -> Self {
        Self { sales_repo, pool }
    }

    pub async fn list_orders(&self, filter: &SalesOrderFilter) -> Result<Vec<SalesOrder>, AppError> {
        self.sales_repo.list(filter).await
    }

    pub async fn get_order(&self, id: Uuid) -> Result<SalesOrder, AppError> {
        self.sales_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("sales_order_not_found"))
    }

    pub async fn stats(&self) -> Result<SalesStats, AppError> {
        self.sales_repo.stats().await
    }

    /// Número e total são sempre calculados aqui, nunca aceitos do cliente.
    pub async fn create_order(
        &self,
        payload: &SalesOrderPayload,
        created_by: Uuid,
    ) -> Result<SalesOrder, AppError> {
        let order_number = generate_order_number(Utc::now());
        let total_amount = checked_order_total(payload.quantity, payload.unit_price)?;

        let order = self
            .sales_repo
            .create(&self.pool, &order_number, total_amount, payload, created_by)
            .await?;

        tracing::info!("Pedido criado: {} (total {})", order.order_number, order.total_amount);
        Ok(order)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        payload: &SalesStatusPayload,
    ) -> Result<SalesOrder, AppError> {
        self.sales_repo
            .update_status(&self.pool, id, payload.payment_status, payload.order_status)
            .await?
            .ok_or(AppError::NotFound("sales_order_not_found"))
    }
}

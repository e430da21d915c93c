// src/services/farmer_service.rs

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::FarmerRepository,
    models::{
        farmer::{FarmerPayload, PurchasePayload, ThirdPartyFarmer, ThirdPartyPurchase},
        sales::checked_order_total,
    },
};

#[derive(Clone)]
pub struct FarmerService {
    farmer_repo: FarmerRepository,
    pool: PgPool,
}

impl FarmerService {
    pub fn new(farmer_repo: FarmerRepository, pool: PgPool) -> Self {
        Self { farmer_repo, pool }
    }

    pub async fn list_farmers(&self) -> Result<Vec<ThirdPartyFarmer>, AppError> {
        self.farmer_repo.list().await
    }

    pub async fn create_farmer(&self, payload: &FarmerPayload) -> Result<ThirdPartyFarmer, AppError> {
        let farmer = self.farmer_repo.create(&self.pool, payload).await?;
        tracing::info!("Agricultor cadastrado: {} ({})", farmer.name, farmer.id);
        Ok(farmer)
    }

    /// O total é quantidade x preço, como nos pedidos de venda.
    pub async fn record_purchase(
        &self,
        payload: &PurchasePayload,
        created_by: Uuid,
    ) -> Result<ThirdPartyPurchase, AppError> {
        if !self.farmer_repo.exists(payload.farmer_id).await? {
            return Err(AppError::NotFound("farmer_not_found"));
        }

        let total_amount = checked_order_total(payload.quantity, payload.unit_price)?;
        let purchase_date = payload
            .purchase_date
            .unwrap_or_else(|| Utc::now().date_naive());

        let purchase = self
            .farmer_repo
            .create_purchase(&self.pool, payload, total_amount, purchase_date, created_by)
            .await?;

        tracing::info!(
            "Compra registrada: {} {} de {} (total {})",
            purchase.quantity,
            purchase.unit,
            purchase.farmer_id,
            purchase.total_amount
        );
        Ok(purchase)
    }
}

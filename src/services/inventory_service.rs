// src/services/inventory_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    models::inventory::{
        InventoryFilter, InventoryItemPayload, InventoryItemView, InventoryStats, TransactionType,
    },
};

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
    pool: PgPool,
}

/// Movimentação a registrar quando a quantidade de um item muda.
/// `previous` é `None` na criação.
pub fn stock_movement(previous: Option<Decimal>, new: Decimal) -> Option<(TransactionType, Decimal)> {
    match previous {
        None if new > Decimal::ZERO => Some((TransactionType::InitialStock, new)),
        None => None,
        Some(old) => {
            let delta = new - old;
            (!delta.is_zero()).then_some((TransactionType::Adjustment, delta))
        }
    }
}

impl InventoryService {
    pub fn new(inventory_repo: InventoryRepository, pool: PgPool) -> Self {
        Self { inventory_repo, pool }
    }

    pub async fn list_items(&self, filter: &InventoryFilter) -> Result<Vec<InventoryItemView>, AppError> {
        let items = self.inventory_repo.list(filter).await?;
        Ok(items.into_iter().map(InventoryItemView::from).collect())
    }

    pub async fn get_item(&self, id: Uuid) -> Result<InventoryItemView, AppError> {
        self.inventory_repo
            .find_by_id(id)
            .await?
            .map(InventoryItemView::from)
            .ok_or(AppError::NotFound("inventory_item_not_found"))
    }

    pub async fn stats(&self) -> Result<InventoryStats, AppError> {
        self.inventory_repo.stats().await
    }

    // --- CREATE ITEM ---
    pub async fn create_item(
        &self,
        payload: &InventoryItemPayload,
        created_by: Uuid,
    ) -> Result<InventoryItemView, AppError> {
        let mut tx = self.pool.begin().await?;

        let item = self.inventory_repo.create(&mut *tx, payload, created_by).await?;

        if let Some((kind, quantity)) = stock_movement(None, item.quantity) {
            self.inventory_repo
                .record_transaction(&mut *tx, item.id, kind, quantity, Some("Item created"), created_by)
                .await?;
        }

        tx.commit().await?;

        tracing::info!("Item de estoque criado: {} ({})", item.name, item.id);
        Ok(item.into())
    }

    // --- UPDATE ITEM ---
    pub async fn update_item(
        &self,
        id: Uuid,
        payload: &InventoryItemPayload,
        updated_by: Uuid,
    ) -> Result<InventoryItemView, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = self
            .inventory_repo
            .find_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("inventory_item_not_found"))?;

        let item = self
            .inventory_repo
            .update(&mut *tx, id, payload)
            .await?
            .ok_or(AppError::NotFound("inventory_item_not_found"))?;

        if let Some((kind, delta)) = stock_movement(Some(current.quantity), item.quantity) {
            self.inventory_repo
                .record_transaction(&mut *tx, item.id, kind, delta, Some("Quantity edited"), updated_by)
                .await?;
        }

        tx.commit().await?;

        tracing::info!("Item de estoque atualizado: {}", item.id);
        Ok(item.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn new_item_with_stock_records_initial_stock() {
        assert_eq!(
            stock_movement(None, dec("40")),
            Some((TransactionType::InitialStock, dec("40")))
        );
    }

    #[test]
    fn new_empty_item_records_nothing() {
        assert_eq!(stock_movement(None, dec("0")), None);
    }

    #[test]
    fn edit_records_the_signed_delta() {
        assert_eq!(
            stock_movement(Some(dec("40")), dec("25.5")),
            Some((TransactionType::Adjustment, dec("-14.5")))
        );
        assert_eq!(
            stock_movement(Some(dec("0")), dec("3")),
            Some((TransactionType::Adjustment, dec("3")))
        );
    }

    #[test]
    fn edit_without_quantity_change_records_nothing() {
        assert_eq!(stock_movement(Some(dec("12.0")), dec("12")), None);
    }
}

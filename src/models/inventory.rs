// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_not_negative;
use crate::models::department::{DepartmentType, FarmLocation, OperationLevel};

// --- 1. Itens de estoque ---
// Cada item pertence a um departamento + nível + fazenda.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,
    #[schema(example = "Dried lemongrass")]
    pub name: String,
    pub department: DepartmentType,
    pub level: OperationLevel,
    pub location: FarmLocation,
    pub quantity: Decimal,
    #[schema(example = "kg")]
    pub unit: String,
    pub unit_price: Option<Decimal>,
    pub reorder_level: Option<Decimal>,
    pub description: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Estoque baixo: existe um ponto de reposição e a quantidade chegou nele.
    pub fn is_low_stock(&self) -> bool {
        is_low_stock(self.quantity, self.reorder_level)
    }
}

pub fn is_low_stock(quantity: Decimal, reorder_level: Option<Decimal>) -> bool {
    reorder_level.is_some_and(|level| quantity <= level)
}

// O que a tabela do painel recebe (item + badge de status)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemView {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub is_low_stock: bool,
}

impl From<InventoryItem> for InventoryItemView {
    fn from(item: InventoryItem) -> Self {
        let is_low_stock = item.is_low_stock();
        Self { item, is_low_stock }
    }
}

// --- 2. Movimentações (alimentam a "Atividade recente") ---
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, ToSchema, PartialEq, Eq)]
#[sqlx(type_name = "transaction_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    InitialStock,
    Adjustment,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::InitialStock => "initial_stock",
            TransactionType::Adjustment => "adjustment",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryTransaction {
    pub id: Uuid,
    pub item_id: Uuid,
    pub transaction_type: TransactionType,
    pub quantity: Decimal,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

// Filtros da listagem (?department=&level=&location=&search=)
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryFilter {
    #[serde(default, deserialize_with = "crate::common::filters::all_as_none")]
    pub department: Option<DepartmentType>,
    #[serde(default, deserialize_with = "crate::common::filters::all_as_none")]
    pub level: Option<OperationLevel>,
    #[serde(default, deserialize_with = "crate::common::filters::all_as_none")]
    pub location: Option<FarmLocation>,
    #[serde(default, deserialize_with = "crate::common::filters::blank_as_none")]
    pub search: Option<String>,
}

// Formulário de criação/edição (o PUT reenvia o item inteiro)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Dried lemongrass")]
    pub name: String,

    pub department: DepartmentType,
    pub level: OperationLevel,
    pub location: FarmLocation,

    #[validate(custom(function = "validate_not_negative"))]
    pub quantity: Decimal,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "kg")]
    pub unit: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub unit_price: Option<Decimal>,

    #[validate(custom(function = "validate_not_negative"))]
    pub reorder_level: Option<Decimal>,

    pub description: Option<String>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_items: i64,
    pub low_stock_items: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn item_without_reorder_level_is_never_low_stock() {
        assert!(!is_low_stock(dec("0"), None));
        assert!(!is_low_stock(dec("1000"), None));
    }

    #[test]
    fn item_at_or_below_reorder_level_is_low_stock() {
        assert!(is_low_stock(dec("10"), Some(dec("10"))));
        assert!(is_low_stock(dec("9.5"), Some(dec("10"))));
        assert!(!is_low_stock(dec("10.001"), Some(dec("10"))));
    }

    #[test]
    fn zero_reorder_level_flags_only_empty_stock() {
        assert!(is_low_stock(dec("0"), Some(dec("0"))));
        assert!(!is_low_stock(dec("1"), Some(dec("0"))));
    }

    #[test]
    fn view_carries_the_low_stock_flag() {
        let item = InventoryItem {
            id: Uuid::new_v4(),
            name: "Layers mash".into(),
            department: DepartmentType::Chicken,
            level: OperationLevel::Farm,
            location: FarmLocation::Nakaseke,
            quantity: dec("3"),
            unit: "bags".into(),
            unit_price: Some(dec("95000")),
            reorder_level: Some(dec("5")),
            description: None,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(InventoryItemView::from(item)).unwrap();
        assert_eq!(json["isLowStock"], true);
        assert_eq!(json["name"], "Layers mash");
        assert_eq!(json["level"], "farm");
    }

    #[test]
    fn payload_rejects_negative_amounts_and_blank_names() {
        let payload: InventoryItemPayload = serde_json::from_value(serde_json::json!({
            "name": "",
            "department": "coffee",
            "level": "value_addition",
            "location": "bukeerere",
            "quantity": -4,
            "unit": "kg",
            "reorderLevel": 2
        }))
        .unwrap();

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("quantity"));
        assert!(!fields.contains_key("reorder_level"));
    }
}

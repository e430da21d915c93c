// src/models/farmer.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{validate_not_negative, validate_positive};
use crate::models::department::DepartmentType;

// Fornecedor externo (agricultor terceiro)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThirdPartyFarmer {
    pub id: Uuid,
    #[schema(example = "Ssemakula John")]
    pub name: String,
    pub phone: Option<String>,
    #[schema(example = "Luwero")]
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThirdPartyPurchase {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub department: DepartmentType,
    #[schema(example = "Fresh avocado")]
    pub product_name: String,
    pub quantity: Decimal,
    pub unit: String,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub purchase_date: NaiveDate,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

// Compra + nome do agricultor (lista "Compras recentes")
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseWithFarmer {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub purchase: ThirdPartyPurchase,
    pub farmer_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FarmerPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Ssemakula John")]
    pub name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
}

// Compra de um agricultor terceiro. O total é calculado no servidor.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchasePayload {
    pub farmer_id: Uuid,

    pub department: DepartmentType,

    #[validate(length(min = 1, message = "required"))]
    pub product_name: String,

    #[validate(custom(function = "validate_positive"))]
    pub quantity: Decimal,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "kg")]
    pub unit: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub unit_price: Decimal,

    // Sem data, vale o dia de hoje
    pub purchase_date: Option<NaiveDate>,

    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purchase_serializes_with_farmer_name_inline() {
        let row = PurchaseWithFarmer {
            purchase: ThirdPartyPurchase {
                id: Uuid::new_v4(),
                farmer_id: Uuid::new_v4(),
                department: DepartmentType::Macadamia,
                product_name: "Macadamia in shell".into(),
                quantity: Decimal::new(120, 0),
                unit: "kg".into(),
                unit_price: Decimal::new(4500, 0),
                total_amount: Decimal::new(540_000, 0),
                purchase_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
                notes: None,
                created_by: None,
                created_at: Utc::now(),
            },
            farmer_name: Some("Nalubega Sarah".into()),
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["farmerName"], "Nalubega Sarah");
        assert_eq!(json["productName"], "Macadamia in shell");
        assert_eq!(json["purchaseDate"], "2025-03-14");
    }

    #[test]
    fn purchase_payload_requires_a_positive_quantity() {
        let payload: PurchasePayload = serde_json::from_value(serde_json::json!({
            "farmerId": Uuid::nil(),
            "department": "coffee",
            "productName": "Red cherries",
            "quantity": 0,
            "unit": "kg",
            "unitPrice": 1800
        }))
        .unwrap();

        assert!(payload.purchase_date.is_none());
        assert!(payload.validate().unwrap_err().field_errors().contains_key("quantity"));
    }
}

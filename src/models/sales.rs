// src/models/sales.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::common::validation::{field_error, validate_not_negative, validate_positive};
use crate::models::department::DepartmentType;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, ToSchema, PartialEq, Eq, Default)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Partial,
    Paid,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, ToSchema, PartialEq, Eq, Default)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, ToSchema, PartialEq, Eq)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    MobileMoney,
    Check,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrder {
    pub id: Uuid,
    #[schema(example = "ORD-1718012345678")]
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub department: DepartmentType,
    #[schema(example = "Fresh Lemongrass - 50kg bags")]
    pub product_description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    // Gravado na criação (quantity * unit_price)
    pub total_amount: Decimal,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Total de um pedido ou compra: quantidade x preço unitário, sem arredondamento.
/// `None` quando o produto não cabe em um `Decimal`.
pub fn order_total(quantity: Decimal, unit_price: Decimal) -> Option<Decimal> {
    quantity.checked_mul(unit_price)
}

/// Como `order_total`, mas já no formato de erro de validação do campo `quantity`.
pub fn checked_order_total(quantity: Decimal, unit_price: Decimal) -> Result<Decimal, ValidationErrors> {
    order_total(quantity, unit_price).ok_or_else(|| field_error("quantity", "amount_too_large"))
}

/// Número do pedido no formato `ORD-<unix millis>`.
pub fn generate_order_number(now: DateTime<Utc>) -> String {
    format!("ORD-{}", now.timestamp_millis())
}

#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct SalesOrderFilter {
    #[serde(default, deserialize_with = "crate::common::filters::all_as_none")]
    pub department: Option<DepartmentType>,
    #[serde(default, deserialize_with = "crate::common::filters::all_as_none")]
    pub order_status: Option<OrderStatus>,
    #[serde(default, deserialize_with = "crate::common::filters::all_as_none")]
    pub payment_status: Option<PaymentStatus>,
}

// Novo pedido (ponto de venda)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Kampala Fresh Mart")]
    pub customer_name: String,

    #[validate(email(message = "invalid_email"))]
    pub customer_email: Option<String>,

    pub customer_phone: Option<String>,

    pub department: DepartmentType,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Fresh Lemongrass - 50kg bags")]
    pub product_description: String,

    #[validate(custom(function = "validate_positive"))]
    pub quantity: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    pub unit_price: Decimal,

    pub payment_method: Option<PaymentMethod>,

    #[serde(default)]
    pub payment_status: PaymentStatus,

    #[serde(default)]
    pub order_status: OrderStatus,

    pub notes: Option<String>,
}

// Só os status mudam depois da criação
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesStatusPayload {
    pub payment_status: Option<PaymentStatus>,
    pub order_status: Option<OrderStatus>,
}

impl SalesStatusPayload {
    pub fn validate_consistency(&self) -> Result<(), ValidationErrors> {
        if self.payment_status.is_none() && self.order_status.is_none() {
            return Err(field_error("orderStatus", "nothing_to_update"));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    pub total_revenue: Decimal,
    pub total_orders: i64,
    pub pending_orders: i64,
    pub completed_orders: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn total_is_quantity_times_unit_price() {
        assert_eq!(order_total(dec("50"), dec("3500")), Some(dec("175000")));
        assert_eq!(order_total(dec("2.5"), dec("1200.40")), Some(dec("3001.000")));
        assert_eq!(order_total(dec("0.333"), dec("3")), Some(dec("0.999")));
    }

    #[test]
    fn huge_totals_become_a_quantity_error() {
        let payload: SalesOrderPayload = serde_json::from_value(serde_json::json!({
            "customerName": "Kampala Fresh Mart",
            "department": "coffee",
            "productDescription": "Roasted beans",
            "quantity": 1e20,
            "unitPrice": 1e20
        }))
        .unwrap();
        assert!(payload.validate().is_ok());

        assert_eq!(order_total(payload.quantity, payload.unit_price), None);

        let errors = checked_order_total(payload.quantity, payload.unit_price).unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["quantity"][0].code, "amount_too_large");
    }

    #[test]
    fn order_number_uses_unix_millis() {
        let now = Utc.timestamp_millis_opt(1_718_012_345_678).unwrap();
        assert_eq!(generate_order_number(now), "ORD-1718012345678");
    }

    #[test]
    fn new_orders_default_to_unpaid_and_pending() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Unpaid);
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn order_payload_needs_a_positive_quantity_and_valid_email() {
        let payload: SalesOrderPayload = serde_json::from_value(serde_json::json!({
            "customerName": "Kampala Fresh Mart",
            "customerEmail": "not-an-email",
            "department": "avocado",
            "productDescription": "Hass avocado crates",
            "quantity": 0,
            "unitPrice": 45000
        }))
        .unwrap();

        assert_eq!(payload.payment_status, PaymentStatus::Unpaid);
        assert_eq!(payload.order_status, OrderStatus::Pending);

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("quantity"));
        assert!(fields.contains_key("customer_email"));
        assert!(!fields.contains_key("unit_price"));
    }

    #[test]
    fn status_update_needs_at_least_one_field() {
        let empty = SalesStatusPayload { payment_status: None, order_status: None };
        assert!(empty.validate_consistency().is_err());

        let paid = SalesStatusPayload { payment_status: Some(PaymentStatus::Paid), order_status: None };
        assert!(paid.validate_consistency().is_ok());
    }
}

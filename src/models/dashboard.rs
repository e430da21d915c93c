// src/models/dashboard.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{auth::UserRole, inventory::TransactionType};

// 1. Cards do topo
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub inventory_items: i64,
    pub employees: i64,
    pub vehicles: i64,
    pub pending_orders: i64,
}

// 2. Linha crua vinda do banco (movimentação + nome do item)
#[derive(Debug, FromRow)]
pub struct ActivityRow {
    pub id: Uuid,
    pub transaction_type: TransactionType,
    pub quantity: Decimal,
    pub item_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    #[schema(example = "inventory")]
    pub kind: String,
    #[schema(example = "initial_stock - 40 units of Dried lemongrass")]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<ActivityRow> for Activity {
    fn from(row: ActivityRow) -> Self {
        let item_name = row.item_name.as_deref().unwrap_or("item");
        Self {
            id: row.id,
            kind: "inventory".to_string(),
            description: format!(
                "{} - {} units of {}",
                row.transaction_type.as_str(),
                row.quantity.normalize(),
                item_name
            ),
            created_at: row.created_at,
        }
    }
}

// 3. Ações rápidas
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuickAction {
    #[schema(example = "New Sale")]
    pub label: String,
    #[schema(example = "/dashboard/pos/new")]
    pub href: String,
    pub description: String,
    pub admin_only: bool,
}

// (rótulo, rota, descrição, só admin)
const QUICK_ACTIONS: [(&str, &str, &str, bool); 4] = [
    ("New Sale", "/dashboard/pos/new", "Create a new sales order", false),
    ("Add Inventory", "/dashboard/inventory/new", "Add new inventory item", true),
    ("Log Fleet Usage", "/dashboard/fleet/log", "Record vehicle usage", false),
    ("Record Purchase", "/dashboard/farmers/purchase", "From third-party farmer", false),
];

pub fn quick_actions_for(role: UserRole) -> Vec<QuickAction> {
    QUICK_ACTIONS
        .iter()
        .filter(|(_, _, _, admin_only)| !admin_only || role.is_admin())
        .map(|(label, href, description, admin_only)| QuickAction {
            label: label.to_string(),
            href: href.to_string(),
            description: description.to_string(),
            admin_only: *admin_only,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employees_do_not_see_admin_actions() {
        let actions = quick_actions_for(UserRole::Employee);
        assert_eq!(actions.len(), 3);
        assert!(actions.iter().all(|a| a.label != "Add Inventory"));
    }

    #[test]
    fn admins_see_every_action() {
        assert_eq!(quick_actions_for(UserRole::Admin).len(), 4);
        assert_eq!(quick_actions_for(UserRole::SuperAdmin).len(), 4);
    }

    #[test]
    fn activity_description_names_the_item() {
        let row = ActivityRow {
            id: Uuid::new_v4(),
            transaction_type: TransactionType::InitialStock,
            quantity: "40.000".parse().unwrap(),
            item_name: Some("Dried lemongrass".into()),
            created_at: Utc::now(),
        };

        let activity = Activity::from(row);
        assert_eq!(activity.description, "initial_stock - 40 units of Dried lemongrass");
        assert_eq!(activity.kind, "inventory");
    }

    #[test]
    fn activity_without_item_falls_back_to_generic_name() {
        let row = ActivityRow {
            id: Uuid::new_v4(),
            transaction_type: TransactionType::Adjustment,
            quantity: "-2.5".parse().unwrap(),
            item_name: None,
            created_at: Utc::now(),
        };

        assert_eq!(Activity::from(row).description, "adjustment - -2.5 units of item");
    }
}

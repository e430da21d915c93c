// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,

        // --- Inventory ---
        handlers::inventory::list_items,
        handlers::inventory::get_stats,
        handlers::inventory::get_item,
        handlers::inventory::create_item,
        handlers::inventory::update_item,

        // --- Fleet ---
        handlers::fleet::list_vehicles,
        handlers::fleet::list_available,
        handlers::fleet::get_stats,
        handlers::fleet::get_vehicle,
        handlers::fleet::create_vehicle,
        handlers::fleet::update_vehicle,
        handlers::fleet::list_vehicle_trips,
        handlers::fleet::log_trip,
        handlers::fleet::complete_trip,

        // --- Sales ---
        handlers::sales::list_orders,
        handlers::sales::get_stats,
        handlers::sales::get_order,
        handlers::sales::create_order,
        handlers::sales::update_status,

        // --- Employees ---
        handlers::employees::list_employees,
        handlers::employees::get_employee,
        handlers::employees::update_employee,

        // --- Departments ---
        handlers::departments::list_departments,
        handlers::departments::get_department,
        handlers::departments::get_farm_inventory,
        handlers::departments::get_department_sales,
        handlers::departments::get_recent_purchases,

        // --- Farmers ---
        handlers::farmers::list_farmers,
        handlers::farmers::create_farmer,
        handlers::farmers::record_purchase,

        // --- Dashboard ---
        handlers::dashboard::get_stats,
        handlers::dashboard::get_recent_activity,
        handlers::dashboard::get_quick_actions,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::Profile,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::MeResponse,

            // --- Departments ---
            models::department::DepartmentType,
            models::department::OperationLevel,
            models::department::FarmLocation,
            models::department::Department,
            models::department::DepartmentSummary,
            models::department::DepartmentDetail,

            // --- Inventory ---
            models::inventory::InventoryItem,
            models::inventory::InventoryItemView,
            models::inventory::InventoryItemPayload,
            models::inventory::InventoryStats,
            models::inventory::TransactionType,
            models::inventory::InventoryTransaction,

            // --- Fleet ---
            models::fleet::VehicleStatus,
            models::fleet::FleetVehicle,
            models::fleet::FleetUsage,
            models::fleet::FleetStats,
            models::fleet::VehiclePayload,
            models::fleet::TripPayload,
            models::fleet::CompleteTripPayload,

            // --- Sales ---
            models::sales::PaymentStatus,
            models::sales::OrderStatus,
            models::sales::PaymentMethod,
            models::sales::SalesOrder,
            models::sales::SalesStats,
            models::sales::SalesOrderPayload,
            models::sales::SalesStatusPayload,

            // --- Employees ---
            models::employee::UpdateEmployeePayload,

            // --- Farmers ---
            models::farmer::ThirdPartyFarmer,
            models::farmer::ThirdPartyPurchase,
            models::farmer::PurchaseWithFarmer,
            models::farmer::FarmerPayload,
            models::farmer::PurchasePayload,

            // --- Dashboard ---
            models::dashboard::DashboardStats,
            models::dashboard::Activity,
            models::dashboard::QuickAction,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário e Perfil"),
        (name = "Inventory", description = "Estoque por departamento, nível e fazenda"),
        (name = "Fleet", description = "Veículos e registro de viagens"),
        (name = "Sales", description = "Ponto de venda e pedidos"),
        (name = "Employees", description = "Perfis dos colaboradores"),
        (name = "Departments", description = "Linhas de produto e seus níveis"),
        (name = "Farmers", description = "Agricultores terceiros e compras"),
        (name = "Dashboard", description = "Indicadores da página inicial")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_the_main_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/inventory"));
        assert!(paths.contains_key("/api/fleet/usage"));
        assert!(paths.contains_key("/api/sales/{id}/status"));
        assert!(paths.contains_key("/api/departments/{name}/purchases"));
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("api_jwt"));
    }
}

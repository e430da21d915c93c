pub mod auth;
pub mod dashboard_service;
pub mod department_service;
pub mod employee_service;
pub mod farmer_service;
pub mod fleet_service;
pub mod inventory_service;
pub mod sales_service;

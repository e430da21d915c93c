pub mod dashboard_repo;
pub mod department_repo;
pub mod farmer_repo;
pub mod fleet_repo;
pub mod inventory_repo;
pub mod profile_repo;
pub mod sales_repo;

pub use dashboard_repo::DashboardRepository;
pub use department_repo::DepartmentRepository;
pub use farmer_repo::FarmerRepository;
pub use fleet_repo::FleetRepository;
pub use inventory_repo::InventoryRepository;
pub use profile_repo::ProfileRepository;
pub use sales_repo::SalesRepository;

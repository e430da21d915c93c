pub mod auth;
pub mod dashboard;
pub mod department;
pub mod employee;
pub mod farmer;
pub mod fleet;
pub mod inventory;
pub mod sales;

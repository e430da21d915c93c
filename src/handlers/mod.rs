pub mod auth;
pub mod dashboard;
pub mod departments;
pub mod employees;
pub mod farmers;
pub mod fleet;
pub mod inventory;
pub mod sales;

// src/services/department_service.rs

use crate::{
    common::error::AppError,
    db::{DepartmentRepository, FarmerRepository, InventoryRepository, SalesRepository},
    models::{
        department::{Department, DepartmentDetail, DepartmentSummary, DepartmentType, OperationLevel},
        farmer::PurchaseWithFarmer,
        inventory::{InventoryFilter, InventoryItemView},
        sales::{SalesOrder, SalesOrderFilter},
    },
};

// Quantas compras aparecem no card "Compras recentes"
const RECENT_PURCHASES: i64 = 5;

#[derive(Clone)]
pub struct DepartmentService {
    department_repo: DepartmentRepository,
    inventory_repo: InventoryRepository,
    sales_repo: SalesRepository,
    farmer_repo: FarmerRepository,
}

/// Departamento sem o nível pedido se comporta como página inexistente.
pub fn require_level(department: Department, level: OperationLevel) -> Result<Department, AppError> {
    if department.has_level(level) {
        Ok(department)
    } else {
        Err(AppError::NotFound("department_not_found"))
    }
}

impl DepartmentService {
    pub fn new(
        department_repo: DepartmentRepository,
        inventory_repo: InventoryRepository,
        sales_repo: SalesRepository,
        farmer_repo: FarmerRepository,
    ) -> Self {
        Self { department_repo, inventory_repo, sales_repo, farmer_repo }
    }

    pub async fn list(&self) -> Result<Vec<DepartmentSummary>, AppError> {
        let departments = self.department_repo.list().await?;
        Ok(departments.into_iter().map(DepartmentSummary::from).collect())
    }

    // O nome vem da URL ("/departments/coffee")
    async fn resolve(&self, name: &str) -> Result<Department, AppError> {
        let department_type: DepartmentType = name
            .parse()
            .map_err(|_| AppError::NotFound("department_not_found"))?;

        self.department_repo
            .find_by_name(department_type)
            .await?
            .ok_or(AppError::NotFound("department_not_found"))
    }

    pub async fn detail(&self, name: &str) -> Result<DepartmentDetail, AppError> {
        let department = self.resolve(name).await?;

        let inventory_count = self.inventory_repo.count_by_department(department.name).await?;
        let sales_count = self.sales_repo.count_by_department(department.name).await?;

        Ok(DepartmentDetail {
            summary: department.into(),
            inventory_count,
            sales_count,
        })
    }

    pub async fn farm_inventory(&self, name: &str) -> Result<Vec<InventoryItemView>, AppError> {
        let department = require_level(self.resolve(name).await?, OperationLevel::Farm)?;

        let filter = InventoryFilter {
            department: Some(department.name),
            level: Some(OperationLevel::Farm),
            ..Default::default()
        };
        let items = self.inventory_repo.list(&filter).await?;
        Ok(items.into_iter().map(InventoryItemView::from).collect())
    }

    pub async fn sales(&self, name: &str) -> Result<Vec<SalesOrder>, AppError> {
        let department = require_level(self.resolve(name).await?, OperationLevel::Sales)?;

        let filter = SalesOrderFilter {
            department: Some(department.name),
            ..Default::default()
        };
        self.sales_repo.list(&filter).await
    }

    pub async fn recent_purchases(&self, name: &str) -> Result<Vec<PurchaseWithFarmer>, AppError> {
        let department = require_level(self.resolve(name).await?, OperationLevel::Farm)?;

        self.farmer_repo
            .recent_by_department(department.name, RECENT_PURCHASES)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn department(has_farm: bool, has_value_addition: bool, has_sales: bool) -> Department {
        Department {
            id: Uuid::new_v4(),
            name: DepartmentType::Coffee,
            description: None,
            has_farm,
            has_value_addition,
            has_sales,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn department_with_the_level_passes() {
        assert!(require_level(department(true, false, true), OperationLevel::Farm).is_ok());
        assert!(require_level(department(true, false, true), OperationLevel::Sales).is_ok());
    }

    #[test]
    fn missing_level_is_not_found() {
        let result = require_level(department(true, false, true), OperationLevel::ValueAddition);
        assert!(matches!(result, Err(AppError::NotFound("department_not_found"))));

        let result = require_level(department(false, false, true), OperationLevel::Farm);
        assert!(matches!(result, Err(AppError::NotFound("department_not_found"))));
    }
}

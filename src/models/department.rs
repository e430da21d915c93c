// src/models/department.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

// --- 1. Linhas de produto (fixas) ---
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, ToSchema, PartialEq, Eq, Hash)]
#[sqlx(type_name = "department_type", rename_all = "snake_case")] // Banco
#[serde(rename_all = "snake_case")] // JSON
pub enum DepartmentType {
    Lemongrass,
    Chicken,
    Fish,
    Coffee,
    Macadamia,
    Avocado,
}

impl DepartmentType {
    pub const ALL: [DepartmentType; 6] = [
        DepartmentType::Lemongrass,
        DepartmentType::Chicken,
        DepartmentType::Fish,
        DepartmentType::Coffee,
        DepartmentType::Macadamia,
        DepartmentType::Avocado,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DepartmentType::Lemongrass => "lemongrass",
            DepartmentType::Chicken => "chicken",
            DepartmentType::Fish => "fish",
            DepartmentType::Coffee => "coffee",
            DepartmentType::Macadamia => "macadamia",
            DepartmentType::Avocado => "avocado",
        }
    }

    /// Nome exibido nos cards do painel.
    pub fn display_name(&self) -> &'static str {
        match self {
            DepartmentType::Lemongrass => "Lemongrass",
            DepartmentType::Chicken => "Chicken (Kroilers)",
            DepartmentType::Fish => "Catfish",
            DepartmentType::Coffee => "Coffee",
            DepartmentType::Macadamia => "Macadamia Nuts",
            DepartmentType::Avocado => "Avocado",
        }
    }
}

impl FromStr for DepartmentType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DepartmentType::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or(())
    }
}

// --- 2. Níveis de operação ---
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, ToSchema, PartialEq, Eq)]
#[sqlx(type_name = "operation_level", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OperationLevel {
    Farm,
    ValueAddition,
    Sales,
}

// --- 3. Fazendas ---
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, ToSchema, PartialEq, Eq)]
#[sqlx(type_name = "farm_location", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FarmLocation {
    Nakaseke,
    Bukeerere,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: Uuid,
    pub name: DepartmentType,
    #[schema(example = "Lemongrass cultivation and oil extraction")]
    pub description: Option<String>,
    pub has_farm: bool,
    pub has_value_addition: bool,
    pub has_sales: bool,
    pub created_at: DateTime<Utc>,
}

impl Department {
    pub fn has_level(&self, level: OperationLevel) -> bool {
        match level {
            OperationLevel::Farm => self.has_farm,
            OperationLevel::ValueAddition => self.has_value_addition,
            OperationLevel::Sales => self.has_sales,
        }
    }
}

// Card da listagem de departamentos
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummary {
    #[serde(flatten)]
    pub department: Department,
    #[schema(example = "Chicken (Kroilers)")]
    pub display_name: String,
}

impl From<Department> for DepartmentSummary {
    fn from(department: Department) -> Self {
        let display_name = department.name.display_name().to_string();
        Self { department, display_name }
    }
}

// Página de detalhe (com contadores)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDetail {
    #[serde(flatten)]
    pub summary: DepartmentSummary,
    pub inventory_count: i64,
    pub sales_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_names_round_trip_through_from_str() {
        for department in DepartmentType::ALL {
            assert_eq!(department.as_str().parse::<DepartmentType>(), Ok(department));
        }
        assert!("wheat".parse::<DepartmentType>().is_err());
    }

    #[test]
    fn fish_department_is_displayed_as_catfish() {
        assert_eq!(DepartmentType::Fish.display_name(), "Catfish");
    }

    #[test]
    fn has_level_follows_the_flags() {
        let department = Department {
            id: Uuid::new_v4(),
            name: DepartmentType::Coffee,
            description: None,
            has_farm: true,
            has_value_addition: false,
            has_sales: true,
            created_at: Utc::now(),
        };

        assert!(department.has_level(OperationLevel::Farm));
        assert!(!department.has_level(OperationLevel::ValueAddition));
        assert!(department.has_level(OperationLevel::Sales));
    }
}

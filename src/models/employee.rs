// src/models/employee.rs

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{
    auth::UserRole,
    department::{DepartmentType, FarmLocation},
};

// Filtros da listagem de colaboradores
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeFilter {
    #[serde(default, deserialize_with = "crate::common::filters::all_as_none")]
    pub role: Option<UserRole>,
    #[serde(default, deserialize_with = "crate::common::filters::all_as_none")]
    pub department: Option<DepartmentType>,
    #[serde(default, deserialize_with = "crate::common::filters::all_as_none")]
    pub location: Option<FarmLocation>,
    // Casa com o nome OU com o e-mail
    #[serde(default, deserialize_with = "crate::common::filters::blank_as_none")]
    pub search: Option<String>,
}

// Edição feita por um administrador. E-mail não muda por aqui.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Jane Nakato")]
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub department: Option<DepartmentType>,
    pub location: Option<FarmLocation>,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_treats_all_as_no_filter() {
        let filter: EmployeeFilter = serde_json::from_value(serde_json::json!({
            "role": "all",
            "department": "fish",
            "search": "  "
        }))
        .unwrap();

        assert!(filter.role.is_none());
        assert_eq!(filter.department, Some(DepartmentType::Fish));
        assert!(filter.search.is_none());
    }
}

// src/common/filters.rs
//
// Helpers de query string: o painel manda "all" (ou vazio) quando o filtro
// não deve ser aplicado.

use serde::de::{value::StringDeserializer, Deserialize, Deserializer, IntoDeserializer};

/// `?department=all`, `?department=` e ausência viram `None`.
pub fn all_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => {
            let de: StringDeserializer<D::Error> = value.to_string().into_deserializer();
            T::deserialize(de).map(Some)
        }
    }
}

/// Texto de busca: espaços em branco contam como "sem busca".
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

/// Padrão para ILIKE (busca por substring).
pub fn contains_pattern(search: &str) -> String {
    format!("%{}%", search)
}

#[cfg(test)]
mod tests {
    use axum::{extract::Query, http::Uri};

    use crate::models::{
        department::{DepartmentType, OperationLevel},
        inventory::InventoryFilter,
    };

    // Mesmo caminho do handler: query string -> extrator Query
    fn parse(query: &str) -> Result<InventoryFilter, String> {
        let uri: Uri = format!("/api/inventory?{}", query).parse().map_err(|e| format!("{e}"))?;
        Query::<InventoryFilter>::try_from_uri(&uri)
            .map(|Query(filter)| filter)
            .map_err(|e| e.body_text())
    }

    #[test]
    fn all_means_no_filter() {
        let filter = parse("department=all&level=all&search=").unwrap();
        assert!(filter.department.is_none());
        assert!(filter.level.is_none());
        assert!(filter.search.is_none());
    }

    #[test]
    fn concrete_values_are_parsed() {
        let filter = parse("department=coffee&level=value_addition&search=%20beans%20").unwrap();
        assert_eq!(filter.department, Some(DepartmentType::Coffee));
        assert_eq!(filter.level, Some(OperationLevel::ValueAddition));
        assert_eq!(filter.search.as_deref(), Some("beans"));
    }

    #[test]
    fn plus_encoded_search_is_decoded() {
        let filter = parse("search=dried+lemongrass").unwrap();
        assert_eq!(filter.search.as_deref(), Some("dried lemongrass"));
    }

    #[test]
    fn missing_parameters_default_to_none() {
        let filter = parse("").unwrap();
        assert!(filter.department.is_none());
        assert!(filter.location.is_none());
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert!(parse("department=wheat").is_err());
    }

    #[test]
    fn search_is_wrapped_for_ilike() {
        assert_eq!(super::contains_pattern("grass"), "%grass%");
    }
}

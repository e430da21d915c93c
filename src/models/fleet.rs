// src/models/fleet.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::common::validation::{field_error, validate_not_negative};
use crate::models::department::FarmLocation;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, ToSchema, PartialEq, Eq, Default)]
#[sqlx(type_name = "vehicle_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Available,
    InUse,
    Maintenance,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FleetVehicle {
    pub id: Uuid,
    #[schema(example = "Pickup Truck 1")]
    pub vehicle_name: String,
    #[schema(example = "Truck")]
    pub vehicle_type: String,
    #[schema(example = "UAH 123X")]
    pub registration_number: String,
    pub location: FarmLocation,
    pub status: VehicleStatus,
    pub last_service_date: Option<NaiveDate>,
    pub next_service_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Registro de viagem. Aberta enquanto não tiver end_time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FleetUsage {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    #[schema(example = "Deliver feed to Bukeerere")]
    pub purpose: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub start_mileage: Option<Decimal>,
    pub end_mileage: Option<Decimal>,
    pub fuel_used: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl FleetUsage {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}

/// Novo status do veículo depois de registrar uma viagem.
/// Viagem sem horário de término deixa o veículo "em uso"; caso contrário nada muda.
pub fn vehicle_status_after_trip(end_time: Option<DateTime<Utc>>) -> Option<VehicleStatus> {
    match end_time {
        None => Some(VehicleStatus::InUse),
        Some(_) => None,
    }
}

#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FleetFilter {
    #[serde(default, deserialize_with = "crate::common::filters::all_as_none")]
    pub status: Option<VehicleStatus>,
}

// Cadastro/edição de veículo
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Pickup Truck 1")]
    pub vehicle_name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Truck")]
    pub vehicle_type: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "UAH 123X")]
    pub registration_number: String,

    pub location: FarmLocation,

    // Ausente: "available" no cadastro, status atual na edição
    pub status: Option<VehicleStatus>,

    pub last_service_date: Option<NaiveDate>,
    pub next_service_date: Option<NaiveDate>,
}

// Registro de viagem (o motorista é sempre quem está logado)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripPayload {
    pub vehicle_id: Uuid,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Deliver feed to Bukeerere")]
    pub purpose: String,

    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,

    #[validate(custom(function = "validate_not_negative"))]
    pub start_mileage: Option<Decimal>,

    #[validate(custom(function = "validate_not_negative"))]
    pub end_mileage: Option<Decimal>,

    #[validate(custom(function = "validate_not_negative"))]
    pub fuel_used: Option<Decimal>,
}

impl TripPayload {
    pub fn validate_consistency(&self) -> Result<(), ValidationErrors> {
        check_trip_window(self.start_time, self.end_time)
    }
}

// Encerramento de viagem aberta. Sem horário, vale o "agora".
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTripPayload {
    pub end_time: Option<DateTime<Utc>>,

    #[validate(custom(function = "validate_not_negative"))]
    pub end_mileage: Option<Decimal>,

    #[validate(custom(function = "validate_not_negative"))]
    pub fuel_used: Option<Decimal>,
}

/// O término, quando existe, não pode vir antes do início.
pub fn check_trip_window(
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
) -> Result<(), ValidationErrors> {
    match end_time {
        Some(end) if end < start_time => Err(field_error("endTime", "end_before_start")),
        _ => Ok(()),
    }
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FleetStats {
    pub total: i64,
    pub available: i64,
    pub in_use: i64,
    pub maintenance: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn open_trip_puts_vehicle_in_use() {
        assert_eq!(vehicle_status_after_trip(None), Some(VehicleStatus::InUse));
    }

    #[test]
    fn closed_trip_leaves_vehicle_status_alone() {
        assert_eq!(vehicle_status_after_trip(Some(Utc::now())), None);
    }

    #[test]
    fn status_is_snake_case_in_json() {
        let json = serde_json::to_string(&VehicleStatus::InUse).unwrap();
        assert_eq!(json, "\"in_use\"");
    }

    #[test]
    fn trip_cannot_end_before_it_starts() {
        let start = Utc::now();
        assert!(check_trip_window(start, None).is_ok());
        assert!(check_trip_window(start, Some(start)).is_ok());
        assert!(check_trip_window(start, Some(start + Duration::hours(2))).is_ok());

        let errors = check_trip_window(start, Some(start - Duration::minutes(1))).unwrap_err();
        assert!(errors.field_errors().contains_key("endTime"));
    }

    #[test]
    fn vehicle_payload_status_is_optional() {
        let payload: VehiclePayload = serde_json::from_value(serde_json::json!({
            "vehicleName": "Tractor",
            "vehicleType": "Tractor",
            "registrationNumber": "UBA 001T",
            "location": "nakaseke"
        }))
        .unwrap();

        assert_eq!(payload.status, None);
        assert!(payload.validate().is_ok());
    }
}

// src/services/fleet_service.rs

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::FleetRepository,
    models::fleet::{
        check_trip_window, vehicle_status_after_trip, CompleteTripPayload, FleetFilter, FleetStats,
        FleetUsage, FleetVehicle, TripPayload, VehiclePayload, VehicleStatus,
    },
};

#[derive(Clone)]
pub struct FleetService {
    fleet_repo: FleetRepository,
    pool: PgPool,
}

/// Ao encerrar uma viagem, só um veículo "em uso" e sem outra viagem aberta volta a
/// ficar disponível (um veículo mandado para manutenção no meio da viagem continua lá).
pub fn vehicle_status_after_completion(
    current: VehicleStatus,
    other_trip_open: bool,
) -> Option<VehicleStatus> {
    match current {
        VehicleStatus::InUse if !other_trip_open => Some(VehicleStatus::Available),
        _ => None,
    }
}

/// Status gravado na edição de um veículo. Sem status no payload, mantém o atual.
/// Veículo com viagem aberta não pode ser liberado à mão.
pub fn resolve_vehicle_status(
    current: VehicleStatus,
    requested: Option<VehicleStatus>,
    trip_open: bool,
) -> Result<VehicleStatus, AppError> {
    match requested {
        None => Ok(current),
        Some(VehicleStatus::Available) if trip_open => Err(AppError::VehicleUnavailable),
        Some(status) => Ok(status),
    }
}

impl FleetService {
    pub fn new(fleet_repo: FleetRepository, pool: PgPool) -> Self {
        Self { fleet_repo, pool }
    }

    // ---
    // Veículos
    // ---

    pub async fn list_vehicles(&self, filter: &FleetFilter) -> Result<Vec<FleetVehicle>, AppError> {
        self.fleet_repo.list(filter).await
    }

    /// Veículos que podem sair agora (seletor do formulário de viagem).
    pub async fn available_vehicles(&self) -> Result<Vec<FleetVehicle>, AppError> {
        let filter = FleetFilter { status: Some(VehicleStatus::Available) };
        self.fleet_repo.list(&filter).await
    }

    pub async fn get_vehicle(&self, id: Uuid) -> Result<FleetVehicle, AppError> {
        self.fleet_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("vehicle_not_found"))
    }

    pub async fn stats(&self) -> Result<FleetStats, AppError> {
        self.fleet_repo.stats().await
    }

    pub async fn create_vehicle(&self, payload: &VehiclePayload) -> Result<FleetVehicle, AppError> {
        let vehicle = self.fleet_repo.create(&self.pool, payload).await?;
        tracing::info!("Veículo cadastrado: {} ({})", vehicle.registration_number, vehicle.id);
        Ok(vehicle)
    }

    pub async fn update_vehicle(
        &self,
        id: Uuid,
        payload: &VehiclePayload,
    ) -> Result<FleetVehicle, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = self
            .fleet_repo
            .find_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("vehicle_not_found"))?;

        let trip_open = self.fleet_repo.has_open_trip(&mut *tx, id).await?;
        let status = resolve_vehicle_status(current.status, payload.status, trip_open)?;

        let vehicle = self
            .fleet_repo
            .update(&mut *tx, id, payload, status)
            .await?
            .ok_or(AppError::NotFound("vehicle_not_found"))?;

        tx.commit().await?;
        Ok(vehicle)
    }

    // ---
    // Viagens
    // ---

    pub async fn list_trips(&self, vehicle_id: Uuid) -> Result<Vec<FleetUsage>, AppError> {
        // 404 para veículo inexistente, lista vazia para veículo sem viagens
        self.get_vehicle(vehicle_id).await?;
        self.fleet_repo.list_usage(vehicle_id).await
    }

    /// Registra uma viagem feita por `driver_id`. Viagem sem término deixa o veículo "em uso".
    pub async fn log_trip(&self, driver_id: Uuid, payload: &TripPayload) -> Result<FleetUsage, AppError> {
        let mut tx = self.pool.begin().await?;

        let vehicle = self
            .fleet_repo
            .find_for_update(&mut *tx, payload.vehicle_id)
            .await?
            .ok_or(AppError::NotFound("vehicle_not_found"))?;

        if vehicle.status != VehicleStatus::Available {
            return Err(AppError::VehicleUnavailable);
        }

        let trip = self.fleet_repo.create_usage(&mut *tx, driver_id, payload).await?;

        if let Some(status) = vehicle_status_after_trip(trip.end_time) {
            self.fleet_repo.set_status(&mut *tx, vehicle.id, status).await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Viagem registrada: veículo {} por {} (aberta: {})",
            vehicle.registration_number,
            driver_id,
            trip.is_open()
        );
        Ok(trip)
    }

    pub async fn complete_trip(
        &self,
        trip_id: Uuid,
        payload: &CompleteTripPayload,
    ) -> Result<FleetUsage, AppError> {
        let mut tx = self.pool.begin().await?;

        let trip = self
            .fleet_repo
            .find_usage_for_update(&mut *tx, trip_id)
            .await?
            .ok_or(AppError::NotFound("trip_not_found"))?;

        if !trip.is_open() {
            return Err(AppError::TripAlreadyCompleted);
        }

        let end_time = payload.end_time.unwrap_or_else(Utc::now);
        check_trip_window(trip.start_time, Some(end_time))?;

        let vehicle = self
            .fleet_repo
            .find_for_update(&mut *tx, trip.vehicle_id)
            .await?
            .ok_or(AppError::NotFound("vehicle_not_found"))?;

        let trip = self
            .fleet_repo
            .complete_usage(&mut *tx, trip.id, end_time, payload.end_mileage, payload.fuel_used)
            .await?;

        // A viagem já está fechada nesta transação; qualquer aberta é outra
        let other_trip_open = self.fleet_repo.has_open_trip(&mut *tx, vehicle.id).await?;
        if let Some(status) = vehicle_status_after_completion(vehicle.status, other_trip_open) {
            self.fleet_repo.set_status(&mut *tx, vehicle.id, status).await?;
        }

        tx.commit().await?;

        tracing::info!("Viagem encerrada: {}", trip.id);
        Ok(trip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completing_returns_in_use_vehicle_to_available() {
        assert_eq!(
            vehicle_status_after_completion(VehicleStatus::InUse, false),
            Some(VehicleStatus::Available)
        );
    }

    #[test]
    fn completing_keeps_vehicle_in_use_while_another_trip_is_open() {
        assert_eq!(vehicle_status_after_completion(VehicleStatus::InUse, true), None);
    }

    #[test]
    fn completing_keeps_maintenance() {
        assert_eq!(vehicle_status_after_completion(VehicleStatus::Maintenance, false), None);
        assert_eq!(vehicle_status_after_completion(VehicleStatus::Available, false), None);
    }

    #[test]
    fn editing_without_status_keeps_the_current_one() {
        let status = resolve_vehicle_status(VehicleStatus::InUse, None, true).unwrap();
        assert_eq!(status, VehicleStatus::InUse);
    }

    #[test]
    fn vehicle_on_an_open_trip_cannot_be_released() {
        let result = resolve_vehicle_status(VehicleStatus::InUse, Some(VehicleStatus::Available), true);
        assert!(matches!(result, Err(AppError::VehicleUnavailable)));
    }

    #[test]
    fn explicit_status_is_applied_when_allowed() {
        let released =
            resolve_vehicle_status(VehicleStatus::InUse, Some(VehicleStatus::Available), false).unwrap();
        assert_eq!(released, VehicleStatus::Available);

        let serviced =
            resolve_vehicle_status(VehicleStatus::InUse, Some(VehicleStatus::Maintenance), true).unwrap();
        assert_eq!(serviced, VehicleStatus::Maintenance);
    }
}

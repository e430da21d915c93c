// src/db/fleet_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::fleet::{
        FleetFilter, FleetStats, FleetUsage, FleetVehicle, TripPayload, VehiclePayload,
        VehicleStatus,
    },
};

const VEHICLE_COLUMNS: &str = "id, vehicle_name, vehicle_type, registration_number, location, \
     status, last_service_date, next_service_date, created_at, updated_at";

const USAGE_COLUMNS: &str = "id, vehicle_id, driver_id, purpose, start_time, end_time, \
     start_mileage, end_mileage, fuel_used, created_at";

#[derive(Clone)]
pub struct FleetRepository {
    pool: PgPool,
}

// Placa duplicada vira 409 com a placa na mensagem
fn map_registration_conflict(e: sqlx::Error, registration: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::RegistrationAlreadyExists(registration.to_string());
        }
    }
    e.into()
}

impl FleetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Veículos
    // ---

    pub async fn list(&self, filter: &FleetFilter) -> Result<Vec<FleetVehicle>, AppError> {
        let vehicles = list_query(filter)
            .build_query_as::<FleetVehicle>()
            .fetch_all(&self.pool)
            .await?;
        Ok(vehicles)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<FleetVehicle>, AppError> {
        let sql = format!("SELECT {} FROM fleet_vehicles WHERE id = $1", VEHICLE_COLUMNS);
        let vehicle = sqlx::query_as::<_, FleetVehicle>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(vehicle)
    }

    pub async fn stats(&self) -> Result<FleetStats, AppError> {
        let stats = sqlx::query_as::<_, FleetStats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'available') AS available,
                COUNT(*) FILTER (WHERE status = 'in_use') AS in_use,
                COUNT(*) FILTER (WHERE status = 'maintenance') AS maintenance
            FROM fleet_vehicles
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        payload: &VehiclePayload,
    ) -> Result<FleetVehicle, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO fleet_vehicles (
                vehicle_name, vehicle_type, registration_number, location,
                status, last_service_date, next_service_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        );
        sqlx::query_as::<_, FleetVehicle>(&sql)
            .bind(&payload.vehicle_name)
            .bind(&payload.vehicle_type)
            .bind(&payload.registration_number)
            .bind(payload.location)
            .bind(payload.status.unwrap_or_default())
            .bind(payload.last_service_date)
            .bind(payload.next_service_date)
            .fetch_one(executor)
            .await
            .map_err(|e| map_registration_conflict(e, &payload.registration_number))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &VehiclePayload,
        status: VehicleStatus,
    ) -> Result<Option<FleetVehicle>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE fleet_vehicles
            SET vehicle_name = $2, vehicle_type = $3, registration_number = $4, location = $5,
                status = $6, last_service_date = $7, next_service_date = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        );
        sqlx::query_as::<_, FleetVehicle>(&sql)
            .bind(id)
            .bind(&payload.vehicle_name)
            .bind(&payload.vehicle_type)
            .bind(&payload.registration_number)
            .bind(payload.location)
            .bind(status)
            .bind(payload.last_service_date)
            .bind(payload.next_service_date)
            .fetch_optional(executor)
            .await
            .map_err(|e| map_registration_conflict(e, &payload.registration_number))
    }

    /// Trava o veículo até o fim da transação (evita duas viagens abertas ao mesmo tempo).
    pub async fn find_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<FleetVehicle>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {} FROM fleet_vehicles WHERE id = $1 FOR UPDATE", VEHICLE_COLUMNS);
        let vehicle = sqlx::query_as::<_, FleetVehicle>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(vehicle)
    }

    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: VehicleStatus,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE fleet_vehicles SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(executor)
            .await?;
        Ok(())
    }

    // ---
    // Viagens
    // ---

    /// Existe viagem sem término para o veículo?
    pub async fn has_open_trip<'e, E>(&self, executor: E, vehicle_id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let open = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM fleet_usage WHERE vehicle_id = $1 AND end_time IS NULL)",
        )
        .bind(vehicle_id)
        .fetch_one(executor)
        .await?;
        Ok(open)
    }

    pub async fn list_usage(&self, vehicle_id: Uuid) -> Result<Vec<FleetUsage>, AppError> {
        let sql = format!(
            "SELECT {} FROM fleet_usage WHERE vehicle_id = $1 ORDER BY start_time DESC",
            USAGE_COLUMNS
        );
        let trips = sqlx::query_as::<_, FleetUsage>(&sql)
            .bind(vehicle_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(trips)
    }

    pub async fn create_usage<'e, E>(
        &self,
        executor: E,
        driver_id: Uuid,
        payload: &TripPayload,
    ) -> Result<FleetUsage, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO fleet_usage (
                vehicle_id, driver_id, purpose, start_time, end_time,
                start_mileage, end_mileage, fuel_used
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            USAGE_COLUMNS
        );
        let trip = sqlx::query_as::<_, FleetUsage>(&sql)
            .bind(payload.vehicle_id)
            .bind(driver_id)
            .bind(&payload.purpose)
            .bind(payload.start_time)
            .bind(payload.end_time)
            .bind(payload.start_mileage)
            .bind(payload.end_mileage)
            .bind(payload.fuel_used)
            .fetch_one(executor)
            .await?;
        Ok(trip)
    }

    pub async fn find_usage_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<FleetUsage>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {} FROM fleet_usage WHERE id = $1 FOR UPDATE", USAGE_COLUMNS);
        let trip = sqlx::query_as::<_, FleetUsage>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(trip)
    }

    // Mantém os valores já gravados quando o encerramento não informa mileage/combustível
    pub async fn complete_usage<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        end_time: DateTime<Utc>,
        end_mileage: Option<Decimal>,
        fuel_used: Option<Decimal>,
    ) -> Result<FleetUsage, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE fleet_usage
            SET end_time = $2,
                end_mileage = COALESCE($3, end_mileage),
                fuel_used = COALESCE($4, fuel_used)
            WHERE id = $1
            RETURNING {}
            "#,
            USAGE_COLUMNS
        );
        let trip = sqlx::query_as::<_, FleetUsage>(&sql)
            .bind(id)
            .bind(end_time)
            .bind(end_mileage)
            .bind(fuel_used)
            .fetch_one(executor)
            .await?;
        Ok(trip)
    }
}

fn list_query(filter: &FleetFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM fleet_vehicles", VEHICLE_COLUMNS));
    if let Some(status) = filter.status {
        qb.push(" WHERE status = ").push_bind(status);
    }
    qb.push(" ORDER BY created_at DESC");
    qb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_is_optional() {
        let all = list_query(&FleetFilter::default());
        assert!(all.sql().ends_with("FROM fleet_vehicles ORDER BY created_at DESC"));

        let available = list_query(&FleetFilter { status: Some(VehicleStatus::Available) });
        assert!(available
            .sql()
            .ends_with("FROM fleet_vehicles WHERE status = $1 ORDER BY created_at DESC"));
    }
}

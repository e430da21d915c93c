// src/config.rs

use anyhow::Context;
use axum::extract::FromRef;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, sync::Arc, time::Duration};

use crate::{
    common::i18n::I18nStore,
    db::{
        DashboardRepository, DepartmentRepository, FarmerRepository, FleetRepository,
        InventoryRepository, ProfileRepository, SalesRepository,
    },
    services::{
        auth::AuthService, dashboard_service::DashboardService,
        department_service::DepartmentService, employee_service::EmployeeService,
        farmer_service::FarmerService, fleet_service::FleetService,
        inventory_service::InventoryService, sales_service::SalesService,
    },
};

const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_JWT_EXPIRATION_DAYS: i64 = 7;
const JWT_EXPIRATION_DAYS_RANGE: std::ops::RangeInclusive<i64> = 1..=365;

// Variáveis de ambiente (com .env opcional)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub database_max_connections: u32,
    pub jwt_expiration_days: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let server_addr = lookup("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS inválido: {}", raw))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let jwt_expiration_days = match lookup("JWT_EXPIRATION_DAYS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("JWT_EXPIRATION_DAYS inválido: {}", raw))?,
            None => DEFAULT_JWT_EXPIRATION_DAYS,
        };
        if !JWT_EXPIRATION_DAYS_RANGE.contains(&jwt_expiration_days) {
            anyhow::bail!(
                "JWT_EXPIRATION_DAYS deve estar entre {} e {}: {}",
                JWT_EXPIRATION_DAYS_RANGE.start(),
                JWT_EXPIRATION_DAYS_RANGE.end(),
                jwt_expiration_days
            );
        }

        Ok(Self {
            database_url,
            jwt_secret,
            server_addr,
            database_max_connections,
            jwt_expiration_days,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Config,
    pub i18n_store: Arc<I18nStore>,

    pub auth_service: AuthService,
    pub inventory_service: InventoryService,
    pub fleet_service: FleetService,
    pub sales_service: SalesService,
    pub employee_service: EmployeeService,
    pub department_service: DepartmentService,
    pub farmer_service: FarmerService,
    pub dashboard_service: DashboardService,
}

// Os guardiões de papel só precisam do catálogo de mensagens
impl FromRef<AppState> for Arc<I18nStore> {
    fn from_ref(state: &AppState) -> Self {
        state.i18n_store.clone()
    }
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Self::from_pool(config, db_pool)
    }

    /// Monta o estado sobre um pool já criado (o `new` conecta antes).
    pub fn from_pool(config: Config, db_pool: PgPool) -> anyhow::Result<Self> {
        let i18n_store = Arc::new(I18nStore::load()?);

        // --- Monta o gráfico de dependências ---
        let profile_repo = ProfileRepository::new(db_pool.clone());
        let department_repo = DepartmentRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let fleet_repo = FleetRepository::new(db_pool.clone());
        let sales_repo = SalesRepository::new(db_pool.clone());
        let farmer_repo = FarmerRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            profile_repo.clone(),
            config.jwt_secret.clone(),
            config.jwt_expiration_days,
            db_pool.clone(),
        );
        let inventory_service = InventoryService::new(inventory_repo.clone(), db_pool.clone());
        let fleet_service = FleetService::new(fleet_repo, db_pool.clone());
        let sales_service = SalesService::new(sales_repo.clone(), db_pool.clone());
        let employee_service = EmployeeService::new(profile_repo, db_pool.clone());
        let department_service = DepartmentService::new(
            department_repo,
            inventory_repo,
            sales_repo,
            farmer_repo.clone(),
        );
        let farmer_service = FarmerService::new(farmer_repo, db_pool.clone());
        let dashboard_service = DashboardService::new(dashboard_repo);

        Ok(Self {
            db_pool,
            config,
            i18n_store,
            auth_service,
            inventory_service,
            fleet_service,
            sales_service,
            employee_service,
            department_service,
            farmer_service,
            dashboard_service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn optional_settings_use_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/farm"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.server_addr, "0.0.0.0:3000");
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.jwt_expiration_days, 7);
    }

    #[test]
    fn missing_secret_fails() {
        let result = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/farm")]));
        assert!(result.is_err());
    }

    #[test]
    fn invalid_number_fails() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/farm"),
            ("JWT_SECRET", "secret"),
            ("DATABASE_MAX_CONNECTIONS", "many"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn token_lifetime_must_be_within_a_year() {
        for days in ["0", "-3", "366", "9223372036854775807"] {
            let result = Config::from_lookup(lookup_from(&[
                ("DATABASE_URL", "postgres://localhost/farm"),
                ("JWT_SECRET", "secret"),
                ("JWT_EXPIRATION_DAYS", days),
            ]));
            assert!(result.is_err(), "{} dias deveria falhar", days);
        }

        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/farm"),
            ("JWT_SECRET", "secret"),
            ("JWT_EXPIRATION_DAYS", "365"),
        ]))
        .unwrap();
        assert_eq!(config.jwt_expiration_days, 365);
    }
}

// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::{marker::PhantomData, sync::Arc};

use crate::{
    common::{
        error::{ApiError, AppError},
        i18n::I18nStore,
    },
    middleware::i18n::Locale,
    models::auth::{Profile, UserRole},
};

/// 1. O que uma rota protegida exige do papel do usuário
pub trait RoleGate: Send + Sync + 'static {
    fn allows(role: UserRole) -> bool;

    /// Para onde o painel deve mandar quem foi barrado.
    fn fallback_route() -> &'static str;
}

/// Regra pura, usada pelo extractor
pub fn check_role<G: RoleGate>(profile: &Profile) -> Result<(), AppError> {
    if G::allows(profile.role) {
        Ok(())
    } else {
        Err(AppError::Forbidden(G::fallback_route()))
    }
}

/// 2. O Extractor (Guardião)
pub struct RequireRole<G>(pub PhantomData<G>);

impl<G, S> FromRequestParts<S> for RequireRole<G>
where
    G: RoleGate,
    S: Send + Sync,
    Arc<I18nStore>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let store = Arc::<I18nStore>::from_ref(state);
        let locale = Locale::from_headers(&parts.headers);

        // O auth_guard já colocou o perfil nas extensions
        let profile = parts
            .extensions
            .get::<Profile>()
            .ok_or(AppError::InvalidToken)
            .map_err(|e| e.to_api_error(&locale, &store))?;

        check_role::<G>(profile).map_err(|e| {
            tracing::warn!(
                "Acesso negado: perfil {} ({:?}) tentou uma rota administrativa",
                profile.id,
                profile.role
            );
            e.to_api_error(&locale, &store)
        })?;

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS PORTÕES (TIPOS)
// ---

pub struct InventoryAdmin;
impl RoleGate for InventoryAdmin {
    fn allows(role: UserRole) -> bool { role.is_admin() }
    fn fallback_route() -> &'static str { "/dashboard/inventory" }
}

pub struct FleetAdmin;
impl RoleGate for FleetAdmin {
    fn allows(role: UserRole) -> bool { role.is_admin() }
    fn fallback_route() -> &'static str { "/dashboard/fleet" }
}

pub struct EmployeeAdmin;
impl RoleGate for EmployeeAdmin {
    fn allows(role: UserRole) -> bool { role.is_admin() }
    fn fallback_route() -> &'static str { "/dashboard/employees" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use uuid::Uuid;

    fn profile(role: UserRole) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            email: "someone@lensorganics.com".into(),
            full_name: "Someone".into(),
            role,
            phone: None,
            location: None,
            department: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn parts_with(profile: Option<Profile>) -> Parts {
        let (mut parts, _) = Request::builder().uri("/api/inventory").body(()).unwrap().into_parts();
        if let Some(profile) = profile {
            parts.extensions.insert(profile);
        }
        parts
    }

    fn state() -> Arc<I18nStore> {
        Arc::new(I18nStore::load().unwrap())
    }

    #[test]
    fn employees_are_denied_admin_gates() {
        let employee = profile(UserRole::Employee);
        assert!(matches!(
            check_role::<InventoryAdmin>(&employee),
            Err(AppError::Forbidden("/dashboard/inventory"))
        ));
        assert!(matches!(
            check_role::<FleetAdmin>(&employee),
            Err(AppError::Forbidden("/dashboard/fleet"))
        ));
    }

    #[test]
    fn admins_pass_every_gate() {
        for role in [UserRole::Admin, UserRole::SuperAdmin] {
            let admin = profile(role);
            assert!(check_role::<InventoryAdmin>(&admin).is_ok());
            assert!(check_role::<FleetAdmin>(&admin).is_ok());
            assert!(check_role::<EmployeeAdmin>(&admin).is_ok());
        }
    }

    #[tokio::test]
    async fn extractor_rejects_employee_with_redirect() {
        let mut parts = parts_with(Some(profile(UserRole::Employee)));

        let rejection = RequireRole::<FleetAdmin>::from_request_parts(&mut parts, &state())
            .await
            .err()
            .unwrap();

        assert_eq!(rejection.status, StatusCode::FORBIDDEN);
        assert_eq!(rejection.details.unwrap()["redirectTo"], "/dashboard/fleet");
    }

    #[tokio::test]
    async fn extractor_without_session_is_unauthorized() {
        let mut parts = parts_with(None);

        let rejection = RequireRole::<InventoryAdmin>::from_request_parts(&mut parts, &state())
            .await
            .err()
            .unwrap();

        assert_eq!(rejection.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn extractor_accepts_admin() {
        let mut parts = parts_with(Some(profile(UserRole::Admin)));

        let result = RequireRole::<InventoryAdmin>::from_request_parts(&mut parts, &state()).await;
        assert!(result.is_ok());
    }
}

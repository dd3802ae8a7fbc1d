// src/services/tenant_service.rs

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{StoreError, TenantStore},
    models::tenant::{CreateTenantInput, CreateTenantProfileInput, Tenant},
    services::{ProfileService, PlanService},
};

const TENANT_NOT_FOUND: &str = "Tenant no encontrado";
const DOMAIN_IN_USE: &str = "El dominio ya está en uso";
const SLUG_IN_USE: &str = "El slug ya está en uso";
const ALREADY_INACTIVE: &str = "El tenant ya está desactivado";

// IGV peruano, el impuesto por defecto del perfil semilla.
fn default_tax_percent() -> Decimal {
    Decimal::new(1800, 2) // 18.00
}

// El registro de tenants. Valida la referencia al plan a través del
// catálogo y orquesta la coreografía tenant + perfil semilla.
#[derive(Clone)]
pub struct TenantService {
    tenants: Arc<dyn TenantStore>,
    plans: PlanService,
    profiles: ProfileService,
}

impl TenantService {
    pub fn new(tenants: Arc<dyn TenantStore>, plans: PlanService, profiles: ProfileService) -> Self {
        Self { tenants, plans, profiles }
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Tenant, AppError> {
        self.tenants
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(TENANT_NOT_FOUND.to_string()))
    }

    // Crea el tenant junto con su perfil fiscal mínimo. Las dos filas
    // entran en una sola transacción del store: si el perfil falla
    // (p. ej. RUC duplicado), el tenant tampoco queda.
    pub async fn create(&self, input: CreateTenantInput) -> Result<Tenant, AppError> {
        if self.tenants.find_by_domain(&input.domain).await?.is_some() {
            return Err(AppError::Conflict(DOMAIN_IN_USE.to_string()));
        }
        if self.tenants.find_by_slug(&input.slug).await?.is_some() {
            return Err(AppError::Conflict(SLUG_IN_USE.to_string()));
        }

        // id o código ("FREE"); un plan inexistente corta acá con NotFound
        let plan = self.plans.find_one(&input.plan).await?;

        let now = Utc::now();
        let tenant = Tenant {
            id: Uuid::new_v4(),
            name: input.name,
            domain: input.domain,
            slug: input.slug,
            plan_id: plan.id,
            is_active: true,
            subscription_ends_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        // Perfil semilla: solo el RUC y el impuesto por defecto; el
        // cliente completa el resto después.
        let seed = CreateTenantProfileInput {
            ruc: input.ruc,
            tax_percent: default_tax_percent(),
            ..Default::default()
        };
        let profile = self.profiles.prepare(tenant.id, seed).await?;

        let (tenant, _profile) = self
            .tenants
            .insert_with_profile(tenant, profile)
            .await
            .map_err(Self::map_unique)?;

        tracing::info!(tenant = %tenant.slug, "tenant creado con su perfil semilla");
        Ok(tenant)
    }

    pub async fn deactivate(&self, id: Uuid) -> Result<Tenant, AppError> {
        let mut tenant = self.find_one(id).await?;

        if !tenant.is_active {
            return Err(AppError::Conflict(ALREADY_INACTIVE.to_string()));
        }

        tenant.is_active = false;
        tenant.updated_at = Utc::now();
        Ok(self.tenants.save(&tenant).await?)
    }

    // El índice único decide bajo concurrencia; acá solo se traduce al
    // mismo conflicto que habría reportado el pre-chequeo.
    fn map_unique(err: StoreError) -> AppError {
        if err.violates("domain") {
            AppError::Conflict(DOMAIN_IN_USE.to_string())
        } else if err.violates("slug") {
            AppError::Conflict(SLUG_IN_USE.to_string())
        } else {
            ProfileService::map_unique(err)
        }
    }
}

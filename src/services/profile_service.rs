// src/services/profile_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ProfileStore, StoreError},
    models::tenant::{
        CreateTenantProfileInput, DeleteConfirmation, ProfileWithTenant, TenantProfile,
        UpdateTenantProfileInput,
    },
    services::hours::validate_business_hours,
};

const PROFILE_NOT_FOUND: &str = "Perfil de tenant no encontrado";
const PROFILE_NOT_FOUND_FOR_TENANT: &str = "Perfil no encontrado para este tenant";
const RUC_REGISTERED: &str = "El RUC ya está registrado";
const TENANT_HAS_PROFILE: &str = "Este tenant ya tiene un perfil";
const PROFILE_REMOVED: &str = "Perfil de tenant eliminado correctamente";

const DEFAULT_TIMEZONE: &str = "America/Lima";
const DEFAULT_CURRENCY: &str = "PEN";

// Dueño del perfil fiscal/comercial del tenant y de su relación 1:1.
#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileStore>,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }

    pub async fn find_all(&self) -> Result<Vec<ProfileWithTenant>, AppError> {
        Ok(self.profiles.find_all_with_tenant().await?)
    }

    // UUID → búsqueda por id; cualquier otra cosa se trata como RUC.
    pub async fn find_one(&self, identifier: &str) -> Result<TenantProfile, AppError> {
        let profile = match Uuid::parse_str(identifier) {
            Ok(id) => self.profiles.find_by_id(id).await?,
            Err(_) => self.profiles.find_by_ruc(identifier).await?,
        };

        profile.ok_or_else(|| AppError::NotFound(PROFILE_NOT_FOUND.to_string()))
    }

    pub async fn find_by_tenant(&self, tenant_id: Uuid) -> Result<TenantProfile, AppError> {
        self.profiles
            .find_by_tenant(tenant_id)
            .await?
            .ok_or_else(|| AppError::NotFound(PROFILE_NOT_FOUND_FOR_TENANT.to_string()))
    }

    pub async fn create(
        &self,
        tenant_id: Uuid,
        input: CreateTenantProfileInput,
    ) -> Result<TenantProfile, AppError> {
        // (a) el RUC no puede estar ya registrado
        if self.profiles.find_by_ruc(&input.ruc).await?.is_some() {
            return Err(AppError::Conflict(RUC_REGISTERED.to_string()));
        }

        // (b) relación 1:1 con el tenant
        if self.profiles.find_by_tenant(tenant_id).await?.is_some() {
            return Err(AppError::Conflict(TENANT_HAS_PROFILE.to_string()));
        }

        // (c) horario comercial, solo si vienen ambos extremos
        let profile = self.build(tenant_id, input)?;

        self.profiles.insert(profile).await.map_err(Self::map_unique)
    }

    // Valida (a) y (c) y devuelve el perfil listo para insertar, sin
    // persistirlo. Lo usa TenantRegistry para sembrar el perfil dentro
    // de la misma transacción que crea el tenant.
    pub(crate) async fn prepare(
        &self,
        tenant_id: Uuid,
        input: CreateTenantProfileInput,
    ) -> Result<TenantProfile, AppError> {
        if self.profiles.find_by_ruc(&input.ruc).await?.is_some() {
            return Err(AppError::Conflict(RUC_REGISTERED.to_string()));
        }
        self.build(tenant_id, input)
    }

    fn build(
        &self,
        tenant_id: Uuid,
        input: CreateTenantProfileInput,
    ) -> Result<TenantProfile, AppError> {
        if let (Some(opening), Some(closing)) = (&input.opening_time, &input.closing_time) {
            validate_business_hours(opening, closing)?;
        }

        let now = Utc::now();
        Ok(TenantProfile {
            id: Uuid::new_v4(),
            ruc: input.ruc,
            phone: input.phone,
            email: input.email,
            address: input.address,
            logo_url: input.logo_url,
            website: input.website,
            timezone: input.timezone.unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            currency: input.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            tax_percent: input.tax_percent,
            description: input.description,
            opening_time: input.opening_time,
            closing_time: input.closing_time,
            tenant_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    pub(crate) fn map_unique(err: StoreError) -> AppError {
        if err.violates("ruc") {
            AppError::Conflict(RUC_REGISTERED.to_string())
        } else if err.violates("tenant_id") {
            AppError::Conflict(TENANT_HAS_PROFILE.to_string())
        } else {
            err.into()
        }
    }

    pub async fn update(
        &self,
        identifier: &str,
        patch: UpdateTenantProfileInput,
    ) -> Result<TenantProfile, AppError> {
        let mut profile = self.find_one(identifier).await?;

        // El horario efectivo combina el parche con lo almacenado: cambiar
        // solo el cierre se valida igual contra la apertura guardada.
        let opening = patch.opening_time.clone().or_else(|| profile.opening_time.clone());
        let closing = patch.closing_time.clone().or_else(|| profile.closing_time.clone());
        if let (Some(opening), Some(closing)) = (&opening, &closing) {
            validate_business_hours(opening, closing)?;
        }

        // El RUC no existe en el parche: no hay forma de cambiarlo.
        if let Some(phone) = patch.phone {
            profile.phone = Some(phone);
        }
        if let Some(email) = patch.email {
            profile.email = Some(email);
        }
        if let Some(address) = patch.address {
            profile.address = Some(address);
        }
        if let Some(logo_url) = patch.logo_url {
            profile.logo_url = Some(logo_url);
        }
        if let Some(website) = patch.website {
            profile.website = Some(website);
        }
        if let Some(timezone) = patch.timezone {
            profile.timezone = timezone;
        }
        if let Some(currency) = patch.currency {
            profile.currency = currency;
        }
        if let Some(tax_percent) = patch.tax_percent {
            profile.tax_percent = tax_percent;
        }
        if let Some(description) = patch.description {
            profile.description = Some(description);
        }
        if let Some(opening_time) = patch.opening_time {
            profile.opening_time = Some(opening_time);
        }
        if let Some(closing_time) = patch.closing_time {
            profile.closing_time = Some(closing_time);
        }
        profile.updated_at = Utc::now();

        Ok(self.profiles.save(&profile).await?)
    }

    pub async fn remove(&self, identifier: &str) -> Result<DeleteConfirmation, AppError> {
        let profile = self.find_one(identifier).await?;

        self.profiles.soft_remove(profile.id).await?;

        Ok(DeleteConfirmation {
            message: PROFILE_REMOVED.to_string(),
            deleted_id: profile.id,
        })
    }
}

// src/db/profile_store.rs

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{StoreError, map_sqlx};
use crate::models::tenant::{ProfileWithTenant, Tenant, TenantProfile};

#[async_trait]
pub trait ProfileStore: Send + Sync {
    // Listado con el tenant dueño embebido (solo para visualización)
    async fn find_all_with_tenant(&self) -> Result<Vec<ProfileWithTenant>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TenantProfile>, StoreError>;
    async fn find_by_ruc(&self, ruc: &str) -> Result<Option<TenantProfile>, StoreError>;
    async fn find_by_tenant(&self, tenant_id: Uuid) -> Result<Option<TenantProfile>, StoreError>;

    async fn insert(&self, profile: TenantProfile) -> Result<TenantProfile, StoreError>;
    async fn save(&self, profile: &TenantProfile) -> Result<TenantProfile, StoreError>;

    // Borrado lógico: marca la tumba, nunca elimina la fila.
    async fn soft_remove(&self, id: Uuid) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn find_all_with_tenant(&self) -> Result<Vec<ProfileWithTenant>, StoreError> {
        let profiles = sqlx::query_as::<_, TenantProfile>(
            "SELECT * FROM tenant_profile WHERE deleted_at IS NULL",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let tenant_ids: Vec<Uuid> = profiles.iter().map(|p| p.tenant_id).collect();
        let tenants = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = ANY($1)")
            .bind(&tenant_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let by_id: HashMap<Uuid, Tenant> = tenants.into_iter().map(|t| (t.id, t)).collect();

        Ok(profiles
            .into_iter()
            .filter_map(|profile| {
                by_id.get(&profile.tenant_id).cloned().map(|tenant| ProfileWithTenant {
                    profile,
                    tenant,
                })
            })
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TenantProfile>, StoreError> {
        sqlx::query_as::<_, TenantProfile>(
            "SELECT * FROM tenant_profile WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn find_by_ruc(&self, ruc: &str) -> Result<Option<TenantProfile>, StoreError> {
        sqlx::query_as::<_, TenantProfile>(
            "SELECT * FROM tenant_profile WHERE ruc = $1 AND deleted_at IS NULL",
        )
        .bind(ruc)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn find_by_tenant(&self, tenant_id: Uuid) -> Result<Option<TenantProfile>, StoreError> {
        sqlx::query_as::<_, TenantProfile>(
            "SELECT * FROM tenant_profile WHERE tenant_id = $1 AND deleted_at IS NULL",
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn insert(&self, profile: TenantProfile) -> Result<TenantProfile, StoreError> {
        sqlx::query_as::<_, TenantProfile>(
            r#"
            INSERT INTO tenant_profile (
                id, ruc, phone, email, address, logo_url, website,
                timezone, currency, tax_percent, description,
                opening_time, closing_time, tenant_id,
                created_at, updated_at, deleted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(profile.id)
        .bind(&profile.ruc)
        .bind(&profile.phone)
        .bind(&profile.email)
        .bind(&profile.address)
        .bind(&profile.logo_url)
        .bind(&profile.website)
        .bind(&profile.timezone)
        .bind(&profile.currency)
        .bind(profile.tax_percent)
        .bind(&profile.description)
        .bind(&profile.opening_time)
        .bind(&profile.closing_time)
        .bind(profile.tenant_id)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .bind(profile.deleted_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn save(&self, profile: &TenantProfile) -> Result<TenantProfile, StoreError> {
        sqlx::query_as::<_, TenantProfile>(
            r#"
            UPDATE tenant_profile SET
                phone = $2, email = $3, address = $4, logo_url = $5,
                website = $6, timezone = $7, currency = $8, tax_percent = $9,
                description = $10, opening_time = $11, closing_time = $12,
                updated_at = $13
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(profile.id)
        .bind(&profile.phone)
        .bind(&profile.email)
        .bind(&profile.address)
        .bind(&profile.logo_url)
        .bind(&profile.website)
        .bind(&profile.timezone)
        .bind(&profile.currency)
        .bind(profile.tax_percent)
        .bind(&profile.description)
        .bind(&profile.opening_time)
        .bind(&profile.closing_time)
        .bind(profile.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn soft_remove(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("UPDATE tenant_profile SET deleted_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }
}

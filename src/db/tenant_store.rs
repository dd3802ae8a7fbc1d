// src/db/tenant_store.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{StoreError, map_sqlx};
use crate::models::tenant::{Tenant, TenantProfile};

// Las búsquedas por clave natural (domain/slug) solo consideran tenants
// vivos: las tumbas no bloquean la reutilización de la clave.
#[async_trait]
pub trait TenantStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tenant>, StoreError>;
    async fn find_by_domain(&self, domain: &str) -> Result<Option<Tenant>, StoreError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>, StoreError>;

    // La única operación multi-entidad del sistema: el tenant y su perfil
    // semilla se insertan en una misma transacción. Si el perfil falla
    // (p. ej. RUC duplicado), la fila del tenant no sobrevive.
    async fn insert_with_profile(
        &self,
        tenant: Tenant,
        profile: TenantProfile,
    ) -> Result<(Tenant, TenantProfile), StoreError>;

    async fn save(&self, tenant: &Tenant) -> Result<Tenant, StoreError>;
}

#[derive(Clone)]
pub struct PgTenantStore {
    pool: PgPool,
}

impl PgTenantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const INSERT_TENANT: &str = r#"
    INSERT INTO tenants (
        id, name, domain, slug, plan_id, is_active,
        subscription_ends_at, created_at, updated_at, deleted_at
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
    RETURNING *
"#;

const INSERT_PROFILE: &str = r#"
    INSERT INTO tenant_profile (
        id, ruc, phone, email, address, logo_url, website,
        timezone, currency, tax_percent, description,
        opening_time, closing_time, tenant_id,
        created_at, updated_at, deleted_at
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
    RETURNING *
"#;

#[async_trait]
impl TenantStore for PgTenantStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tenant>, StoreError> {
        sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn find_by_domain(&self, domain: &str) -> Result<Option<Tenant>, StoreError> {
        sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants WHERE domain = $1 AND deleted_at IS NULL",
        )
        .bind(domain)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>, StoreError> {
        sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE slug = $1 AND deleted_at IS NULL")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn insert_with_profile(
        &self,
        tenant: Tenant,
        profile: TenantProfile,
    ) -> Result<(Tenant, TenantProfile), StoreError> {
        let mut tx = self.pool.begin().await?;

        let tenant = sqlx::query_as::<_, Tenant>(INSERT_TENANT)
            .bind(tenant.id)
            .bind(&tenant.name)
            .bind(&tenant.domain)
            .bind(&tenant.slug)
            .bind(tenant.plan_id)
            .bind(tenant.is_active)
            .bind(tenant.subscription_ends_at)
            .bind(tenant.created_at)
            .bind(tenant.updated_at)
            .bind(tenant.deleted_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let profile = sqlx::query_as::<_, TenantProfile>(INSERT_PROFILE)
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
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        tx.commit().await?;

        Ok((tenant, profile))
    }

    async fn save(&self, tenant: &Tenant) -> Result<Tenant, StoreError> {
        sqlx::query_as::<_, Tenant>(
            r#"
            UPDATE tenants SET
                name = $2, domain = $3, slug = $4, plan_id = $5,
                is_active = $6, subscription_ends_at = $7,
                updated_at = $8, deleted_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(tenant.id)
        .bind(&tenant.name)
        .bind(&tenant.domain)
        .bind(&tenant.slug)
        .bind(tenant.plan_id)
        .bind(tenant.is_active)
        .bind(tenant.subscription_ends_at)
        .bind(tenant.updated_at)
        .bind(tenant.deleted_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }
}

// src/db/branch_store.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{StoreError, map_sqlx};
use crate::models::branch::Branch;

#[async_trait]
pub trait BranchStore: Send + Sync {
    async fn find_all(&self, tenant_id: Uuid) -> Result<Vec<Branch>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Branch>, StoreError>;

    // Sucursales vivas y activas del tenant, para el tope del plan.
    async fn count_active(&self, tenant_id: Uuid) -> Result<i64, StoreError>;

    async fn insert(&self, branch: Branch) -> Result<Branch, StoreError>;
    async fn save(&self, branch: &Branch) -> Result<Branch, StoreError>;
    async fn soft_remove(&self, id: Uuid) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct PgBranchStore {
    pool: PgPool,
}

impl PgBranchStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BranchStore for PgBranchStore {
    async fn find_all(&self, tenant_id: Uuid) -> Result<Vec<Branch>, StoreError> {
        sqlx::query_as::<_, Branch>(
            "SELECT * FROM branches WHERE tenant_id = $1 AND deleted_at IS NULL ORDER BY created_at",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Branch>, StoreError> {
        sqlx::query_as::<_, Branch>("SELECT * FROM branches WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn count_active(&self, tenant_id: Uuid) -> Result<i64, StoreError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM branches WHERE tenant_id = $1 AND is_active = TRUE AND deleted_at IS NULL",
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(count.0)
    }

    async fn insert(&self, branch: Branch) -> Result<Branch, StoreError> {
        sqlx::query_as::<_, Branch>(
            r#"
            INSERT INTO branches (
                id, tenant_id, name, address, phone, timezone, tax_percent,
                is_active, opening_hours, printers, has_inventory,
                created_at, updated_at, deleted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(branch.id)
        .bind(branch.tenant_id)
        .bind(&branch.name)
        .bind(&branch.address)
        .bind(&branch.phone)
        .bind(&branch.timezone)
        .bind(branch.tax_percent)
        .bind(branch.is_active)
        .bind(&branch.opening_hours)
        .bind(&branch.printers)
        .bind(branch.has_inventory)
        .bind(branch.created_at)
        .bind(branch.updated_at)
        .bind(branch.deleted_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn save(&self, branch: &Branch) -> Result<Branch, StoreError> {
        sqlx::query_as::<_, Branch>(
            r#"
            UPDATE branches SET
                name = $2, address = $3, phone = $4, timezone = $5,
                tax_percent = $6, is_active = $7, opening_hours = $8,
                printers = $9, has_inventory = $10, updated_at = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(branch.id)
        .bind(&branch.name)
        .bind(&branch.address)
        .bind(&branch.phone)
        .bind(&branch.timezone)
        .bind(branch.tax_percent)
        .bind(branch.is_active)
        .bind(&branch.opening_hours)
        .bind(&branch.printers)
        .bind(branch.has_inventory)
        .bind(branch.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn soft_remove(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("UPDATE branches SET deleted_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }
}

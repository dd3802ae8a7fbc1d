// src/db/memory.rs
//
// Implementación en memoria de los stores, usada por los tests de los
// servicios. Reproduce el contrato del almacén real: los índices únicos
// se verifican dentro del candado, de forma atómica, y una violación se
// reporta con el mismo nombre de restricción que usaría Postgres.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{
    BranchStore, PlanStore, ProfileStore, StoreError, TenantStore,
};
use crate::models::{
    branch::Branch,
    plan::{Plan, PlanFilters, SortOrder},
    tenant::{ProfileWithTenant, Tenant, TenantProfile},
};

#[derive(Default)]
struct Inner {
    plans: Vec<Plan>,
    tenants: Vec<Tenant>,
    profiles: Vec<TenantProfile>,
    branches: Vec<Branch>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Conteo crudo, tumbas incluidas. Para verificar que un create
    // fallido no dejó filas parciales.
    pub fn plan_rows(&self) -> usize {
        self.inner.lock().unwrap().plans.len()
    }

    pub fn tenant_rows(&self) -> usize {
        self.inner.lock().unwrap().tenants.len()
    }

    pub fn profile_rows(&self) -> usize {
        self.inner.lock().unwrap().profiles.len()
    }
}

fn unique(constraint: &str) -> StoreError {
    StoreError::UniqueViolation {
        constraint: constraint.to_string(),
    }
}

impl Inner {
    fn check_tenant_keys(&self, tenant: &Tenant) -> Result<(), StoreError> {
        let clash = |t: &Tenant| t.id != tenant.id && t.deleted_at.is_none();
        if self.tenants.iter().any(|t| clash(t) && t.domain == tenant.domain) {
            return Err(unique("tenants_domain_key"));
        }
        if self.tenants.iter().any(|t| clash(t) && t.slug == tenant.slug) {
            return Err(unique("tenants_slug_key"));
        }
        Ok(())
    }

    fn check_profile_keys(&self, profile: &TenantProfile) -> Result<(), StoreError> {
        let clash = |p: &TenantProfile| p.id != profile.id && p.deleted_at.is_none();
        if self.profiles.iter().any(|p| clash(p) && p.ruc == profile.ruc) {
            return Err(unique("tenant_profile_ruc_key"));
        }
        if self.profiles.iter().any(|p| clash(p) && p.tenant_id == profile.tenant_id) {
            return Err(unique("tenant_profile_tenant_id_key"));
        }
        Ok(())
    }
}

#[async_trait]
impl PlanStore for MemoryStore {
    async fn find_all(&self, filters: &PlanFilters) -> Result<Vec<Plan>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut plans: Vec<Plan> = inner
            .plans
            .iter()
            .filter(|p| filters.active.is_none_or(|active| p.is_active == active))
            .cloned()
            .collect();

        // Clave primaria de orden: nombre; secundaria: precio.
        plans.sort_by(|a, b| {
            let by_name = match filters.order_name {
                Some(SortOrder::Asc) => a.name.cmp(&b.name),
                Some(SortOrder::Desc) => b.name.cmp(&a.name),
                None => std::cmp::Ordering::Equal,
            };
            by_name.then_with(|| match filters.order_price {
                Some(SortOrder::Asc) => a.price.cmp(&b.price),
                Some(SortOrder::Desc) => b.price.cmp(&a.price),
                None => std::cmp::Ordering::Equal,
            })
        });
        Ok(plans)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Plan>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.plans.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Plan>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.plans.iter().find(|p| p.code == code).cloned())
    }

    async fn insert(&self, plan: Plan) -> Result<Plan, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.plans.iter().any(|p| p.code == plan.code) {
            return Err(unique("plans_code_key"));
        }
        inner.plans.push(plan.clone());
        Ok(plan)
    }

    async fn save(&self, plan: &Plan) -> Result<Plan, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.plans.iter().any(|p| p.id != plan.id && p.code == plan.code) {
            return Err(unique("plans_code_key"));
        }
        let stored = inner
            .plans
            .iter_mut()
            .find(|p| p.id == plan.id)
            .ok_or_else(|| StoreError::Database(sqlx::Error::RowNotFound))?;
        *stored = plan.clone();
        Ok(plan.clone())
    }
}

#[async_trait]
impl TenantStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tenant>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tenants
            .iter()
            .find(|t| t.id == id && t.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_domain(&self, domain: &str) -> Result<Option<Tenant>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tenants
            .iter()
            .find(|t| t.domain == domain && t.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tenants
            .iter()
            .find(|t| t.slug == slug && t.deleted_at.is_none())
            .cloned())
    }

    async fn insert_with_profile(
        &self,
        tenant: Tenant,
        profile: TenantProfile,
    ) -> Result<(Tenant, TenantProfile), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        // Ambas verificaciones antes de tocar nada: o entran las dos
        // filas o no entra ninguna.
        inner.check_tenant_keys(&tenant)?;
        inner.check_profile_keys(&profile)?;
        inner.tenants.push(tenant.clone());
        inner.profiles.push(profile.clone());
        Ok((tenant, profile))
    }

    async fn save(&self, tenant: &Tenant) -> Result<Tenant, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check_tenant_keys(tenant)?;
        let stored = inner
            .tenants
            .iter_mut()
            .find(|t| t.id == tenant.id)
            .ok_or_else(|| StoreError::Database(sqlx::Error::RowNotFound))?;
        *stored = tenant.clone();
        Ok(tenant.clone())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_all_with_tenant(&self) -> Result<Vec<ProfileWithTenant>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .profiles
            .iter()
            .filter(|p| p.deleted_at.is_none())
            .filter_map(|p| {
                inner
                    .tenants
                    .iter()
                    .find(|t| t.id == p.tenant_id)
                    .map(|t| ProfileWithTenant {
                        profile: p.clone(),
                        tenant: t.clone(),
                    })
            })
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TenantProfile>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .profiles
            .iter()
            .find(|p| p.id == id && p.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_ruc(&self, ruc: &str) -> Result<Option<TenantProfile>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .profiles
            .iter()
            .find(|p| p.ruc == ruc && p.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_tenant(&self, tenant_id: Uuid) -> Result<Option<TenantProfile>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .profiles
            .iter()
            .find(|p| p.tenant_id == tenant_id && p.deleted_at.is_none())
            .cloned())
    }

    async fn insert(&self, profile: TenantProfile) -> Result<TenantProfile, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check_profile_keys(&profile)?;
        inner.profiles.push(profile.clone());
        Ok(profile)
    }

    async fn save(&self, profile: &TenantProfile) -> Result<TenantProfile, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check_profile_keys(profile)?;
        let stored = inner
            .profiles
            .iter_mut()
            .find(|p| p.id == profile.id)
            .ok_or_else(|| StoreError::Database(sqlx::Error::RowNotFound))?;
        *stored = profile.clone();
        Ok(profile.clone())
    }

    async fn soft_remove(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(profile) = inner.profiles.iter_mut().find(|p| p.id == id) {
            profile.deleted_at = Some(Utc::now());
        }
        Ok(())
    }
}

#[async_trait]
impl BranchStore for MemoryStore {
    async fn find_all(&self, tenant_id: Uuid) -> Result<Vec<Branch>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .branches
            .iter()
            .filter(|b| b.tenant_id == tenant_id && b.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Branch>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .branches
            .iter()
            .find(|b| b.id == id && b.deleted_at.is_none())
            .cloned())
    }

    async fn count_active(&self, tenant_id: Uuid) -> Result<i64, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .branches
            .iter()
            .filter(|b| b.tenant_id == tenant_id && b.is_active && b.deleted_at.is_none())
            .count() as i64)
    }

    async fn insert(&self, branch: Branch) -> Result<Branch, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.branches.push(branch.clone());
        Ok(branch)
    }

    async fn save(&self, branch: &Branch) -> Result<Branch, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let stored = inner
            .branches
            .iter_mut()
            .find(|b| b.id == branch.id)
            .ok_or_else(|| StoreError::Database(sqlx::Error::RowNotFound))?;
        *stored = branch.clone();
        Ok(branch.clone())
    }

    async fn soft_remove(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(branch) = inner.branches.iter_mut().find(|b| b.id == id) {
            branch.deleted_at = Some(Utc::now());
        }
        Ok(())
    }
}

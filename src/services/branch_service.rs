// src/services/branch_service.rs

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::BranchStore,
    models::{
        branch::{Branch, CreateBranchInput, OpeningHour, UpdateBranchInput},
        tenant::DeleteConfirmation,
    },
    services::{PlanService, TenantService, hours::validate_business_hours},
};

const BRANCH_NOT_FOUND: &str = "Sucursal no encontrada";
const BRANCH_LIMIT_REACHED: &str = "El plan actual no permite registrar más sucursales";
const BRANCH_REMOVED: &str = "Sucursal eliminada correctamente";

const DEFAULT_TIMEZONE: &str = "America/Lima";

// Sucursales físicas de un tenant. Toda operación está acotada al tenant
// dueño; la cantidad de sucursales activas la acota el plan.
#[derive(Clone)]
pub struct BranchService {
    branches: Arc<dyn BranchStore>,
    tenants: TenantService,
    plans: PlanService,
}

impl BranchService {
    pub fn new(branches: Arc<dyn BranchStore>, tenants: TenantService, plans: PlanService) -> Self {
        Self { branches, tenants, plans }
    }

    pub async fn find_all(&self, tenant_id: Uuid) -> Result<Vec<Branch>, AppError> {
        let tenant = self.tenants.find_one(tenant_id).await?;
        Ok(self.branches.find_all(tenant.id).await?)
    }

    pub async fn create(&self, tenant_id: Uuid, input: CreateBranchInput) -> Result<Branch, AppError> {
        let tenant = self.tenants.find_one(tenant_id).await?;

        // El tope viene del plan del tenant: contar las sucursales activas
        // antes de aceptar una nueva.
        let plan = self.plans.find_one(&tenant.plan_id.to_string()).await?;
        let active = self.branches.count_active(tenant.id).await?;
        if active >= i64::from(plan.max_branches) {
            return Err(AppError::Conflict(BRANCH_LIMIT_REACHED.to_string()));
        }

        if let Some(entries) = &input.opening_hours {
            validate_opening_hours(entries)?;
        }

        let now = Utc::now();
        let branch = Branch {
            id: Uuid::new_v4(),
            tenant_id: tenant.id,
            name: input.name,
            address: input.address,
            phone: input.phone,
            timezone: input.timezone.unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            tax_percent: input.tax_percent.unwrap_or_else(|| Decimal::new(1800, 2)),
            is_active: true,
            opening_hours: input.opening_hours.map(Json),
            printers: input.printers.map(Json),
            has_inventory: input.has_inventory.unwrap_or(true),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        Ok(self.branches.insert(branch).await?)
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        branch_id: Uuid,
        patch: UpdateBranchInput,
    ) -> Result<Branch, AppError> {
        let mut branch = self.find_scoped(tenant_id, branch_id).await?;

        if let Some(entries) = &patch.opening_hours {
            validate_opening_hours(entries)?;
        }

        if let Some(name) = patch.name {
            branch.name = name;
        }
        if let Some(address) = patch.address {
            branch.address = Some(address);
        }
        if let Some(phone) = patch.phone {
            branch.phone = Some(phone);
        }
        if let Some(timezone) = patch.timezone {
            branch.timezone = timezone;
        }
        if let Some(tax_percent) = patch.tax_percent {
            branch.tax_percent = tax_percent;
        }
        if let Some(opening_hours) = patch.opening_hours {
            branch.opening_hours = Some(Json(opening_hours));
        }
        if let Some(printers) = patch.printers {
            branch.printers = Some(Json(printers));
        }
        if let Some(has_inventory) = patch.has_inventory {
            branch.has_inventory = has_inventory;
        }
        if let Some(is_active) = patch.is_active {
            branch.is_active = is_active;
        }
        branch.updated_at = Utc::now();

        Ok(self.branches.save(&branch).await?)
    }

    pub async fn remove(&self, tenant_id: Uuid, branch_id: Uuid) -> Result<DeleteConfirmation, AppError> {
        let branch = self.find_scoped(tenant_id, branch_id).await?;

        self.branches.soft_remove(branch.id).await?;

        Ok(DeleteConfirmation {
            message: BRANCH_REMOVED.to_string(),
            deleted_id: branch.id,
        })
    }

    // Una sucursal de otro tenant es, para este tenant, inexistente.
    async fn find_scoped(&self, tenant_id: Uuid, branch_id: Uuid) -> Result<Branch, AppError> {
        let tenant = self.tenants.find_one(tenant_id).await?;

        self.branches
            .find_by_id(branch_id)
            .await?
            .filter(|b| b.tenant_id == tenant.id)
            .ok_or_else(|| AppError::NotFound(BRANCH_NOT_FOUND.to_string()))
    }
}

// Cada franja del horario semanal pasa por el mismo validador que el
// horario del perfil.
fn validate_opening_hours(entries: &[OpeningHour]) -> Result<(), AppError> {
    for entry in entries {
        validate_business_hours(&entry.open, &entry.close)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use crate::models::plan::CreatePlanInput;
    use crate::models::tenant::CreateTenantInput;
    use crate::services::ProfileService;

    struct Fixture {
        branches: BranchService,
        tenant_id: Uuid,
    }

    async fn fixture(max_branches: i32) -> Fixture {
        let store = MemoryStore::new();
        let plans = PlanService::new(Arc::new(store.clone()));
        let profiles = ProfileService::new(Arc::new(store.clone()));
        let tenants = TenantService::new(Arc::new(store.clone()), plans.clone(), profiles);
        let branches = BranchService::new(Arc::new(store.clone()), tenants.clone(), plans.clone());

        plans
            .create(CreatePlanInput {
                code: "FREE".to_string(),
                name: "Plan Gratuito".to_string(),
                price: Decimal::ZERO,
                max_branches,
                max_users: 3,
                has_inventory: None,
                has_whatsapp: None,
                has_kitchen_screen: None,
                max_invoices_per_month: None,
                max_receipts_per_month: None,
            })
            .await
            .unwrap();

        let tenant = tenants
            .create(CreateTenantInput {
                name: "Cevichería El Puerto".to_string(),
                domain: "elpuerto.pe".to_string(),
                slug: "el-puerto".to_string(),
                plan: "FREE".to_string(),
                ruc: "20123456789".to_string(),
            })
            .await
            .unwrap();

        Fixture { branches, tenant_id: tenant.id }
    }

    fn branch_input(name: &str) -> CreateBranchInput {
        CreateBranchInput {
            name: name.to_string(),
            address: None,
            phone: None,
            timezone: None,
            tax_percent: None,
            opening_hours: None,
            printers: None,
            has_inventory: None,
        }
    }

    #[tokio::test]
    async fn create_aplica_defaults_de_sucursal() {
        let f = fixture(2).await;
        let branch = f
            .branches
            .create(f.tenant_id, branch_input("Sucursal Centro"))
            .await
            .unwrap();

        assert!(branch.is_active);
        assert!(branch.has_inventory);
        assert_eq!(branch.timezone, "America/Lima");
        assert_eq!(branch.tax_percent, Decimal::new(1800, 2));
    }

    #[tokio::test]
    async fn el_plan_acota_las_sucursales_activas() {
        let f = fixture(1).await;
        f.branches
            .create(f.tenant_id, branch_input("Sucursal Centro"))
            .await
            .unwrap();

        let err = f
            .branches
            .create(f.tenant_id, branch_input("Sucursal Norte"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(msg) if msg == BRANCH_LIMIT_REACHED));
    }

    #[tokio::test]
    async fn una_sucursal_eliminada_libera_el_cupo() {
        let f = fixture(1).await;
        let branch = f
            .branches
            .create(f.tenant_id, branch_input("Sucursal Centro"))
            .await
            .unwrap();

        let confirmation = f.branches.remove(f.tenant_id, branch.id).await.unwrap();
        assert_eq!(confirmation.deleted_id, branch.id);

        // La tumba no cuenta contra el tope del plan.
        f.branches
            .create(f.tenant_id, branch_input("Sucursal Norte"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn create_valida_el_horario_semanal() {
        let f = fixture(2).await;
        let mut input = branch_input("Sucursal Centro");
        input.opening_hours = Some(vec![OpeningHour {
            day: "monday".to_string(),
            open: "22:00".to_string(),
            close: "08:00".to_string(),
        }]);

        let err = f.branches.create(f.tenant_id, input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_esta_acotado_al_tenant_dueno() {
        let f = fixture(2).await;
        let branch = f
            .branches
            .create(f.tenant_id, branch_input("Sucursal Centro"))
            .await
            .unwrap();

        let err = f
            .branches
            .update(Uuid::new_v4(), branch.id, UpdateBranchInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let patch = UpdateBranchInput {
            name: Some("Sucursal Centro Histórico".to_string()),
            ..Default::default()
        };
        let updated = f.branches.update(f.tenant_id, branch.id, patch).await.unwrap();
        assert_eq!(updated.name, "Sucursal Centro Histórico");
    }

    #[tokio::test]
    async fn find_all_exige_un_tenant_existente() {
        let f = fixture(1).await;
        let err = f.branches.find_all(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Tenant no encontrado"));
    }
}

// src/services/plan_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{PlanStore, StoreError},
    models::plan::{CreatePlanInput, Plan, PlanFilters, UpdatePlanInput},
};

const PLAN_NOT_FOUND: &str = "Plan no encontrado";
const CODE_EXISTS: &str = "El código del plan ya existe.";
const CODE_IN_USE: &str = "El código del plan ya esta en uso";
const ALREADY_INACTIVE: &str = "El plan ya está desactivado";

// El catálogo de planes de suscripción. Hoja del grafo de servicios:
// no depende de nadie, y TenantRegistry y BranchManager dependen de él.
#[derive(Clone)]
pub struct PlanService {
    plans: Arc<dyn PlanStore>,
}

impl PlanService {
    pub fn new(plans: Arc<dyn PlanStore>) -> Self {
        Self { plans }
    }

    pub async fn find_all(&self, filters: &PlanFilters) -> Result<Vec<Plan>, AppError> {
        Ok(self.plans.find_all(filters).await?)
    }

    // Búsqueda dual: si el identificador tiene forma de UUID busca por id,
    // si no, por código ("FREE", "PRO", ...). La clasificación se hace acá,
    // una sola vez, y no repartida por los llamadores.
    pub async fn find_one(&self, identifier: &str) -> Result<Plan, AppError> {
        let plan = match Uuid::parse_str(identifier) {
            Ok(id) => self.plans.find_by_id(id).await?,
            Err(_) => self.plans.find_by_code(identifier).await?,
        };

        plan.ok_or_else(|| AppError::NotFound(PLAN_NOT_FOUND.to_string()))
    }

    pub async fn create(&self, input: CreatePlanInput) -> Result<Plan, AppError> {
        // Camino rápido; el índice único de `code` es el respaldo real.
        if self.plans.find_by_code(&input.code).await?.is_some() {
            return Err(AppError::Conflict(CODE_EXISTS.to_string()));
        }

        let plan = Plan {
            id: Uuid::new_v4(),
            code: input.code,
            name: input.name,
            price: input.price,
            max_branches: input.max_branches,
            max_users: input.max_users,
            has_inventory: input.has_inventory.unwrap_or(false),
            has_whatsapp: input.has_whatsapp.unwrap_or(false),
            has_kitchen_screen: input.has_kitchen_screen.unwrap_or(false),
            is_active: true,
            max_invoices_per_month: input.max_invoices_per_month.unwrap_or(20),
            max_receipts_per_month: input.max_receipts_per_month.unwrap_or(50),
        };

        self.plans.insert(plan).await.map_err(|e| match e {
            StoreError::UniqueViolation { .. } => AppError::Conflict(CODE_EXISTS.to_string()),
            other => other.into(),
        })
    }

    pub async fn update(&self, identifier: &str, patch: UpdatePlanInput) -> Result<Plan, AppError> {
        let mut plan = self.find_one(identifier).await?;

        // Cambiar el código re-chequea unicidad contra el resto del catálogo.
        if let Some(code) = &patch.code {
            if code != &plan.code && self.plans.find_by_code(code).await?.is_some() {
                return Err(AppError::Conflict(CODE_IN_USE.to_string()));
            }
        }

        if let Some(code) = patch.code {
            plan.code = code;
        }
        if let Some(name) = patch.name {
            plan.name = name;
        }
        if let Some(price) = patch.price {
            plan.price = price;
        }
        if let Some(max_branches) = patch.max_branches {
            plan.max_branches = max_branches;
        }
        if let Some(max_users) = patch.max_users {
            plan.max_users = max_users;
        }
        if let Some(has_inventory) = patch.has_inventory {
            plan.has_inventory = has_inventory;
        }
        if let Some(has_whatsapp) = patch.has_whatsapp {
            plan.has_whatsapp = has_whatsapp;
        }
        if let Some(has_kitchen_screen) = patch.has_kitchen_screen {
            plan.has_kitchen_screen = has_kitchen_screen;
        }
        if let Some(max_invoices) = patch.max_invoices_per_month {
            plan.max_invoices_per_month = max_invoices;
        }
        if let Some(max_receipts) = patch.max_receipts_per_month {
            plan.max_receipts_per_month = max_receipts;
        }

        self.plans.save(&plan).await.map_err(|e| match e {
            StoreError::UniqueViolation { .. } => AppError::Conflict(CODE_IN_USE.to_string()),
            other => other.into(),
        })
    }

    // La única vía de baja de un plan. No hay borrado físico.
    pub async fn deactivate(&self, identifier: &str) -> Result<Plan, AppError> {
        let mut plan = self.find_one(identifier).await?;

        if !plan.is_active {
            return Err(AppError::Conflict(ALREADY_INACTIVE.to_string()));
        }

        plan.is_active = false;
        Ok(self.plans.save(&plan).await?)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::db::memory::MemoryStore;
    use crate::models::plan::SortOrder;

    fn service() -> (PlanService, MemoryStore) {
        let store = MemoryStore::new();
        (PlanService::new(Arc::new(store.clone())), store)
    }

    fn free_plan() -> CreatePlanInput {
        CreatePlanInput {
            code: "FREE".to_string(),
            name: "Plan Gratuito".to_string(),
            price: Decimal::ZERO,
            max_branches: 1,
            max_users: 3,
            has_inventory: None,
            has_whatsapp: None,
            has_kitchen_screen: None,
            max_invoices_per_month: None,
            max_receipts_per_month: None,
        }
    }

    fn priced(code: &str, name: &str, price: Decimal) -> CreatePlanInput {
        CreatePlanInput {
            code: code.to_string(),
            name: name.to_string(),
            price,
            ..free_plan()
        }
    }

    #[tokio::test]
    async fn create_aplica_los_defaults_del_plan() {
        let (service, _) = service();
        let plan = service.create(free_plan()).await.unwrap();

        assert!(plan.is_active);
        assert!(!plan.has_inventory);
        assert!(!plan.has_whatsapp);
        assert!(!plan.has_kitchen_screen);
        assert_eq!(plan.max_invoices_per_month, 20);
        assert_eq!(plan.max_receipts_per_month, 50);
    }

    #[tokio::test]
    async fn create_con_codigo_repetido_falla_sin_insertar() {
        let (service, store) = service();
        service.create(free_plan()).await.unwrap();

        let err = service.create(free_plan()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(msg) if msg == CODE_EXISTS));
        assert_eq!(store.plan_rows(), 1);
    }

    #[tokio::test]
    async fn find_one_acepta_id_o_codigo() {
        let (service, _) = service();
        let plan = service.create(free_plan()).await.unwrap();

        assert_eq!(service.find_one("FREE").await.unwrap().id, plan.id);
        assert_eq!(service.find_one(&plan.id.to_string()).await.unwrap().id, plan.id);

        let err = service.find_one("ENTERPRISE").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == PLAN_NOT_FOUND));
    }

    #[tokio::test]
    async fn update_rechaza_un_codigo_ajeno() {
        let (service, _) = service();
        service.create(free_plan()).await.unwrap();
        let pro = service
            .create(priced("PRO", "Plan Pro", Decimal::new(4999, 2)))
            .await
            .unwrap();

        let patch = UpdatePlanInput {
            code: Some("FREE".to_string()),
            ..Default::default()
        };
        let err = service.update(&pro.id.to_string(), patch).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(msg) if msg == CODE_IN_USE));

        // Reafirmar el propio código no es conflicto.
        let patch = UpdatePlanInput {
            code: Some("PRO".to_string()),
            name: Some("Plan Pro Anual".to_string()),
            ..Default::default()
        };
        let updated = service.update(&pro.id.to_string(), patch).await.unwrap();
        assert_eq!(updated.name, "Plan Pro Anual");
    }

    #[tokio::test]
    async fn deactivate_dos_veces_es_conflicto() {
        let (service, _) = service();
        let plan = service.create(free_plan()).await.unwrap();

        let deactivated = service.deactivate(&plan.id.to_string()).await.unwrap();
        assert!(!deactivated.is_active);

        let err = service.deactivate(&plan.id.to_string()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(msg) if msg == ALREADY_INACTIVE));

        // El registro no cambió con el segundo intento.
        let plan = service.find_one("FREE").await.unwrap();
        assert!(!plan.is_active);
    }

    #[tokio::test]
    async fn find_all_filtra_y_ordena() {
        let (service, _) = service();
        service.create(free_plan()).await.unwrap();
        service
            .create(priced("PRO", "Plan Pro", Decimal::new(4999, 2)))
            .await
            .unwrap();
        let enterprise = service
            .create(priced("ENTERPRISE", "Plan Empresa", Decimal::new(9999, 2)))
            .await
            .unwrap();
        service.deactivate(&enterprise.id.to_string()).await.unwrap();

        let all = service.find_all(&PlanFilters::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let active = service
            .find_all(&PlanFilters {
                active: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(active.len(), 2);

        let by_price = service
            .find_all(&PlanFilters {
                order_price: Some(SortOrder::Desc),
                ..Default::default()
            })
            .await
            .unwrap();
        let codes: Vec<&str> = by_price.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, ["ENTERPRISE", "PRO", "FREE"]);
    }
}

// src/db/plan_store.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{StoreError, map_sqlx};
use crate::models::plan::{Plan, PlanFilters, SortOrder};

// La capacidad genérica de repositorio para planes. Todas las búsquedas
// trabajan sobre la tabla completa: los planes no tienen borrado lógico.
#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn find_all(&self, filters: &PlanFilters) -> Result<Vec<Plan>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Plan>, StoreError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Plan>, StoreError>;
    async fn insert(&self, plan: Plan) -> Result<Plan, StoreError>;
    async fn save(&self, plan: &Plan) -> Result<Plan, StoreError>;
}

#[derive(Clone)]
pub struct PgPlanStore {
    pool: PgPool,
}

impl PgPlanStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn order_sql(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    }
}

#[async_trait]
impl PlanStore for PgPlanStore {
    async fn find_all(&self, filters: &PlanFilters) -> Result<Vec<Plan>, StoreError> {
        // El SQL se arma dinámicamente, pero solo a partir de valores
        // propios (nombres de columna y ASC/DESC); `active` va como bind.
        let mut sql = String::from("SELECT * FROM plans");
        if filters.active.is_some() {
            sql.push_str(" WHERE is_active = $1");
        }

        let mut order = Vec::new();
        if let Some(o) = filters.order_name {
            order.push(format!("name {}", order_sql(o)));
        }
        if let Some(o) = filters.order_price {
            order.push(format!("price {}", order_sql(o)));
        }
        if !order.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&order.join(", "));
        }

        let query = sqlx::query_as::<_, Plan>(&sql);
        let plans = match filters.active {
            Some(active) => query.bind(active).fetch_all(&self.pool).await,
            None => query.fetch_all(&self.pool).await,
        };
        plans.map_err(map_sqlx)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Plan>, StoreError> {
        sqlx::query_as::<_, Plan>("SELECT * FROM plans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Plan>, StoreError> {
        sqlx::query_as::<_, Plan>("SELECT * FROM plans WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn insert(&self, plan: Plan) -> Result<Plan, StoreError> {
        sqlx::query_as::<_, Plan>(
            r#"
            INSERT INTO plans (
                id, code, name, price, max_branches, max_users,
                has_inventory, has_whatsapp, has_kitchen_screen, is_active,
                max_invoices_per_month, max_receipts_per_month
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(plan.id)
        .bind(&plan.code)
        .bind(&plan.name)
        .bind(plan.price)
        .bind(plan.max_branches)
        .bind(plan.max_users)
        .bind(plan.has_inventory)
        .bind(plan.has_whatsapp)
        .bind(plan.has_kitchen_screen)
        .bind(plan.is_active)
        .bind(plan.max_invoices_per_month)
        .bind(plan.max_receipts_per_month)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn save(&self, plan: &Plan) -> Result<Plan, StoreError> {
        sqlx::query_as::<_, Plan>(
            r#"
            UPDATE plans SET
                code = $2, name = $3, price = $4, max_branches = $5,
                max_users = $6, has_inventory = $7, has_whatsapp = $8,
                has_kitchen_screen = $9, is_active = $10,
                max_invoices_per_month = $11, max_receipts_per_month = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(plan.id)
        .bind(&plan.code)
        .bind(&plan.name)
        .bind(plan.price)
        .bind(plan.max_branches)
        .bind(plan.max_users)
        .bind(plan.has_inventory)
        .bind(plan.has_whatsapp)
        .bind(plan.has_kitchen_screen)
        .bind(plan.is_active)
        .bind(plan.max_invoices_per_month)
        .bind(plan.max_receipts_per_month)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }
}

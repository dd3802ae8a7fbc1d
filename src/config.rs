// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    db::{PgBranchStore, PgPlanStore, PgProfileStore, PgTenantStore},
    services::{BranchService, PlanService, ProfileService, TenantService},
};

// El estado compartido de la aplicación: la pool y el grafo de servicios.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub plan_service: PlanService,
    pub tenant_service: TenantService,
    pub profile_service: ProfileService,
    pub branch_service: BranchService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL debe estar definida");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexión con la base de datos establecida con éxito!");

        // --- Arma el grafo de dependencias ---
        // PlanCatalog es hoja; TenantRegistry depende de él y de
        // ProfileManager; BranchManager depende de ambos.
        let plan_service = PlanService::new(Arc::new(PgPlanStore::new(db_pool.clone())));
        let profile_service = ProfileService::new(Arc::new(PgProfileStore::new(db_pool.clone())));
        let tenant_service = TenantService::new(
            Arc::new(PgTenantStore::new(db_pool.clone())),
            plan_service.clone(),
            profile_service.clone(),
        );
        let branch_service = BranchService::new(
            Arc::new(PgBranchStore::new(db_pool.clone())),
            tenant_service.clone(),
            plan_service.clone(),
        );

        Ok(Self {
            db_pool,
            plan_service,
            tenant_service,
            profile_service,
            branch_service,
        })
    }
}

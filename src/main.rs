// src/main.rs

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;

mod common;
mod config;
mod db;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // Si la configuración falla, la aplicación no debe arrancar.
    let app_state = AppState::new()
        .await
        .expect("Falla al inicializar el estado de la aplicación.");

    let plan_routes = Router::new()
        .route(
            "/",
            get(handlers::plans::find_all).post(handlers::plans::create),
        )
        .route(
            "/{id}",
            get(handlers::plans::find_one)
                .patch(handlers::plans::update)
                .delete(handlers::plans::deactivate),
        );

    let tenant_routes = Router::new()
        .route("/", post(handlers::tenants::create))
        .route(
            "/{id}",
            get(handlers::tenants::find_one).delete(handlers::tenants::deactivate),
        )
        .route(
            "/{id}/branches",
            get(handlers::branches::find_all).post(handlers::branches::create),
        )
        .route(
            "/{id}/branches/{branch_id}",
            axum::routing::patch(handlers::branches::update).delete(handlers::branches::remove),
        );

    let profile_routes = Router::new()
        .route("/", get(handlers::profiles::find_all))
        .route(
            "/{id}",
            get(handlers::profiles::find_one)
                .patch(handlers::profiles::update)
                .delete(handlers::profiles::remove),
        )
        .route(
            "/tenant/{tenant_id}",
            get(handlers::profiles::find_by_tenant).post(handlers::profiles::create),
        );

    let app = Router::new()
        .nest("/plans", plan_routes)
        .nest("/tenants", tenant_routes)
        .nest("/tenant-profile", profile_routes)
        .with_state(app_state);

    let listener = TcpListener::bind("0.0.0.0:3000")
        .await
        .expect("No se pudo abrir el puerto 3000.");

    tracing::info!("🚀 Servidor escuchando en http://0.0.0.0:3000");

    axum::serve(listener, app)
        .await
        .expect("Falla fatal del servidor.");
}

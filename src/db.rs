pub mod branch_store;
pub mod plan_store;
pub mod profile_store;
pub mod tenant_store;

pub use branch_store::{BranchStore, PgBranchStore};
pub use plan_store::{PgPlanStore, PlanStore};
pub use profile_store::{PgProfileStore, ProfileStore};
pub use tenant_store::{PgTenantStore, TenantStore};

#[cfg(test)]
pub mod memory;

use thiserror::Error;

use crate::common::error::AppError;

// Falla de la capa de almacenamiento. La violación de índice único se
// distingue del resto porque el servicio dueño debe re-reportarla como el
// mismo Conflict que su pre-chequeo habría producido: el índice es el
// respaldo autoritativo bajo concurrencia, el pre-chequeo es solo el
// camino rápido con mejor mensaje.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("violación de restricción única ({constraint})")]
    UniqueViolation { constraint: String },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    // ¿La violación corresponde a esta clave? Se compara contra el nombre
    // de la restricción (p. ej. "tenants_slug_key" contiene "slug").
    pub fn violates(&self, key: &str) -> bool {
        matches!(self, StoreError::UniqueViolation { constraint } if constraint.contains(key))
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            // Un servicio que llegó aquí no interceptó la restricción con un
            // mensaje propio; se reporta como conflicto genérico igualmente.
            StoreError::UniqueViolation { .. } => {
                AppError::Conflict("El registro ya existe.".to_string())
            }
            StoreError::Database(e) => AppError::Database(e),
        }
    }
}

// Traduce los errores de sqlx preservando el nombre de la restricción.
pub(crate) fn map_sqlx(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return StoreError::UniqueViolation {
                constraint: db_err.constraint().unwrap_or_default().to_string(),
            };
        }
    }
    StoreError::Database(err)
}

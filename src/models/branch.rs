// src/models/branch.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;
use validator::Validate;

use super::{validate_tax_percent, validate_time_format};

// Una franja del horario semanal de la sucursal.
// Ej: { "day": "monday", "open": "09:00", "close": "23:00" }
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningHour {
    pub day: String,
    pub open: String,
    pub close: String,
}

// Asignación de impresoras lógicas.
// Ej: { "kitchen": "EPSON-KITCHEN-01", "cashier": "EPSON-CAJA-01" }
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Printers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kitchen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cashier: Option<String>,
}

// ---
// Branch (la sucursal física, N:1 con Tenant)
// ---
// La cantidad de sucursales activas de un tenant está acotada por el
// `max_branches` de su plan.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,

    pub address: Option<String>,
    pub phone: Option<String>,

    pub timezone: String,
    pub tax_percent: Decimal,

    pub is_active: bool,

    // Columnas JSON en la base
    pub opening_hours: Option<Json<Vec<OpeningHour>>>,
    pub printers: Option<Json<Printers>>,

    pub has_inventory: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchInput {
    #[validate(length(min = 1, max = 120, message = "El nombre de la sucursal es obligatorio."))]
    pub name: String,

    pub address: Option<String>,
    pub phone: Option<String>,
    pub timezone: Option<String>,

    #[validate(custom(function = "validate_tax_percent"))]
    pub tax_percent: Option<Decimal>,

    pub opening_hours: Option<Vec<OpeningHour>>,
    pub printers: Option<Printers>,
    pub has_inventory: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBranchInput {
    #[validate(length(min = 1, max = 120, message = "El nombre de la sucursal es obligatorio."))]
    pub name: Option<String>,

    pub address: Option<String>,
    pub phone: Option<String>,
    pub timezone: Option<String>,

    #[validate(custom(function = "validate_tax_percent"))]
    pub tax_percent: Option<Decimal>,

    pub opening_hours: Option<Vec<OpeningHour>>,
    pub printers: Option<Printers>,
    pub has_inventory: Option<bool>,
    pub is_active: Option<bool>,
}

// El formato de cada franja se valida campo a campo en el adaptador;
// el orden apertura/cierre lo valida el servicio.
impl OpeningHour {
    pub fn validate_format(&self) -> Result<(), validator::ValidationError> {
        validate_time_format(&self.open)?;
        validate_time_format(&self.close)?;
        Ok(())
    }
}

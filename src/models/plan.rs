// src/models/plan.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::validate_non_negative;

// ---
// Plan (el nivel de suscripción)
// ---
// Acota el uso de un tenant: sucursales, usuarios, flags de capacidades
// y topes mensuales de documentos. Nunca se borra físicamente; la única
// vía de baja es `is_active = false`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: Uuid,

    // FREE - PRO - ENTERPRISE
    pub code: String,

    pub name: String,

    // 0 - 999999.99
    pub price: Decimal,

    pub max_branches: i32,
    pub max_users: i32,

    pub has_inventory: bool,
    pub has_whatsapp: bool,
    pub has_kitchen_screen: bool,

    pub is_active: bool,

    // Facturas y boletas máximas por mes
    pub max_invoices_per_month: i32,
    pub max_receipts_per_month: i32,
}

// Orden pedido por el cliente: ?orderName=DESC&orderPrice=ASC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

// Filtros de listado. Omitir `active` devuelve todos los planes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanFilters {
    pub active: Option<bool>,
    pub order_name: Option<SortOrder>,
    pub order_price: Option<SortOrder>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanInput {
    #[validate(length(min = 2, max = 50, message = "El código debe tener entre 2 y 50 caracteres."))]
    pub code: String,

    #[validate(length(min = 2, max = 120, message = "El nombre debe tener entre 2 y 120 caracteres."))]
    pub name: String,

    #[validate(custom(function = "validate_non_negative"))]
    pub price: Decimal,

    #[validate(range(min = 1, message = "Debe permitir al menos una sucursal."))]
    pub max_branches: i32,

    #[validate(range(min = 1, message = "Debe permitir al menos un usuario."))]
    pub max_users: i32,

    pub has_inventory: Option<bool>,
    pub has_whatsapp: Option<bool>,
    pub has_kitchen_screen: Option<bool>,

    pub max_invoices_per_month: Option<i32>,
    pub max_receipts_per_month: Option<i32>,
}

// Versión parcial de CreatePlanInput. El parche se aplica sobre el
// registro existente; los campos ausentes no cambian.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanInput {
    #[validate(length(min = 2, max = 50, message = "El código debe tener entre 2 y 50 caracteres."))]
    pub code: Option<String>,

    #[validate(length(min = 2, max = 120, message = "El nombre debe tener entre 2 y 120 caracteres."))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_non_negative"))]
    pub price: Option<Decimal>,

    #[validate(range(min = 1, message = "Debe permitir al menos una sucursal."))]
    pub max_branches: Option<i32>,

    #[validate(range(min = 1, message = "Debe permitir al menos un usuario."))]
    pub max_users: Option<i32>,

    pub has_inventory: Option<bool>,
    pub has_whatsapp: Option<bool>,
    pub has_kitchen_screen: Option<bool>,

    pub max_invoices_per_month: Option<i32>,
    pub max_receipts_per_month: Option<i32>,
}

// src/models/tenant.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{validate_ruc, validate_tax_percent, validate_time_format};

// ---
// 1. Tenant (el negocio suscrito)
// ---
// `domain` y `slug` son únicos globales y no tienen ruta de actualización:
// quedan fijos desde la creación. `is_active` y `deleted_at` son dos ejes
// independientes: baja comercial vs. tumba de auditoría.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub domain: String,
    pub slug: String,
    pub plan_id: Uuid,
    pub is_active: bool,

    // Fecha de vencimiento de la suscripción
    pub subscription_ends_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

// ---
// 2. TenantProfile (el perfil fiscal/comercial, 1:1 con Tenant)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TenantProfile {
    pub id: Uuid,

    // Identidad fiscal única e inmutable (11 dígitos)
    pub ruc: String,

    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub logo_url: Option<String>,
    pub website: Option<String>,

    pub timezone: String,
    pub currency: String,
    pub tax_percent: Decimal,

    pub description: Option<String>,

    // Horario comercial en formato HH:MM
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,

    pub tenant_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

// Perfil con su tenant embebido, solo para el listado.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileWithTenant {
    #[serde(flatten)]
    pub profile: TenantProfile,
    pub tenant: Tenant,
}

// Confirmación devuelta por los borrados lógicos.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteConfirmation {
    pub message: String,
    pub deleted_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenantInput {
    #[validate(length(min = 1, max = 120, message = "El nombre del negocio es obligatorio."))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "El dominio es obligatorio."))]
    pub domain: String,

    #[validate(length(min = 1, max = 255, message = "El slug es obligatorio."))]
    pub slug: String,

    // Id o código del plan (p. ej. "FREE")
    #[validate(length(min = 1, message = "El plan es obligatorio."))]
    pub plan: String,

    // RUC del negocio: alimenta el perfil que se crea junto al tenant
    #[validate(custom(function = "validate_ruc"))]
    pub ruc: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenantProfileInput {
    #[validate(custom(function = "validate_ruc"))]
    pub ruc: String,

    pub phone: Option<String>,

    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,

    #[validate(length(min = 5, max = 500, message = "La dirección debe tener entre 5 y 500 caracteres"))]
    pub address: Option<String>,

    #[validate(url(message = "La URL del logo no es válida"))]
    pub logo_url: Option<String>,

    #[validate(url(message = "URL del sitio web inválida"))]
    pub website: Option<String>,

    pub timezone: Option<String>,

    #[validate(length(min = 3, max = 3, message = "La moneda debe ser un código de 3 letras"))]
    pub currency: Option<String>,

    #[validate(custom(function = "validate_tax_percent"))]
    pub tax_percent: Decimal,

    #[validate(length(min = 10, max = 1000, message = "La descripción debe tener entre 10 y 1000 caracteres"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_time_format"))]
    pub opening_time: Option<String>,

    #[validate(custom(function = "validate_time_format"))]
    pub closing_time: Option<String>,
}

// El RUC no aparece aquí: identidad fiscal única e inmutable, no hay
// forma de cambiarlo por esta vía.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTenantProfileInput {
    pub phone: Option<String>,

    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,

    #[validate(length(min = 5, max = 500, message = "La dirección debe tener entre 5 y 500 caracteres"))]
    pub address: Option<String>,

    #[validate(url(message = "La URL del logo no es válida"))]
    pub logo_url: Option<String>,

    #[validate(url(message = "URL del sitio web inválida"))]
    pub website: Option<String>,

    pub timezone: Option<String>,

    #[validate(length(min = 3, max = 3, message = "La moneda debe ser un código de 3 letras"))]
    pub currency: Option<String>,

    #[validate(custom(function = "validate_tax_percent"))]
    pub tax_percent: Option<Decimal>,

    #[validate(length(min = 10, max = 1000, message = "La descripción debe tener entre 10 y 1000 caracteres"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_time_format"))]
    pub opening_time: Option<String>,

    #[validate(custom(function = "validate_time_format"))]
    pub closing_time: Option<String>,
}

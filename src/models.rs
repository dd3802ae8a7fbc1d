pub mod branch;
pub mod plan;
pub mod tenant;

use rust_decimal::Decimal;
use validator::ValidationError;

// ---
// Validaciones de campo compartidas entre los inputs
// ---

pub(crate) fn validate_non_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("El valor no puede ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

pub(crate) fn validate_tax_percent(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() || *val > Decimal::from(100) {
        let mut err = ValidationError::new("range");
        err.message = Some("El impuesto debe estar entre 0 y 100.".into());
        return Err(err);
    }
    Ok(())
}

// RUC peruano: 11 dígitos, prefijo 10 / 15 / 17 / 20.
pub(crate) fn validate_ruc(ruc: &str) -> Result<(), ValidationError> {
    let well_formed = ruc.len() == 11
        && ruc.bytes().all(|b| b.is_ascii_digit())
        && ["10", "15", "17", "20"].contains(&&ruc[..2]);

    if !well_formed {
        let mut err = ValidationError::new("ruc");
        err.message =
            Some("RUC inválido. Debe iniciar con 10, 15, 17 o 20 y tener 11 dígitos".into());
        return Err(err);
    }
    Ok(())
}

// Forma sintáctica HH:MM (los rangos de negocio se validan en el servicio).
pub(crate) fn validate_time_format(value: &str) -> Result<(), ValidationError> {
    let valid = matches!(value.split_once(':'), Some((h, m))
        if h.parse::<u32>().map(|h| h <= 23).unwrap_or(false)
            && m.len() == 2
            && m.parse::<u32>().map(|m| m <= 59).unwrap_or(false));

    if !valid {
        let mut err = ValidationError::new("time_format");
        err.message = Some("Formato de hora inválido. Use HH:MM (ej: 09:00)".into());
        return Err(err);
    }
    Ok(())
}

// src/services/hours.rs

use crate::common::error::AppError;

const OPENING_MIN: u32 = 6 * 60; // 06:00
const OPENING_MAX: u32 = 22 * 60; // 22:00
const CLOSING_MIN: u32 = 10 * 60; // 10:00
const CLOSING_MAX: u32 = 24 * 60; // 24:00

// Valida un par apertura/cierre del horario comercial. Función pura;
// los chequeos corren en este orden exacto y el primero que falla gana.
pub fn validate_business_hours(opening_time: &str, closing_time: &str) -> Result<(), AppError> {
    let opening = parse_minutes(opening_time)?;
    let closing = parse_minutes(closing_time)?;

    if closing <= opening {
        return Err(AppError::Validation(
            "La hora de cierre debe ser posterior a la hora de apertura".to_string(),
        ));
    }

    if !(OPENING_MIN..=OPENING_MAX).contains(&opening) {
        return Err(AppError::Validation(
            "La hora de apertura debe estar entre 06:00 y 22:00".to_string(),
        ));
    }

    if !(CLOSING_MIN..=CLOSING_MAX).contains(&closing) {
        return Err(AppError::Validation(
            "La hora de cierre debe estar entre 10:00 y 24:00".to_string(),
        ));
    }

    Ok(())
}

// "HH:MM" → minutos desde medianoche.
fn parse_minutes(raw: &str) -> Result<u32, AppError> {
    let invalid =
        || AppError::Validation("Formato de hora inválido. Use HH:MM (ej: 09:00)".to_string());

    let (hours, minutes) = raw.split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

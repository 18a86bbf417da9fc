//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y normalización de valores de entrada.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use num_traits::Zero;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

lazy_static! {
    // ABC1234 (antigua) o ABC1D23 (Mercosul), ya normalizada
    static ref PLATE_REGEX: Regex = Regex::new(r"^[A-Z]{3}[0-9][A-Z0-9][0-9]{2}$").unwrap();
    static ref MONTH_REGEX: Regex = Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").unwrap();
}

/// Normalizar matrícula: mayúsculas y sin separadores
pub fn normalize_plate(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Validar formato de matrícula de vehículo
pub fn validate_plate(value: &str) -> Result<(), ValidationError> {
    if !PLATE_REGEX.is_match(&normalize_plate(value)) {
        let mut error = ValidationError::new("plate");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"ABC1234 or ABC1D23".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Validar formato de teléfono: 10 u 11 dígitos, con o sin prefijo 55
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !(10..=13).contains(&digits) {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar mes de referencia YYYY-MM
pub fn validate_month(value: &str) -> Result<(), ValidationError> {
    if !MONTH_REGEX.is_match(value) {
        let mut error = ValidationError::new("month");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM".to_string());
        return Err(error);
    }
    Ok(())
}

/// Convertir YYYY-MM en el primer y último día del mes
pub fn month_bounds(value: &str) -> Option<(NaiveDate, NaiveDate)> {
    validate_month(value).ok()?;
    let first = NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d").ok()?;
    let next = first.checked_add_months(chrono::Months::new(1))?;
    Some((first, next.pred_opt()?))
}

/// Validar que un importe sea estrictamente positivo
pub fn validate_positive_amount(value: &Decimal) -> Result<(), ValidationError> {
    validate_positive(*value)
}

/// Validar que un importe no sea negativo
pub fn validate_non_negative_amount(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(*value)
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + Zero + Serialize>(value: T) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + Zero + Serialize>(value: T) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que el rango de fechas no esté invertido
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        let mut error = ValidationError::new("date_range");
        error.add_param("start".into(), &start);
        error.add_param("end".into(), &end);
        return Err(error);
    }
    Ok(())
}

/// Trim que convierte cadenas vacías en None
pub fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_plate() {
        assert_eq!(normalize_plate("abc-1d23"), "ABC1D23");
        assert_eq!(normalize_plate(" ABC 1234 "), "ABC1234");
    }

    #[test]
    fn test_validate_plate() {
        assert!(validate_plate("ABC-1234").is_ok());
        assert!(validate_plate("abc1d23").is_ok());
        assert!(validate_plate("AB12345").is_err());
        assert!(validate_plate("ABCD123").is_err());
        assert!(validate_plate("").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("(11) 98765-4321").is_ok());
        assert!(validate_phone("+55 11 3456-7890").is_ok());
        assert!(validate_phone("12345").is_err());
    }

    #[test]
    fn test_month_bounds() {
        let (first, last) = month_bounds("2024-02").unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let (_, december_last) = month_bounds("2025-12").unwrap();
        assert_eq!(december_last, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());

        assert!(month_bounds("2025-13").is_none());
        assert!(month_bounds("25-01").is_none());
    }

    #[test]
    fn test_validate_amounts() {
        assert!(validate_positive_amount(&Decimal::new(1050, 2)).is_ok());
        assert!(validate_positive_amount(&Decimal::ZERO).is_err());
        assert!(validate_non_negative_amount(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative_amount(&Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn test_validate_date_range() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        assert!(validate_date_range(start, end).is_ok());
        assert!(validate_date_range(start, start).is_ok());
        assert!(validate_date_range(end, start).is_err());
    }

    #[test]
    fn test_clean_optional() {
        assert_eq!(clean_optional(Some("  x ".to_string())), Some("x".to_string()));
        assert_eq!(clean_optional(Some("   ".to_string())), None);
        assert_eq!(clean_optional(None), None);
    }
}

//! DTOs de la API
//!
//! Requests validados con `validator` y responses serializadas.

pub mod api_response;
pub mod auth_dto;
pub mod dashboard_dto;
pub mod driver_dto;
pub mod expense_dto;
pub mod invoice_dto;
pub mod quote_dto;
pub mod service_dto;
pub mod vehicle_dto;

pub use api_response::ApiResponse;

use serde::{Deserialize, Deserializer};

/// Distinguir "campo ausente" (None) de "campo a null" (Some(None))
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Aplicar un parche de campo anulable
pub fn patch<T>(current: Option<T>, update: Option<Option<T>>) -> Option<T> {
    match update {
        Some(value) => value,
        None => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        notes: Option<Option<String>>,
    }

    #[test]
    fn test_double_option_distinguishes_null_from_absent() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        let value: Patch = serde_json::from_str(r#"{"notes": "x"}"#).unwrap();

        assert_eq!(patch(Some("old".to_string()), absent.notes), Some("old".to_string()));
        assert_eq!(patch(Some("old".to_string()), null.notes), None);
        assert_eq!(patch(None, value.notes), Some("x".to_string()));
    }
}

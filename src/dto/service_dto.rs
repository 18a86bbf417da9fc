use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::double_option;
use crate::models::service::ServiceStatus;
use crate::utils::validation::validate_date_range;

// Request para agendar un servicio
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_create_dates", skip_on_field_errors = false))]
pub struct CreateServiceRequest {
    #[validate(length(min = 1, max = 200), custom = "crate::utils::validation::validate_not_blank")]
    pub company: String,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    pub vehicle_id: Option<Uuid>,

    #[validate(range(min = 0, max = 1000))]
    pub passengers: i32,

    #[validate(length(min = 1, max = 300), custom = "crate::utils::validation::validate_not_blank")]
    pub origin: String,

    #[validate(length(min = 1, max = 300), custom = "crate::utils::validation::validate_not_blank")]
    pub destination: String,

    #[validate(custom = "crate::utils::validation::validate_non_negative_amount")]
    pub final_value: Decimal,

    #[serde(default)]
    pub status: ServiceStatus,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

fn validate_create_dates(request: &CreateServiceRequest) -> Result<(), ValidationError> {
    validate_date_range(request.start_date, request.end_date)
}

// Request para actualizar un servicio; el rango final se valida tras el merge
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateServiceRequest {
    #[validate(length(min = 1, max = 200), custom = "crate::utils::validation::validate_not_blank")]
    pub company: Option<String>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "double_option")]
    pub vehicle_id: Option<Option<Uuid>>,

    #[validate(range(min = 0, max = 1000))]
    pub passengers: Option<i32>,

    #[validate(length(min = 1, max = 300))]
    pub origin: Option<String>,

    #[validate(length(min = 1, max = 300))]
    pub destination: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_non_negative_amount")]
    pub final_value: Option<Decimal>,

    pub status: Option<ServiceStatus>,

    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// Filtros del listado de servicios
#[derive(Debug, Default, Deserialize)]
pub struct ServiceFilters {
    pub status: Option<ServiceStatus>,
    pub company: Option<String>,
    /// Servicios que terminan en o después de esta fecha
    pub from: Option<NaiveDate>,
    /// Servicios que empiezan en o antes de esta fecha
    pub to: Option<NaiveDate>,
    pub invoiced: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(start: &str, end: &str) -> CreateServiceRequest {
        serde_json::from_value(json!({
            "company": "Escola ABC",
            "start_date": start,
            "end_date": end,
            "passengers": 30,
            "origin": "São Paulo",
            "destination": "Campos do Jordão",
            "final_value": "3500.00"
        }))
        .unwrap()
    }

    #[test]
    fn test_end_before_start_is_invalid() {
        assert!(request("2025-05-02", "2025-05-01").validate().is_err());
        assert!(request("2025-05-02", "2025-05-02").validate().is_ok());
    }

    #[test]
    fn test_status_defaults_to_scheduled() {
        assert_eq!(request("2025-05-02", "2025-05-03").status, ServiceStatus::Agendado);
    }
}

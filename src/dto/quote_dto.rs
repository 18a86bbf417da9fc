use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use validator::Validate;

use super::double_option;
use crate::models::quote::QuoteStatus;

// Request público para pedir un orçamento
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuoteRequest {
    #[validate(length(min = 2, max = 150), custom = "crate::utils::validation::validate_not_blank")]
    pub customer_name: String,

    #[validate(email)]
    pub customer_email: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub customer_phone: String,

    #[validate(length(min = 1, max = 100), custom = "crate::utils::validation::validate_not_blank")]
    pub service_type: String,

    #[validate(length(max = 100))]
    pub vehicle_type: Option<String>,

    #[validate(range(min = 1, max = 1000))]
    pub passengers: i32,

    pub trip_date: NaiveDate,

    pub trip_time: Option<NaiveTime>,

    #[validate(length(min = 1, max = 300), custom = "crate::utils::validation::validate_not_blank")]
    pub origin: String,

    #[validate(length(min = 1, max = 300), custom = "crate::utils::validation::validate_not_blank")]
    pub destination: String,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

// Request para actualizar un orçamento
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateQuoteRequest {
    #[validate(length(min = 2, max = 150), custom = "crate::utils::validation::validate_not_blank")]
    pub customer_name: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub customer_email: Option<Option<String>>,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub customer_phone: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub service_type: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub vehicle_type: Option<Option<String>>,

    #[validate(range(min = 1, max = 1000))]
    pub passengers: Option<i32>,

    pub trip_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "double_option")]
    pub trip_time: Option<Option<NaiveTime>>,

    #[validate(length(min = 1, max = 300))]
    pub origin: Option<String>,

    #[validate(length(min = 1, max = 300))]
    pub destination: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,

    pub status: Option<QuoteStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuoteStatusRequest {
    pub status: QuoteStatus,
}

/// Filtros para el listado de orçamentos
#[derive(Debug, Default, Deserialize)]
pub struct QuoteFilters {
    pub status: Option<QuoteStatus>,
}

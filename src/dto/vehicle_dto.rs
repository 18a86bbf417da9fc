use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use super::double_option;

// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(custom = "crate::utils::validation::validate_plate")]
    pub plate: String,

    #[validate(length(min = 1, max = 50), custom = "crate::utils::validation::validate_not_blank")]
    pub vehicle_type: String,

    #[validate(length(max = 30))]
    pub color: Option<String>,

    #[validate(range(min = 1, max = 100))]
    pub capacity: i32,

    /// RENAVAM
    #[validate(length(max = 20))]
    pub registration_number: Option<String>,

    #[serde(default)]
    pub antt_license: bool,
    pub antt_expiry: Option<NaiveDate>,

    #[serde(default)]
    pub der_license: bool,
    pub der_expiry: Option<NaiveDate>,

    #[serde(default)]
    pub municipal_license: bool,
    pub municipal_expiry: Option<NaiveDate>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

// Request para actualizar vehículo
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(custom = "crate::utils::validation::validate_plate")]
    pub plate: Option<String>,

    #[validate(length(min = 1, max = 50), custom = "crate::utils::validation::validate_not_blank")]
    pub vehicle_type: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub color: Option<Option<String>>,

    #[validate(range(min = 1, max = 100))]
    pub capacity: Option<i32>,

    #[serde(default, deserialize_with = "double_option")]
    pub registration_number: Option<Option<String>>,

    pub antt_license: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub antt_expiry: Option<Option<NaiveDate>>,

    pub der_license: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub der_expiry: Option<Option<NaiveDate>>,

    pub municipal_license: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub municipal_expiry: Option<Option<NaiveDate>>,

    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use super::double_option;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(length(min = 2, max = 150), custom = "crate::utils::validation::validate_not_blank")]
    pub name: String,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub phone: String,

    #[validate(length(max = 200))]
    pub company: Option<String>,

    /// Número de la CNH
    #[validate(length(max = 20))]
    pub license_number: Option<String>,
    pub license_expiry: Option<NaiveDate>,
    pub course_expiry: Option<NaiveDate>,

    #[validate(length(max = 100))]
    pub bank_name: Option<String>,
    #[validate(length(max = 20))]
    pub bank_agency: Option<String>,
    #[validate(length(max = 30))]
    pub bank_account: Option<String>,
    #[validate(length(max = 100))]
    pub pix_key: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[validate(length(min = 2, max = 150), custom = "crate::utils::validation::validate_not_blank")]
    pub name: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub company: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub license_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub license_expiry: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub course_expiry: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub bank_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub bank_agency: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub bank_account: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub pix_key: Option<Option<String>>,
}

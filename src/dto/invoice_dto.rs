use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Datos bancarios impresos en la fatura
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BankDetails {
    #[validate(length(min = 1, max = 100), custom = "crate::utils::validation::validate_not_blank")]
    pub bank_name: String,
    #[validate(length(min = 1, max = 20), custom = "crate::utils::validation::validate_not_blank")]
    pub agency: String,
    #[validate(length(min = 1, max = 30), custom = "crate::utils::validation::validate_not_blank")]
    pub account: String,
    #[validate(length(min = 1, max = 150), custom = "crate::utils::validation::validate_not_blank")]
    pub holder: String,
    #[validate(length(max = 100))]
    pub pix_key: Option<String>,
}

// Request para generar una fatura
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    #[validate(length(min = 1, max = 200))]
    pub service_ids: Vec<Uuid>,
    #[validate]
    pub bank: BankDetails,
    /// Por defecto, hoy
    pub issue_date: Option<NaiveDate>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

//! Modelo de Quote
//!
//! Pedidos de orçamento enviados por clientes desde el formulario público.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::UnknownVariant;

/// Estado del orçamento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    #[default]
    Pendente,
    Confirmado,
    Cancelado,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Pendente => "pendente",
            QuoteStatus::Confirmado => "confirmado",
            QuoteStatus::Cancelado => "cancelado",
        }
    }
}

impl TryFrom<String> for QuoteStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pendente" => Ok(QuoteStatus::Pendente),
            "confirmado" => Ok(QuoteStatus::Confirmado),
            "cancelado" => Ok(QuoteStatus::Cancelado),
            _ => Err(UnknownVariant::new("quote status", value)),
        }
    }
}

/// Quote - mapea a la tabla quotes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Quote {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: String,
    pub service_type: String,
    pub vehicle_type: Option<String>,
    pub passengers: i32,
    pub trip_date: NaiveDate,
    pub trip_time: Option<NaiveTime>,
    pub origin: String,
    pub destination: String,
    pub notes: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: QuoteStatus,
    pub created_at: DateTime<Utc>,
}

//! Modelo de Service
//!
//! Servicios agendados (viajes contratados) que luego se facturan.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::UnknownVariant;

/// Estado del servicio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    #[default]
    Agendado,
    EmAndamento,
    Concluido,
    Cancelado,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Agendado => "agendado",
            ServiceStatus::EmAndamento => "em_andamento",
            ServiceStatus::Concluido => "concluido",
            ServiceStatus::Cancelado => "cancelado",
        }
    }
}

impl TryFrom<String> for ServiceStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "agendado" => Ok(ServiceStatus::Agendado),
            "em_andamento" => Ok(ServiceStatus::EmAndamento),
            "concluido" => Ok(ServiceStatus::Concluido),
            "cancelado" => Ok(ServiceStatus::Cancelado),
            _ => Err(UnknownVariant::new("service status", value)),
        }
    }
}

/// Service - mapea a la tabla services
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Service {
    pub id: Uuid,
    pub company: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub vehicle_id: Option<Uuid>,
    pub passengers: i32,
    pub origin: String,
    pub destination: String,
    pub final_value: Decimal,
    #[sqlx(try_from = "String")]
    pub status: ServiceStatus,
    pub invoiced: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

//! Modelo de Driver

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Driver - mapea a la tabla drivers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub company: Option<String>,
    /// Número de la CNH
    pub license_number: Option<String>,
    pub license_expiry: Option<NaiveDate>,
    /// Vencimiento del curso de transporte de pasajeros
    pub course_expiry: Option<NaiveDate>,
    pub bank_name: Option<String>,
    pub bank_agency: Option<String>,
    pub bank_account: Option<String>,
    pub pix_key: Option<String>,
    /// Clave dentro del PhotoStore
    pub photo_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

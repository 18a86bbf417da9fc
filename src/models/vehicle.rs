//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle de la frota.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub plate: String,
    pub vehicle_type: String,
    pub color: Option<String>,
    pub capacity: i32,
    /// RENAVAM
    pub registration_number: Option<String>,
    pub antt_license: bool,
    pub antt_expiry: Option<NaiveDate>,
    pub der_license: bool,
    pub der_expiry: Option<NaiveDate>,
    pub municipal_license: bool,
    pub municipal_expiry: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Licencias activas con su fecha de vencimiento
    pub fn permits(&self) -> Vec<(&'static str, NaiveDate)> {
        [
            ("ANTT", self.antt_license, self.antt_expiry),
            ("DER", self.der_license, self.der_expiry),
            ("Municipal", self.municipal_license, self.municipal_expiry),
        ]
        .into_iter()
        .filter_map(|(name, active, expiry)| match (active, expiry) {
            (true, Some(date)) => Some((name, date)),
            _ => None,
        })
        .collect()
    }
}

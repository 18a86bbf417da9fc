//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean
//! al schema PostgreSQL.

pub mod driver;
pub mod expense;
pub mod quote;
pub mod service;
pub mod user;
pub mod vehicle;

use thiserror::Error;

/// Valor de texto que no corresponde a ninguna variante conocida
#[derive(Debug, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: String) -> Self {
        Self { kind, value }
    }
}

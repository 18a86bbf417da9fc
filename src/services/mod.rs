//! Servicios de negocio
//!
//! Reglas puras (estado de gastos, recurrencia, filtros, informes,
//! faturas, alertas) y el almacenamiento de fotos.

pub mod archive;
pub mod document_alerts;
pub mod expense_filter;
pub mod expense_report;
pub mod expense_status;
pub mod invoice;
pub mod photo_storage;
pub mod recurrence;
